use serde::{Deserialize, Serialize};

use super::error::{ArtifactError, Result};
use super::model::BootstrapEnsemble;

/// Probability levels of the ±1σ band.
pub const BAND_PROBS: (f64, f64) = (0.16, 0.84);

// ---------------------------------------------------------------------------
// Plotting positions
// ---------------------------------------------------------------------------

/// Plotting-position parameters of the empirical quantile estimate.
///
/// The k-th of `n` sorted values sits at probability
/// `(k - alpha) / (n + 1 - alpha - beta)`; quantiles in between are linear
/// interpolations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlottingPositions {
    pub alpha: f64,
    pub beta: f64,
}

impl PlottingPositions {
    /// `p(k) = (k - 1) / (n - 1)`, the positions the fitting code reports with.
    pub const LINEAR: Self = Self {
        alpha: 1.0,
        beta: 1.0,
    };
    /// `p(k) = k / (n + 1)`.
    pub const WEIBULL: Self = Self {
        alpha: 0.0,
        beta: 0.0,
    };
    /// `p(k) = k / n`.
    pub const EMPIRICAL_CDF: Self = Self {
        alpha: 0.0,
        beta: 1.0,
    };
    /// `p(k) = (k - 1/2) / n`.
    pub const HAZEN: Self = Self {
        alpha: 0.5,
        beta: 0.5,
    };
}

impl Default for PlottingPositions {
    fn default() -> Self {
        Self::LINEAR
    }
}

// ---------------------------------------------------------------------------
// Quantiles
// ---------------------------------------------------------------------------

/// Quantile `p` of `sorted` (ascending, non-empty).
pub fn quantile_sorted(sorted: &[f64], p: f64, pos: PlottingPositions) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let m = pos.alpha + p * (1.0 - pos.alpha - pos.beta);
    let h = n as f64 * p + m;
    let k = (h.floor() as isize).clamp(1, n as isize - 1) as usize;
    let g = (h - k as f64).clamp(0.0, 1.0);
    (1.0 - g) * sorted[k - 1] + g * sorted[k]
}

/// Lower and upper quantile curves of a bootstrap ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileBand {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl QuantileBand {
    /// Quantiles `probs` of every grid column, taken across the replicates.
    pub fn from_ensemble(
        ensemble: &BootstrapEnsemble,
        probs: (f64, f64),
        pos: PlottingPositions,
    ) -> Result<Self> {
        if ensemble.n_boot() == 0 || ensemble.n_points() == 0 {
            return Err(ArtifactError::shape(
                "bootstrap ensemble",
                "at least one replicate and one grid point",
                format!("{}x{}", ensemble.n_boot(), ensemble.n_points()),
            ));
        }

        let (p_lo, p_hi) = if probs.0 <= probs.1 {
            probs
        } else {
            (probs.1, probs.0)
        };

        let mut lower = Vec::with_capacity(ensemble.n_points());
        let mut upper = Vec::with_capacity(ensemble.n_points());
        for j in 0..ensemble.n_points() {
            let mut column = ensemble.column(j);
            column.sort_by(f64::total_cmp);
            lower.push(quantile_sorted(&column, p_lo, pos));
            upper.push(quantile_sorted(&column, p_hi, pos));
        }
        Ok(QuantileBand { lower, upper })
    }

    /// The ±1σ band with the default plotting positions.
    pub fn sigma_band(ensemble: &BootstrapEnsemble) -> Result<Self> {
        Self::from_ensemble(ensemble, BAND_PROBS, PlottingPositions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::text::NumericArray;
    use approx::assert_abs_diff_eq;

    fn ensemble(rows: usize, cols: usize, values: Vec<f64>) -> BootstrapEnsemble {
        BootstrapEnsemble {
            replicates: NumericArray { rows, cols, values },
        }
    }

    #[test]
    fn identical_replicates_collapse_the_band() {
        let row = [0.3, -1.2, 4.5, 2.0];
        let values: Vec<f64> = (0..7).flat_map(|_| row).collect();
        let ens = ensemble(7, 4, values);
        for pos in [
            PlottingPositions::LINEAR,
            PlottingPositions::WEIBULL,
            PlottingPositions::EMPIRICAL_CDF,
            PlottingPositions::HAZEN,
        ] {
            let band = QuantileBand::from_ensemble(&ens, BAND_PROBS, pos).unwrap();
            for (j, &v) in row.iter().enumerate() {
                assert_abs_diff_eq!(band.lower[j], v, epsilon = 1e-12);
                assert_abs_diff_eq!(band.upper[j], v, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn linear_positions_match_reference_values() {
        // Column 0..=10: quantile p is 10p exactly.
        let values: Vec<f64> = (0..=10).map(f64::from).collect();
        let ens = ensemble(11, 1, values);
        let band = QuantileBand::sigma_band(&ens).unwrap();
        assert_abs_diff_eq!(band.lower[0], 1.6, epsilon = 1e-12);
        assert_abs_diff_eq!(band.upper[0], 8.4, epsilon = 1e-12);
    }

    #[test]
    fn weibull_positions_match_reference_values() {
        // n = 4, p = 0.5: h = 2.5 → halfway between the 2nd and 3rd values.
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(
            quantile_sorted(&sorted, 0.5, PlottingPositions::WEIBULL),
            2.5,
            epsilon = 1e-12
        );
        // Tails clamp to the extreme order statistics.
        assert_abs_diff_eq!(
            quantile_sorted(&sorted, 0.01, PlottingPositions::WEIBULL),
            1.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            quantile_sorted(&sorted, 0.99, PlottingPositions::WEIBULL),
            4.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn lower_never_exceeds_upper() {
        // Deterministic pseudo-random replicates.
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1u64 << 53) as f64 * 10.0 - 5.0
        };
        for n_boot in [1, 2, 3, 10, 57] {
            let values: Vec<f64> = (0..n_boot * 25).map(|_| next()).collect();
            let ens = ensemble(n_boot, 25, values);
            let band = QuantileBand::sigma_band(&ens).unwrap();
            for j in 0..25 {
                assert!(band.lower[j] <= band.upper[j]);
            }
        }
    }

    #[test]
    fn single_replicate_is_its_own_band() {
        let ens = ensemble(1, 3, vec![1.0, 2.0, 3.0]);
        let band = QuantileBand::sigma_band(&ens).unwrap();
        assert_eq!(band.lower, vec![1.0, 2.0, 3.0]);
        assert_eq!(band.upper, band.lower);
    }

    #[test]
    fn empty_ensemble_is_rejected() {
        let ens = ensemble(0, 0, Vec::new());
        assert!(QuantileBand::sigma_band(&ens).is_err());
    }
}
