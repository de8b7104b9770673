use std::path::Path;

use super::error::{ArtifactError, Result};
use super::text::NumericArray;

/// Scale factor turning a linear 1-sigma error into a log10 one
/// (`d log10(v) = 0.434 dv / v`).
pub const LOG10_SIGMA_FACTOR: f64 = 0.434;

// ---------------------------------------------------------------------------
// LabelDictionary – which columns and axis titles belong to X and Y
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDictionary {
    /// Column name of X in `XY_inputs.csv`; also used in titles.
    pub x_char: String,
    /// Column name of Y in `XY_inputs.csv`.
    pub y_char: String,
    /// Axis title for X.
    pub x_label: String,
    /// Axis title for Y.
    pub y_label: String,
}

impl LabelDictionary {
    /// `f(A|B)` for the given direction.
    pub fn conditional(&self, given_x: bool) -> String {
        if given_x {
            format!("f({}|{})", self.y_char, self.x_char)
        } else {
            format!("f({}|{})", self.x_char, self.y_char)
        }
    }
}

// ---------------------------------------------------------------------------
// Observations – the measured dataset
// ---------------------------------------------------------------------------

/// Measured (X, Y) pairs with 1-sigma errors, in linear units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observations {
    pub x: Vec<f64>,
    pub x_sigma: Vec<f64>,
    pub y: Vec<f64>,
    pub y_sigma: Vec<f64>,
}

impl Observations {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// log10 of every value, with errors propagated to first order.
    pub fn to_log10(&self) -> Observations {
        let log = |v: &[f64]| v.iter().map(|x| x.log10()).collect::<Vec<_>>();
        let sigma = |s: &[f64], v: &[f64]| {
            s.iter()
                .zip(v)
                .map(|(s, v)| log10_sigma(*v, *s))
                .collect::<Vec<_>>()
        };
        Observations {
            x: log(&self.x),
            x_sigma: sigma(&self.x_sigma, &self.x),
            y: log(&self.y),
            y_sigma: sigma(&self.y_sigma, &self.y),
        }
    }
}

/// Propagate a linear error `sigma` on `value` to log10 space.
pub fn log10_sigma(value: f64, sigma: f64) -> f64 {
    LOG10_SIGMA_FACTOR * sigma / value
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Fitting range of one variable, in log10 units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn from_array(arr: NumericArray, path: &Path) -> Result<Self> {
        let values = arr.into_vector(path)?;
        match values.as_slice() {
            [min, max] => Ok(Bounds {
                min: *min,
                max: *max,
            }),
            other => Err(ArtifactError::malformed(
                path,
                format!("expected 2 bound values, found {}", other.len()),
            )),
        }
    }

    /// The bounds in linear units.
    pub fn exp10(&self) -> (f64, f64) {
        (10f64.powf(self.min), 10f64.powf(self.max))
    }

    /// Whether every value lies within the bounds.
    pub fn contains_all(&self, values: &[f64]) -> bool {
        values.iter().all(|v| (self.min..=self.max).contains(v))
    }
}

// ---------------------------------------------------------------------------
// Curves and bootstrap replicates
// ---------------------------------------------------------------------------

/// A conditional estimate with its full-dataset quantiles, in log10 units.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCurve {
    pub points: Vec<f64>,
    pub estimate: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl GridCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Bootstrap replicates of a conditional estimate: `n_boot` rows over the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapEnsemble {
    pub replicates: NumericArray,
}

impl BootstrapEnsemble {
    pub fn n_boot(&self) -> usize {
        self.replicates.rows
    }

    pub fn n_points(&self) -> usize {
        self.replicates.cols
    }

    /// Values of every replicate at grid index `j`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.replicates.rows)
            .map(|i| self.replicates.values[i * self.replicates.cols + j])
            .collect()
    }
}

/// Shape of `weights_boot.txt`: one row of weights per bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapWeights {
    pub n_boot: usize,
    pub n_weights: usize,
}

impl BootstrapWeights {
    pub fn from_array(arr: &NumericArray) -> Self {
        BootstrapWeights {
            n_boot: arr.rows,
            n_weights: arr.cols,
        }
    }

    /// Polynomial degree implied by the number of weights per bootstrap.
    pub fn degree(&self) -> usize {
        let deg = isqrt(self.n_weights);
        if deg * deg != self.n_weights {
            log::warn!(
                "weights_boot has {} columns, not a perfect square; using degree {deg}",
                self.n_weights
            );
        }
        deg
    }
}

// ---------------------------------------------------------------------------
// Grids
// ---------------------------------------------------------------------------

/// Joint density over the (log X, log Y) rectangle; row index runs along Y.
#[derive(Debug, Clone, PartialEq)]
pub struct JointDensityGrid {
    pub density: NumericArray,
}

impl JointDensityGrid {
    pub fn range(&self) -> (f64, f64) {
        (self.density.min(), self.density.max())
    }
}

/// Square matrix of fitted weights, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    pub side: usize,
    pub values: Vec<f64>,
}

impl WeightMatrix {
    /// Reshape a flat weight vector; the length must be a perfect square.
    pub fn from_flat(values: Vec<f64>) -> Result<Self> {
        let side = isqrt(values.len());
        if side * side != values.len() {
            return Err(ArtifactError::shape(
                "weights",
                "a perfect-square length",
                values.len(),
            ));
        }
        Ok(WeightMatrix { side, values })
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.side + col]
    }

    pub fn as_array(&self) -> NumericArray {
        NumericArray {
            rows: self.side,
            cols: self.side,
            values: self.values.clone(),
        }
    }
}

/// Integer square root, rounded down.
pub fn isqrt(n: usize) -> usize {
    let mut r = (n as f64).sqrt() as usize;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn log_sigma_uses_first_order_propagation() {
        assert_abs_diff_eq!(log10_sigma(10.0, 1.0), 0.0434, epsilon = 1e-6);

        let obs = Observations {
            x: vec![10.0],
            x_sigma: vec![1.0],
            y: vec![100.0],
            y_sigma: vec![5.0],
        };
        let log = obs.to_log10();
        assert_abs_diff_eq!(log.x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(log.x_sigma[0], 0.0434, epsilon = 1e-6);
        assert_abs_diff_eq!(log.y[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(log.y_sigma[0], 0.0217, epsilon = 1e-6);
    }

    #[test]
    fn degree_from_weights_boot_shape() {
        let shape = BootstrapWeights {
            n_boot: 50,
            n_weights: 144,
        };
        assert_eq!(shape.degree(), 12);
    }

    #[test]
    fn weights_reshape_to_square() {
        let w = WeightMatrix::from_flat((0..9).map(f64::from).collect()).unwrap();
        assert_eq!(w.side, 3);
        assert_eq!(w.get(1, 2), 5.0);
    }

    #[test]
    fn non_square_weights_are_a_shape_mismatch() {
        let err = WeightMatrix::from_flat(vec![0.0; 10]).unwrap_err();
        assert!(matches!(err, ArtifactError::ShapeMismatch { .. }));
    }

    #[test]
    fn isqrt_floors() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(145), 12);
    }

    #[test]
    fn bounds_need_two_values() {
        let path = Path::new("X_bounds.txt");
        let ok = NumericArray {
            rows: 2,
            cols: 1,
            values: vec![0.0, 1.0],
        };
        assert_eq!(Bounds::from_array(ok, path).unwrap().exp10(), (1.0, 10.0));

        let bad = NumericArray {
            rows: 1,
            cols: 3,
            values: vec![0.0, 1.0, 2.0],
        };
        assert!(Bounds::from_array(bad, path).is_err());
    }
}
