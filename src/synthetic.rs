//! Writes a complete, self-consistent result directory: a noisy power law
//! `log Y = intercept + slope · log X` with fabricated fit products.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::Bounds;
use crate::data::schema::{Artifact, CurvePart, Direction};

/// Shape and content of a synthetic result directory.
#[derive(Debug, Clone)]
pub struct SyntheticSpec {
    pub n_obs: usize,
    pub n_grid: usize,
    pub n_boot: usize,
    pub degree: usize,
    pub x_bounds: Bounds,
    pub y_bounds: Bounds,
    pub slope: f64,
    pub intercept: f64,
    pub seed: u64,
    pub x_char: String,
    pub y_char: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            n_obs: 60,
            n_grid: 100,
            n_boot: 50,
            degree: 12,
            x_bounds: Bounds { min: -1.0, max: 3.0 },
            y_bounds: Bounds { min: -0.3, max: 1.4 },
            slope: 0.4,
            intercept: 0.1,
            seed: 42,
            x_char: "m".to_string(),
            y_char: "r".to_string(),
            x_label: "Mass ($M_{\\oplus}$)".to_string(),
            y_label: "Radius ($R_{\\oplus}$)".to_string(),
        }
    }
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn linspace(b: &Bounds, n: usize) -> Vec<f64> {
    let denom = n.saturating_sub(1).max(1) as f64;
    (0..n).map(|i| b.min + (b.max - b.min) * i as f64 / denom).collect()
}

fn column_text(values: &[f64]) -> String {
    let mut out = String::new();
    for v in values {
        let _ = writeln!(out, "{v:.18e}");
    }
    out
}

fn matrix_text(rows: &[Vec<f64>]) -> String {
    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(|v| format!("{v:.18e}")).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

fn write(root: &Path, artifact: Artifact, contents: &str) -> Result<()> {
    let path = artifact.path_in(root);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
}

/// Write every artifact of a result directory under `root`.
pub fn write_result_dir(root: &Path, spec: &SyntheticSpec) -> Result<()> {
    let mut rng = SimpleRng::new(spec.seed);
    let (a, b) = (spec.intercept, spec.slope);
    let clamp_y = |v: f64| v.clamp(spec.y_bounds.min, spec.y_bounds.max);
    let clamp_x = |v: f64| v.clamp(spec.x_bounds.min, spec.x_bounds.max);

    // ---- input/ ----
    let obs_path = Artifact::Observations.path_in(root);
    if let Some(parent) = obs_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(&obs_path)
        .with_context(|| format!("creating {}", obs_path.display()))?;
    writer.write_record([
        spec.x_char.clone(),
        format!("{}_sigma", spec.x_char),
        spec.y_char.clone(),
        format!("{}_sigma", spec.y_char),
    ])?;
    let x_span = spec.x_bounds.max - spec.x_bounds.min;
    for _ in 0..spec.n_obs {
        let log_x = rng.uniform(
            spec.x_bounds.min + 0.1 * x_span,
            spec.x_bounds.max - 0.1 * x_span,
        );
        let log_y = clamp_y(a + b * log_x + rng.gauss(0.0, 0.05));
        let (x, y) = (10f64.powf(log_x), 10f64.powf(log_y));
        let x_sigma = x * rng.uniform(0.05, 0.2);
        let y_sigma = y * rng.uniform(0.05, 0.2);
        writer.write_record([x, x_sigma, y, y_sigma].map(|v| format!("{v}")))?;
    }
    writer.flush().context("flushing observations")?;

    let bounds_text = |bd: &Bounds| column_text(&[bd.min, bd.max]);
    write(root, Artifact::XBounds, &bounds_text(&spec.x_bounds))?;
    write(root, Artifact::YBounds, &bounds_text(&spec.y_bounds))?;

    // ---- output/ ----
    let x_points = linspace(&spec.x_bounds, spec.n_grid);
    let y_points = linspace(&spec.y_bounds, spec.n_grid);
    write(root, Artifact::XPoints, &column_text(&x_points))?;
    write(root, Artifact::YPoints, &column_text(&y_points))?;

    let y_cond_x: Vec<f64> = x_points.iter().map(|x| clamp_y(a + b * x)).collect();
    let x_cond_y: Vec<f64> = y_points.iter().map(|y| clamp_x((y - a) / b)).collect();

    for (dir, estimate, spread) in [
        (Direction::YGivenX, &y_cond_x, 0.1),
        (Direction::XGivenY, &x_cond_y, 0.25),
    ] {
        let shift = |d: f64| estimate.iter().map(|v| v + d).collect::<Vec<_>>();
        write(root, Artifact::Curve(dir, CurvePart::Estimate), &column_text(estimate))?;
        write(root, Artifact::Curve(dir, CurvePart::Upper), &column_text(&shift(spread)))?;
        write(root, Artifact::Curve(dir, CurvePart::Lower), &column_text(&shift(-spread)))?;

        let replicates: Vec<Vec<f64>> = (0..spec.n_boot)
            .map(|_| {
                let offset = rng.gauss(0.0, spread / 4.0);
                estimate
                    .iter()
                    .map(|v| v + offset + rng.gauss(0.0, spread / 20.0))
                    .collect()
            })
            .collect();
        write(root, Artifact::Bootstrap(dir), &matrix_text(&replicates))?;
    }

    let n_weights = spec.degree * spec.degree;
    let weight_row = |rng: &mut SimpleRng| {
        let raw: Vec<f64> = (0..n_weights).map(|_| rng.next_f64().powi(4)).collect();
        let total: f64 = raw.iter().sum::<f64>().max(f64::MIN_POSITIVE);
        raw.into_iter().map(|w| w / total).collect::<Vec<_>>()
    };
    let weights_boot: Vec<Vec<f64>> = (0..spec.n_boot).map(|_| weight_row(&mut rng)).collect();
    write(root, Artifact::WeightsBoot, &matrix_text(&weights_boot))?;
    write(root, Artifact::Weights, &column_text(&weight_row(&mut rng)))?;

    let joint: Vec<Vec<f64>> = y_points
        .iter()
        .map(|y| {
            x_points
                .iter()
                .map(|x| {
                    let r = y - (a + b * x);
                    (-(r * r) / (2.0 * 0.15 * 0.15)).exp()
                })
                .collect()
        })
        .collect();
    write(root, Artifact::JointDistribution, &matrix_text(&joint))?;

    let labels = format!(
        "{{'X_label': '{}', 'Y_label': '{}', 'X_char': '{}', 'Y_char': '{}'}}\n",
        escape(&spec.x_label),
        escape(&spec.y_label),
        escape(&spec.x_char),
        escape(&spec.y_char)
    );
    write(root, Artifact::AxesLabels, &labels)?;

    log::info!(
        "wrote synthetic result ({} observations, {} grid points, {} bootstraps) to {}",
        spec.n_obs,
        spec.n_grid,
        spec.n_boot,
        root.display()
    );
    Ok(())
}

/// Escape for a single-quoted literal.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
