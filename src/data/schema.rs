use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Version of the result-directory layout understood by this crate.
pub const SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Direction – which variable is conditioned on which
// ---------------------------------------------------------------------------

/// Conditioning direction of a regression curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// f(Y | X): curve evaluated on the X grid.
    YGivenX,
    /// f(X | Y): curve evaluated on the Y grid.
    XGivenY,
}

impl Direction {
    /// File stem shared by the curve, its quantiles and the bootstrap array.
    pub fn stem(self) -> &'static str {
        match self {
            Direction::YGivenX => "Y_cond_X",
            Direction::XGivenY => "X_cond_Y",
        }
    }

    /// The grid artifact the curve is evaluated on.
    pub fn grid(self) -> Artifact {
        match self {
            Direction::YGivenX => Artifact::XPoints,
            Direction::XGivenY => Artifact::YPoints,
        }
    }
}

/// One of the three curves stored per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurvePart {
    Estimate,
    Upper,
    Lower,
}

// ---------------------------------------------------------------------------
// Artifact – every file the fitting procedure leaves behind
// ---------------------------------------------------------------------------

/// A file inside a result directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Observations,
    XBounds,
    YBounds,
    XPoints,
    YPoints,
    Curve(Direction, CurvePart),
    Bootstrap(Direction),
    WeightsBoot,
    JointDistribution,
    Weights,
    AxesLabels,
}

impl Artifact {
    /// Path relative to the result directory.
    pub fn relative_path(self) -> PathBuf {
        let name = match self {
            Artifact::Observations => "input/XY_inputs.csv".to_string(),
            Artifact::XBounds => "input/X_bounds.txt".to_string(),
            Artifact::YBounds => "input/Y_bounds.txt".to_string(),
            Artifact::XPoints => "output/X_points.txt".to_string(),
            Artifact::YPoints => "output/Y_points.txt".to_string(),
            Artifact::Curve(dir, CurvePart::Estimate) => format!("output/{}.txt", dir.stem()),
            Artifact::Curve(dir, CurvePart::Upper) => format!("output/{}_upper.txt", dir.stem()),
            Artifact::Curve(dir, CurvePart::Lower) => format!("output/{}_lower.txt", dir.stem()),
            Artifact::Bootstrap(dir) => format!("output/{}_boot.txt", dir.stem()),
            Artifact::WeightsBoot => "output/weights_boot.txt".to_string(),
            Artifact::JointDistribution => "output/joint_distribution.txt".to_string(),
            Artifact::Weights => "output/weights.txt".to_string(),
            Artifact::AxesLabels => "output/other_data_products/AxesLabels.txt".to_string(),
        };
        PathBuf::from(name)
    }

    /// Absolute location of this artifact inside `result_dir`.
    pub fn path_in(self, result_dir: &Path) -> PathBuf {
        result_dir.join(self.relative_path())
    }

    /// Every artifact a complete result directory contains.
    pub fn all() -> Vec<Artifact> {
        use Artifact::*;
        let mut all = vec![Observations, XBounds, YBounds, XPoints, YPoints];
        for dir in [Direction::YGivenX, Direction::XGivenY] {
            for part in [CurvePart::Estimate, CurvePart::Upper, CurvePart::Lower] {
                all.push(Curve(dir, part));
            }
            all.push(Bootstrap(dir));
        }
        all.extend([WeightsBoot, JointDistribution, Weights, AxesLabels]);
        all
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative_path().display())
    }
}

// ---------------------------------------------------------------------------
// PlotKind – the five figures and the artifacts each needs
// ---------------------------------------------------------------------------

/// The figures that can be built from a result directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    YGivenX,
    XGivenY,
    Combined,
    JointDistribution,
    Weights,
}

impl PlotKind {
    pub const ALL: [PlotKind; 5] = [
        PlotKind::YGivenX,
        PlotKind::XGivenY,
        PlotKind::Combined,
        PlotKind::JointDistribution,
        PlotKind::Weights,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PlotKind::YGivenX => "Y given X",
            PlotKind::XGivenY => "X given Y",
            PlotKind::Combined => "Y|X and X|Y",
            PlotKind::JointDistribution => "Joint distribution",
            PlotKind::Weights => "MLE weights",
        }
    }

    /// Artifacts that must exist before any of them is parsed.
    pub fn required_artifacts(self) -> Vec<Artifact> {
        use Artifact::*;
        let common = [AxesLabels, Observations, XBounds, YBounds];
        let direction = |dir: Direction| {
            vec![
                dir.grid(),
                Curve(dir, CurvePart::Estimate),
                Curve(dir, CurvePart::Upper),
                Curve(dir, CurvePart::Lower),
                Bootstrap(dir),
            ]
        };
        match self {
            PlotKind::YGivenX => {
                let mut v = common.to_vec();
                v.extend(direction(Direction::YGivenX));
                v.push(WeightsBoot);
                v
            }
            PlotKind::XGivenY => {
                let mut v = common.to_vec();
                v.extend(direction(Direction::XGivenY));
                v.push(WeightsBoot);
                v
            }
            PlotKind::Combined => {
                let mut v = common.to_vec();
                v.extend(direction(Direction::YGivenX));
                v.extend(direction(Direction::XGivenY));
                v.push(WeightsBoot);
                v
            }
            PlotKind::JointDistribution => {
                let mut v = common.to_vec();
                v.extend([XPoints, YPoints, JointDistribution]);
                v
            }
            PlotKind::Weights => vec![Weights],
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_paths_follow_direction_stem() {
        assert_eq!(
            Artifact::Curve(Direction::YGivenX, CurvePart::Upper).relative_path(),
            PathBuf::from("output/Y_cond_X_upper.txt")
        );
        assert_eq!(
            Artifact::Bootstrap(Direction::XGivenY).relative_path(),
            PathBuf::from("output/X_cond_Y_boot.txt")
        );
    }

    #[test]
    fn complete_directory_has_seventeen_files() {
        assert_eq!(Artifact::all().len(), 17);
    }

    #[test]
    fn weights_plot_needs_only_weights() {
        assert_eq!(PlotKind::Weights.required_artifacts(), vec![Artifact::Weights]);
    }
}
