use std::path::{Path, PathBuf};

use super::error::{ArtifactError, Result};
use super::labels::read_labels;
use super::model::{
    BootstrapEnsemble, BootstrapWeights, Bounds, GridCurve, JointDensityGrid, LabelDictionary,
    Observations, WeightMatrix,
};
use super::schema::{Artifact, CurvePart, Direction, PlotKind};
use super::text::{read_numeric, NumericArray};

// ---------------------------------------------------------------------------
// ResultLoader – reads the artifacts of one result directory
// ---------------------------------------------------------------------------

/// Resolves and parses the files of a result directory.
///
/// Nothing is cached: every call reads from disk.
#[derive(Debug, Clone)]
pub struct ResultLoader {
    root: PathBuf,
}

impl ResultLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, artifact: Artifact) -> PathBuf {
        artifact.path_in(&self.root)
    }

    /// Fail with `MissingArtifact` on the first absent file of `kind`'s set.
    pub fn require(&self, kind: PlotKind) -> Result<()> {
        for artifact in kind.required_artifacts() {
            let path = self.path(artifact);
            if !path.is_file() {
                return Err(ArtifactError::MissingArtifact { path });
            }
        }
        Ok(())
    }

    /// Which artifacts of a complete directory are present.
    pub fn inventory(&self) -> Vec<(Artifact, bool)> {
        Artifact::all()
            .into_iter()
            .map(|a| (a, self.path(a).is_file()))
            .collect()
    }

    fn numeric(&self, artifact: Artifact) -> Result<NumericArray> {
        let path = self.path(artifact);
        let arr = read_numeric(&path)?;
        log::debug!("loaded {artifact} ({}x{})", arr.rows, arr.cols);
        Ok(arr)
    }

    fn vector(&self, artifact: Artifact) -> Result<Vec<f64>> {
        let path = self.path(artifact);
        self.numeric(artifact)?.into_vector(&path)
    }

    pub fn labels(&self) -> Result<LabelDictionary> {
        read_labels(&self.path(Artifact::AxesLabels))
    }

    pub fn bounds(&self) -> Result<(Bounds, Bounds)> {
        let x_path = self.path(Artifact::XBounds);
        let y_path = self.path(Artifact::YBounds);
        let x = Bounds::from_array(self.numeric(Artifact::XBounds)?, &x_path)?;
        let y = Bounds::from_array(self.numeric(Artifact::YBounds)?, &y_path)?;
        Ok((x, y))
    }

    pub fn points(&self, artifact: Artifact) -> Result<Vec<f64>> {
        self.vector(artifact)
    }

    /// Curve, upper and lower quantiles of `dir`, checked against the grid.
    pub fn curve(&self, dir: Direction) -> Result<GridCurve> {
        let points = self.vector(dir.grid())?;
        let part = |p: CurvePart| -> Result<Vec<f64>> {
            let artifact = Artifact::Curve(dir, p);
            let values = self.vector(artifact)?;
            check_len(&artifact, points.len(), values.len())?;
            Ok(values)
        };
        let estimate = part(CurvePart::Estimate)?;
        let upper = part(CurvePart::Upper)?;
        let lower = part(CurvePart::Lower)?;
        Ok(GridCurve {
            points,
            estimate,
            upper,
            lower,
        })
    }

    /// Bootstrap replicates of `dir`; each row must span `n_points`.
    pub fn bootstrap(&self, dir: Direction, n_points: usize) -> Result<BootstrapEnsemble> {
        let artifact = Artifact::Bootstrap(dir);
        let mut replicates = self.numeric(artifact)?;
        // A single replicate may be written as a column.
        if replicates.cols == 1 && replicates.rows == n_points {
            replicates.cols = replicates.rows;
            replicates.rows = 1;
        }
        check_len(&artifact, n_points, replicates.cols)?;
        Ok(BootstrapEnsemble { replicates })
    }

    pub fn bootstrap_weights(&self) -> Result<BootstrapWeights> {
        let arr = self.numeric(Artifact::WeightsBoot)?;
        Ok(BootstrapWeights::from_array(&arr))
    }

    pub fn joint_distribution(&self) -> Result<JointDensityGrid> {
        Ok(JointDensityGrid {
            density: self.numeric(Artifact::JointDistribution)?,
        })
    }

    pub fn weights(&self) -> Result<WeightMatrix> {
        WeightMatrix::from_flat(self.vector(Artifact::Weights)?)
    }

    /// The observation table, columns picked by the label dictionary.
    pub fn observations(&self, labels: &LabelDictionary) -> Result<Observations> {
        let path = self.path(Artifact::Observations);
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_path(&path)
            .map_err(|e| csv_error(&path, e))?;
        let headers = reader.headers().map_err(|e| csv_error(&path, e))?.clone();

        let column = |name: String| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ArtifactError::malformed(&path, format!("missing column '{name}'")))
        };
        let idx = [
            column(labels.x_char.clone())?,
            column(format!("{}_sigma", labels.x_char))?,
            column(labels.y_char.clone())?,
            column(format!("{}_sigma", labels.y_char))?,
        ];

        let mut obs = Observations::default();
        for (row_no, record) in reader.records().enumerate() {
            let record = record.map_err(|e| csv_error(&path, e))?;
            let cell = |i: usize| -> Result<f64> {
                let raw = record.get(idx[i]).unwrap_or("");
                raw.parse::<f64>().map_err(|_| {
                    ArtifactError::malformed(
                        &path,
                        format!("row {row_no}, column '{}': '{raw}' is not a number", &headers[idx[i]]),
                    )
                })
            };
            obs.x.push(cell(0)?);
            obs.x_sigma.push(cell(1)?);
            obs.y.push(cell(2)?);
            obs.y_sigma.push(cell(3)?);
        }
        log::debug!("loaded {} observations from {}", obs.len(), path.display());
        Ok(obs)
    }
}

fn check_len(artifact: &Artifact, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(ArtifactError::shape(
            artifact.to_string(),
            format!("{expected} grid points"),
            format!("{found}"),
        ));
    }
    Ok(())
}

fn csv_error(path: &Path, e: csv::Error) -> ArtifactError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => ArtifactError::from_io(path, io),
        other => ArtifactError::malformed(path, format!("{other:?}")),
    }
}

/// Warn when a curve leaves the fitting range.
pub fn warn_outside(bounds: &Bounds, values: &[f64], what: &str) {
    if !bounds.contains_all(values) {
        log::warn!(
            "{what} leaves the bounds [{}, {}]",
            bounds.min,
            bounds.max
        );
    }
}
