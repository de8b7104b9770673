//! Tests for reading a result directory.
//!
//! ## Test Organization
//!
//! 1. **Inventory** - artifact presence and early failure
//! 2. **Parsed artifacts** - shapes of curves, replicates and weights
//! 3. **Observations** - the csv table and its log10 conversion

mod common;

use approx::assert_relative_eq;

use mrexo_viewer::data::loader::ResultLoader;
use mrexo_viewer::data::quantile::{QuantileBand, BAND_PROBS};
use mrexo_viewer::data::schema::{Artifact, Direction};
use mrexo_viewer::{ArtifactError, PlotKind};

use common::{scratch_dir, synthetic_dir};

// ============================================================================
// Inventory
// ============================================================================

#[test]
fn test_inventory_complete() {
    let dir = synthetic_dir("inventory");
    let loader = ResultLoader::new(&dir);
    assert_eq!(loader.root(), dir.as_path());
    assert!(loader.path(Artifact::Weights).starts_with(&dir));

    let inventory = loader.inventory();
    assert_eq!(inventory.len(), Artifact::all().len());
    assert!(inventory.iter().all(|(_, present)| *present));
    for kind in PlotKind::ALL {
        loader.require(kind).unwrap();
    }
}

#[test]
fn test_empty_directory_reports_first_missing() {
    let dir = scratch_dir("empty");
    let loader = ResultLoader::new(&dir);

    assert!(loader.inventory().iter().all(|(_, present)| !*present));
    let err = loader.require(PlotKind::Weights).unwrap_err();
    assert!(matches!(err, ArtifactError::MissingArtifact { .. }));
}

// ============================================================================
// Parsed artifacts
// ============================================================================

#[test]
fn test_curve_and_bootstrap_shapes() {
    let dir = synthetic_dir("shapes");
    let loader = ResultLoader::new(&dir);

    let curve = loader.curve(Direction::YGivenX).unwrap();
    assert_eq!(curve.len(), 30);
    let ens = loader.bootstrap(Direction::YGivenX, curve.len()).unwrap();
    assert_eq!(ens.n_boot(), 50);
    assert_eq!(ens.n_points(), 30);

    let shape = loader.bootstrap_weights().unwrap();
    assert_eq!(shape.n_boot, 50);
    assert_eq!(shape.degree(), 12);
}

/// The bootstrap band brackets the replicate median at every grid point.
#[test]
fn test_bootstrap_band_brackets_estimate() {
    let dir = synthetic_dir("band");
    let loader = ResultLoader::new(&dir);

    let ens = loader.bootstrap(Direction::XGivenY, 30).unwrap();
    let band = QuantileBand::from_ensemble(&ens, BAND_PROBS, Default::default()).unwrap();
    assert_eq!(band.lower.len(), 30);
    for j in 0..30 {
        assert!(band.lower[j] <= band.upper[j]);
        let mut col = ens.column(j);
        col.sort_by(|a, b| a.total_cmp(b));
        assert!(band.lower[j] >= col[0] && band.upper[j] <= col[col.len() - 1]);
    }
}

/// A single-column bootstrap file is one replicate.
#[test]
fn test_single_replicate_column() {
    let dir = synthetic_dir("one-replicate");
    let column: Vec<f64> = (0..30).map(|i| 0.05 * i as f64).collect();
    let text: String = column.iter().map(|v| format!("{v}\n")).collect();
    std::fs::write(Artifact::Bootstrap(Direction::YGivenX).path_in(&dir), text).unwrap();

    let ens = ResultLoader::new(&dir)
        .bootstrap(Direction::YGivenX, 30)
        .unwrap();
    assert_eq!(ens.n_boot(), 1);
    assert_eq!(ens.n_points(), 30);

    let band = QuantileBand::sigma_band(&ens).unwrap();
    for (j, v) in column.iter().enumerate() {
        assert_relative_eq!(band.lower[j], *v, epsilon = 1e-12);
        assert_relative_eq!(band.upper[j], *v, epsilon = 1e-12);
    }
}

#[test]
fn test_bootstrap_length_mismatch() {
    let dir = synthetic_dir("boot-mismatch");
    let loader = ResultLoader::new(&dir);

    let err = loader.bootstrap(Direction::YGivenX, 31).unwrap_err();
    assert!(matches!(err, ArtifactError::ShapeMismatch { .. }));
}

#[test]
fn test_truncated_upper_curve() {
    let dir = synthetic_dir("short-upper");
    std::fs::write(
        Artifact::Curve(Direction::YGivenX, mrexo_viewer::data::schema::CurvePart::Upper)
            .path_in(&dir),
        "0.1\n0.2\n",
    )
    .unwrap();

    let err = ResultLoader::new(&dir).curve(Direction::YGivenX).unwrap_err();
    assert!(matches!(err, ArtifactError::ShapeMismatch { .. }));
}

#[test]
fn test_bounds() {
    let dir = synthetic_dir("bounds");
    let (x, y) = ResultLoader::new(&dir).bounds().unwrap();
    assert_relative_eq!(x.min, 0.0);
    assert_relative_eq!(x.max, 1.0);
    assert_relative_eq!(y.max, 2.0);
}

// ============================================================================
// Observations
// ============================================================================

#[test]
fn test_observations_and_labels() {
    let dir = synthetic_dir("observations");
    let loader = ResultLoader::new(&dir);

    let labels = loader.labels().unwrap();
    assert_eq!(labels.x_char, "m");
    assert_eq!(labels.y_char, "r");
    assert_eq!(labels.x_label, "Mass ($M_{\\oplus}$)");

    let obs = loader.observations(&labels).unwrap();
    assert_eq!(obs.len(), 20);

    let log = obs.to_log10();
    for i in 0..obs.len() {
        assert_relative_eq!(log.x[i], obs.x[i].log10(), epsilon = 1e-12);
        assert_relative_eq!(
            log.y_sigma[i],
            0.434 * obs.y_sigma[i] / obs.y[i],
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_observations_wrong_column_count() {
    let dir = synthetic_dir("obs-columns");
    std::fs::write(Artifact::Observations.path_in(&dir), "m,m_sigma,r\n1,0.1,2\n").unwrap();
    let loader = ResultLoader::new(&dir);
    let labels = loader.labels().unwrap();

    assert!(loader.observations(&labels).is_err());
}
