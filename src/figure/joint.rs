use std::path::Path;

use super::{Artist, Axes, Colorbar, ErrorBars, Figure, Heatmap, Limits, TickFormat};
use crate::color::{self, ColorMapKind};
use crate::data::error::{ArtifactError, Result};
use crate::data::loader::ResultLoader;
use crate::data::schema::{Artifact, PlotKind};
use crate::style::PlotStyle;

use super::conditional::{Common, ERRORBAR_WIDTH, MARKER_SIZE};

/// Joint density of (log X, log Y) with the observations on top.
///
/// Axes hold log10 values; tick labels show the linear value, rounded to
/// three decimals on X and two on Y. The colorbar only marks Min and Max.
pub fn plot_joint_xy_distribution(result_dir: &Path, style: &PlotStyle) -> Result<Figure> {
    let loader = ResultLoader::new(result_dir);
    loader.require(PlotKind::JointDistribution)?;

    let common = Common::load(&loader)?;
    let x_points = loader.points(Artifact::XPoints)?;
    let y_points = loader.points(Artifact::YPoints)?;
    let joint = loader.joint_distribution()?;

    let grid = &joint.density;
    // Rows run along the Y grid, columns along the X grid.
    if grid.rows != y_points.len() || grid.cols != x_points.len() {
        return Err(ArtifactError::shape(
            Artifact::JointDistribution.to_string(),
            format!("{}x{}", y_points.len(), x_points.len()),
            format!("{}x{}", grid.rows, grid.cols),
        ));
    }
    if grid.values.iter().any(|v| !v.is_finite()) {
        return Err(ArtifactError::malformed(
            &loader.path(Artifact::JointDistribution),
            "density contains non-finite values",
        ));
    }

    let log_obs = common.observations.to_log10();
    let (lo, hi) = joint.range();
    let (xb, yb) = (common.x_bounds, common.y_bounds);

    let mut axes = Axes {
        x_label: common.labels.x_label.clone(),
        y_label: common.labels.y_label.clone(),
        x_limits: Some(Limits::new(xb.min, xb.max)),
        y_limits: Some(Limits::new(yb.min, yb.max)),
        x_ticks: TickFormat::PowerOfTen { decimals: 3 },
        y_ticks: TickFormat::PowerOfTen { decimals: 2 },
        ..Axes::default()
    };
    axes.push(Artist::Heatmap(Heatmap {
        grid: joint.density,
        extent: [xb.min, xb.max, yb.min, yb.max],
        colormap: ColorMapKind::Coolwarm,
        lower_origin: true,
    }));
    axes.push(Artist::ErrorBars(ErrorBars {
        x: log_obs.x,
        y: log_obs.y,
        x_err: log_obs.x_sigma,
        y_err: log_obs.y_sigma,
        color: color::BLACK,
        marker_size: MARKER_SIZE,
        line_width: ERRORBAR_WIDTH,
    }));

    log::info!(
        "built joint distribution figure from {}",
        result_dir.display()
    );

    Ok(Figure {
        kind: PlotKind::JointDistribution,
        axes,
        colorbar: Some(Colorbar {
            colormap: ColorMapKind::Coolwarm,
            range: (lo, hi),
            ticks: vec![(lo, "Min".to_string()), (hi, "Max".to_string())],
        }),
        style: style.with_figure_size(8.5, 6.5),
    })
}
