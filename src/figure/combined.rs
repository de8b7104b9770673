use std::path::Path;

use super::conditional::{observation_scatter, title, Common, DirectionData};
use super::{Axes, Figure, Limits};
use crate::data::error::Result;
use crate::data::loader::ResultLoader;
use crate::data::schema::{Direction, PlotKind};
use crate::style::PlotStyle;

/// f(Y|X) and f(X|Y) on one log-log axes.
///
/// The X|Y curve is drawn with the Y grid vertical and its bands filled
/// across it, so both relations share the X-horizontal orientation.
pub fn plot_yx_and_xy(result_dir: &Path, style: &PlotStyle) -> Result<Figure> {
    let loader = ResultLoader::new(result_dir);
    loader.require(PlotKind::Combined)?;

    let common = Common::load(&loader)?;
    let yx = DirectionData::load(&loader, Direction::YGivenX, style)?;
    let xy = DirectionData::load(&loader, Direction::XGivenY, style)?;
    let shape = loader.bootstrap_weights()?;
    yx.check_bounds(&common);
    xy.check_bounds(&common);

    let mut axes = Axes::log_log();
    axes.title = Some(title(&common.labels, Direction::YGivenX, &shape));
    axes.x_label = common.labels.x_label.clone();
    axes.y_label = common.labels.y_label.clone();
    let (x_min, x_max) = common.x_bounds.exp10();
    let (y_min, y_max) = common.y_bounds.exp10();
    axes.x_limits = Some(Limits::new(x_min, x_max));
    axes.y_limits = Some(Limits::new(y_min, y_max));

    axes.push(observation_scatter(&common.observations, false));
    for (data, transpose) in [(&yx, false), (&xy, true)] {
        let (artists, handles) = data.artists(&common.labels, transpose);
        axes.artists.extend(artists);
        axes.legend.extend(handles);
    }

    log::info!(
        "built combined figure from {} ({} observations)",
        result_dir.display(),
        common.observations.len()
    );

    Ok(Figure {
        kind: PlotKind::Combined,
        axes,
        colorbar: None,
        style: style.clone(),
    })
}
