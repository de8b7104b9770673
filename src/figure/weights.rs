use std::path::Path;

use super::{format_significant, Artist, Axes, Colorbar, Figure, Heatmap, Limits, TickFormat};
use crate::color::ColorMapKind;
use crate::data::error::Result;
use crate::data::loader::ResultLoader;
use crate::data::schema::PlotKind;
use crate::style::PlotStyle;

/// Number of labelled ticks on the weight colorbar.
const COLORBAR_TICKS: usize = 5;
const TICK_DIGITS: usize = 3;

/// The fitted weights as a `side × side` heatmap, row 0 at the top.
pub fn plot_mle_weights(result_dir: &Path, style: &PlotStyle) -> Result<Figure> {
    let loader = ResultLoader::new(result_dir);
    loader.require(PlotKind::Weights)?;
    let weights = loader.weights()?;
    let side = weights.side;
    let grid = weights.as_array();
    let (lo, hi) = (grid.min(), grid.max());

    let mut axes = Axes {
        title: Some(format!("Polynomial weights with {side} degrees")),
        x_limits: Some(Limits::new(0.0, side as f64)),
        y_limits: Some(Limits::new(0.0, side as f64)),
        x_ticks: TickFormat::Integers { count: side },
        y_ticks: TickFormat::Integers { count: side },
        ..Axes::default()
    };
    axes.push(Artist::Heatmap(Heatmap {
        grid,
        extent: [0.0, side as f64, 0.0, side as f64],
        colormap: ColorMapKind::Viridis,
        lower_origin: false,
    }));

    let ticks = (0..COLORBAR_TICKS)
        .map(|i| {
            let v = lo + (hi - lo) * i as f64 / (COLORBAR_TICKS - 1) as f64;
            (v, format_significant(v, TICK_DIGITS))
        })
        .collect();

    log::info!("built weights figure ({side}x{side}) from {}", result_dir.display());

    Ok(Figure {
        kind: PlotKind::Weights,
        axes,
        colorbar: Some(Colorbar {
            colormap: ColorMapKind::Viridis,
            range: (lo, hi),
            ticks,
        }),
        style: style.clone(),
    })
}
