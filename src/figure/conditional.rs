use std::path::Path;

use eframe::egui::Color32;

use super::{exp10, Artist, Axes, Band, ErrorBars, Figure, FillOrientation, LegendHandle, Limits, LineSeries};
use crate::color;
use crate::data::error::Result;
use crate::data::loader::{warn_outside, ResultLoader};
use crate::data::model::{BootstrapWeights, Bounds, GridCurve, LabelDictionary, Observations};
use crate::data::quantile::{QuantileBand, BAND_PROBS};
use crate::data::schema::{Direction, PlotKind};
use crate::style::PlotStyle;

pub(crate) const BAND_ALPHA: f32 = 0.3;
pub(crate) const CURVE_WIDTH: f32 = 2.0;
pub(crate) const MARKER_SIZE: f32 = 3.0;
pub(crate) const ERRORBAR_WIDTH: f32 = 0.3;

/// Colours of one conditional direction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DirectionPalette {
    pub curve: Color32,
    pub full: Color32,
    pub boot: Color32,
}

pub(crate) const Y_GIVEN_X_PALETTE: DirectionPalette = DirectionPalette {
    curve: color::MAROON,
    full: color::LIGHT_SALMON,
    boot: color::RED,
};

pub(crate) const X_GIVEN_Y_PALETTE: DirectionPalette = DirectionPalette {
    curve: color::MIDNIGHT_BLUE,
    full: color::CORNFLOWER_BLUE,
    boot: color::BLUE,
};

impl Direction {
    pub(crate) fn palette(self) -> DirectionPalette {
        match self {
            Direction::YGivenX => Y_GIVEN_X_PALETTE,
            Direction::XGivenY => X_GIVEN_Y_PALETTE,
        }
    }
}

// ---------------------------------------------------------------------------
// Loaded inputs
// ---------------------------------------------------------------------------

/// Everything shared by the conditional figures.
pub(crate) struct Common {
    pub labels: LabelDictionary,
    pub observations: Observations,
    pub x_bounds: Bounds,
    pub y_bounds: Bounds,
}

impl Common {
    pub fn load(loader: &ResultLoader) -> Result<Self> {
        let labels = loader.labels()?;
        let observations = loader.observations(&labels)?;
        let (x_bounds, y_bounds) = loader.bounds()?;
        Ok(Self {
            labels,
            observations,
            x_bounds,
            y_bounds,
        })
    }
}

/// One direction's curve and its bootstrap band.
pub(crate) struct DirectionData {
    pub dir: Direction,
    pub curve: GridCurve,
    pub boot: QuantileBand,
}

impl DirectionData {
    pub fn load(loader: &ResultLoader, dir: Direction, style: &PlotStyle) -> Result<Self> {
        let curve = loader.curve(dir)?;
        let ensemble = loader.bootstrap(dir, curve.len())?;
        let boot = QuantileBand::from_ensemble(&ensemble, BAND_PROBS, style.quantiles)?;
        Ok(Self { dir, curve, boot })
    }

    /// Warn if the grid or the curve leaves the fitting bounds.
    pub fn check_bounds(&self, common: &Common) {
        let (grid, value) = match self.dir {
            Direction::YGivenX => (&common.x_bounds, &common.y_bounds),
            Direction::XGivenY => (&common.y_bounds, &common.x_bounds),
        };
        warn_outside(grid, &self.curve.points, self.dir.grid().to_string().as_str());
        warn_outside(value, &self.curve.estimate, self.dir.stem());
    }

    /// Curve and bands in linear units.
    ///
    /// `transpose` draws the curve with the grid on the vertical axis and
    /// fills the bands horizontally across it.
    pub fn artists(&self, labels: &LabelDictionary, transpose: bool) -> (Vec<Artist>, Vec<LegendHandle>) {
        let palette = self.dir.palette();
        let f = labels.conditional(self.dir == Direction::YGivenX);
        let along = exp10(&self.curve.points);
        let estimate = exp10(&self.curve.estimate);
        let orientation = if transpose {
            FillOrientation::Vertical
        } else {
            FillOrientation::Horizontal
        };

        let median_label = format!("Median of {f} from full dataset run");
        let full_label = format!("Quantiles of {f} from full dataset run");
        let boot_label = format!("Quantiles of the median of the {f} from bootstrap");

        let (x, y) = if transpose {
            (estimate, along.clone())
        } else {
            (along.clone(), estimate)
        };

        let artists = vec![
            Artist::Line(LineSeries {
                x,
                y,
                color: palette.curve,
                width: CURVE_WIDTH,
                label: Some(median_label.clone()),
            }),
            Artist::Band(Band {
                along: along.clone(),
                lower: exp10(&self.curve.lower),
                upper: exp10(&self.curve.upper),
                orientation,
                color: palette.full,
                alpha: BAND_ALPHA,
                label: Some(full_label.clone()),
            }),
            Artist::Band(Band {
                along,
                lower: exp10(&self.boot.lower),
                upper: exp10(&self.boot.upper),
                orientation,
                color: palette.boot,
                alpha: BAND_ALPHA,
                label: Some(boot_label.clone()),
            }),
        ];

        let handles = vec![
            LegendHandle::Line {
                label: median_label,
                color: palette.curve,
                width: CURVE_WIDTH,
            },
            LegendHandle::Patch {
                label: full_label,
                color: palette.full,
                alpha: BAND_ALPHA,
            },
            LegendHandle::Patch {
                label: boot_label,
                color: palette.boot,
                alpha: BAND_ALPHA,
            },
        ];

        (artists, handles)
    }
}

/// Observations as a linear-unit error-bar scatter; `swap` puts Y on x.
pub(crate) fn observation_scatter(obs: &Observations, swap: bool) -> Artist {
    let (x, y, x_err, y_err) = if swap {
        (&obs.y, &obs.x, &obs.y_sigma, &obs.x_sigma)
    } else {
        (&obs.x, &obs.y, &obs.x_sigma, &obs.y_sigma)
    };
    Artist::ErrorBars(ErrorBars {
        x: x.clone(),
        y: y.clone(),
        x_err: x_err.clone(),
        y_err: y_err.clone(),
        color: color::BLACK,
        marker_size: MARKER_SIZE,
        line_width: ERRORBAR_WIDTH,
    })
}

pub(crate) fn title(labels: &LabelDictionary, dir: Direction, shape: &BootstrapWeights) -> String {
    format!(
        "{} with degree {}, and {} bootstraps",
        labels.conditional(dir == Direction::YGivenX),
        shape.degree(),
        shape.n_boot
    )
}

fn exp_limits(b: &Bounds) -> Option<Limits> {
    let (min, max) = b.exp10();
    Some(Limits::new(min, max))
}

// ---------------------------------------------------------------------------
// Public builders
// ---------------------------------------------------------------------------

/// f(Y|X): observations, median curve, full-dataset and bootstrap bands.
pub fn plot_y_given_x_relation(result_dir: &Path, style: &PlotStyle) -> Result<Figure> {
    conditional_figure(result_dir, style, Direction::YGivenX)
}

/// f(X|Y), drawn with Y on the horizontal axis.
pub fn plot_x_given_y_relation(result_dir: &Path, style: &PlotStyle) -> Result<Figure> {
    conditional_figure(result_dir, style, Direction::XGivenY)
}

fn conditional_figure(result_dir: &Path, style: &PlotStyle, dir: Direction) -> Result<Figure> {
    let kind = match dir {
        Direction::YGivenX => PlotKind::YGivenX,
        Direction::XGivenY => PlotKind::XGivenY,
    };
    let loader = ResultLoader::new(result_dir);
    loader.require(kind)?;

    let common = Common::load(&loader)?;
    let data = DirectionData::load(&loader, dir, style)?;
    let shape = loader.bootstrap_weights()?;
    data.check_bounds(&common);

    let swap = dir == Direction::XGivenY;
    let mut axes = Axes::log_log();
    axes.title = Some(title(&common.labels, dir, &shape));
    if swap {
        axes.x_label = common.labels.y_label.clone();
        axes.y_label = common.labels.x_label.clone();
        axes.x_limits = exp_limits(&common.y_bounds);
        axes.y_limits = exp_limits(&common.x_bounds);
    } else {
        axes.x_label = common.labels.x_label.clone();
        axes.y_label = common.labels.y_label.clone();
        axes.x_limits = exp_limits(&common.x_bounds);
        axes.y_limits = exp_limits(&common.y_bounds);
    }

    axes.push(observation_scatter(&common.observations, swap));
    let (artists, handles) = data.artists(&common.labels, false);
    axes.artists.extend(artists);
    axes.legend = handles;

    log::info!(
        "built {} figure from {} ({} observations, {} grid points)",
        kind,
        result_dir.display(),
        common.observations.len(),
        data.curve.len()
    );

    Ok(Figure {
        kind,
        axes,
        colorbar: None,
        style: style.clone(),
    })
}
