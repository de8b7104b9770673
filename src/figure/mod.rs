//! Figure layer: a backend-independent description of each plot.
//!
//! ```text
//!   ResultLoader ──► builders (conditional / combined / joint / weights)
//!                          │
//!                          ▼
//!                 Figure { axes, colorbar, style }
//!                          │
//!                          ▼
//!                  ui::plot (egui_plot)
//! ```
//!
//! Builders read every artifact before constructing anything, so a failing
//! call never yields a partial figure.
pub mod combined;
pub mod conditional;
pub mod joint;
pub mod weights;

use eframe::egui::Color32;

use crate::color::ColorMapKind;
use crate::data::error::Result;
use crate::data::schema::PlotKind;
use crate::style::PlotStyle;

pub use combined::plot_yx_and_xy;
pub use conditional::{plot_x_given_y_relation, plot_y_given_x_relation};
pub use joint::plot_joint_xy_distribution;
pub use weights::plot_mle_weights;

// ---------------------------------------------------------------------------
// Axes description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Log10,
}

/// Closed axis range in data units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// How tick values are printed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickFormat {
    Auto,
    /// The axis holds log10 values; labels show `10^v` rounded to `decimals`.
    PowerOfTen { decimals: usize },
    /// Integer ticks at 0, 1, …, `count - 1`.
    Integers { count: usize },
}

impl TickFormat {
    pub fn label(&self, value: f64) -> String {
        match *self {
            TickFormat::Auto => format_auto(value),
            TickFormat::PowerOfTen { decimals } => {
                trim_zeros(format!("{:.decimals$}", 10f64.powf(value)))
            }
            TickFormat::Integers { .. } => format!("{}", value.round() as i64),
        }
    }
}

/// Short label: fixed point in a readable range, scientific outside it.
pub fn format_auto(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let a = v.abs();
    if !(1e-3..1e5).contains(&a) {
        format!("{v:.0e}")
    } else {
        trim_zeros(format!("{v:.4}"))
    }
}

/// `v` with `digits` significant digits, scientific for very small or large
/// magnitudes.
pub fn format_significant(v: f64, digits: usize) -> String {
    if v == 0.0 || !v.is_finite() {
        return format!("{v}");
    }
    let digits = digits.max(1);
    let exponent = v.abs().log10().floor() as i32;
    if (-4..5).contains(&exponent) {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(format!("{v:.decimals$}"))
    } else {
        format!("{v:.prec$e}", prec = digits - 1)
    }
}

fn trim_zeros(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// Artists
// ---------------------------------------------------------------------------

/// Scatter with symmetric 1-sigma error bars.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBars {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub x_err: Vec<f64>,
    pub y_err: Vec<f64>,
    pub color: Color32,
    pub marker_size: f32,
    pub line_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Color32,
    pub width: f32,
    pub label: Option<String>,
}

/// Which axis a band is filled along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOrientation {
    /// `along` is x; the band spans `lower..upper` in y.
    Horizontal,
    /// `along` is y; the band spans `lower..upper` in x.
    Vertical,
}

/// A shaded region between two curves sharing one abscissa.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub along: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub orientation: FillOrientation,
    pub color: Color32,
    pub alpha: f32,
    pub label: Option<String>,
}

impl Band {
    /// Vertices of each segment's quadrilateral in (x, y) order.
    pub fn quads(&self) -> Vec<[[f64; 2]; 4]> {
        let xy = |a: f64, v: f64| match self.orientation {
            FillOrientation::Horizontal => [a, v],
            FillOrientation::Vertical => [v, a],
        };
        self.along
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                [
                    xy(w[0], self.lower[i]),
                    xy(w[1], self.lower[i + 1]),
                    xy(w[1], self.upper[i + 1]),
                    xy(w[0], self.upper[i]),
                ]
            })
            .collect()
    }
}

/// A grid painted over a rectangle of data space.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub grid: crate::data::text::NumericArray,
    /// `[x_min, x_max, y_min, y_max]`.
    pub extent: [f64; 4],
    pub colormap: ColorMapKind,
    /// Grid row 0 at the bottom of the extent.
    pub lower_origin: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    ErrorBars(ErrorBars),
    Line(LineSeries),
    Band(Band),
    Heatmap(Heatmap),
}

// ---------------------------------------------------------------------------
// Legend, colorbar, axes, figure
// ---------------------------------------------------------------------------

/// A legend entry independent of the artist it describes.
#[derive(Debug, Clone, PartialEq)]
pub enum LegendHandle {
    Line {
        label: String,
        color: Color32,
        width: f32,
    },
    Patch {
        label: String,
        color: Color32,
        alpha: f32,
    },
}

impl LegendHandle {
    pub fn label(&self) -> &str {
        match self {
            LegendHandle::Line { label, .. } | LegendHandle::Patch { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub colormap: ColorMapKind,
    pub range: (f64, f64),
    pub ticks: Vec<(f64, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: Scale,
    pub y_scale: Scale,
    pub x_limits: Option<Limits>,
    pub y_limits: Option<Limits>,
    pub x_ticks: TickFormat,
    pub y_ticks: TickFormat,
    pub artists: Vec<Artist>,
    pub legend: Vec<LegendHandle>,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            title: None,
            x_label: String::new(),
            y_label: String::new(),
            x_scale: Scale::Linear,
            y_scale: Scale::Linear,
            x_limits: None,
            y_limits: None,
            x_ticks: TickFormat::Auto,
            y_ticks: TickFormat::Auto,
            artists: Vec::new(),
            legend: Vec::new(),
        }
    }
}

impl Axes {
    /// Axes with both scales logarithmic.
    pub fn log_log() -> Self {
        Self {
            x_scale: Scale::Log10,
            y_scale: Scale::Log10,
            ..Self::default()
        }
    }

    pub fn push(&mut self, artist: Artist) {
        self.artists.push(artist);
    }
}

/// A single-axes figure and everything needed to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub kind: PlotKind,
    pub axes: Axes,
    pub colorbar: Option<Colorbar>,
    pub style: PlotStyle,
}

impl Figure {
    pub fn legend(&self) -> &[LegendHandle] {
        &self.axes.legend
    }
}

/// Build the figure of `kind` from `result_dir`.
pub fn build(kind: PlotKind, result_dir: &std::path::Path, style: &PlotStyle) -> Result<Figure> {
    match kind {
        PlotKind::YGivenX => plot_y_given_x_relation(result_dir, style),
        PlotKind::XGivenY => plot_x_given_y_relation(result_dir, style),
        PlotKind::Combined => plot_yx_and_xy(result_dir, style),
        PlotKind::JointDistribution => plot_joint_xy_distribution(result_dir, style),
        PlotKind::Weights => plot_mle_weights(result_dir, style),
    }
}

/// `10^v` for every value.
pub(crate) fn exp10(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| 10f64.powf(*v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_ten_ticks_round() {
        let x = TickFormat::PowerOfTen { decimals: 3 };
        assert_eq!(x.label(0.0), "1");
        assert_eq!(x.label(-1.0), "0.1");
        assert_eq!(x.label(0.5), "3.162");
        let y = TickFormat::PowerOfTen { decimals: 2 };
        assert_eq!(y.label(0.5), "3.16");
    }

    #[test]
    fn power_of_ten_ticks_stay_fixed_point() {
        let x = TickFormat::PowerOfTen { decimals: 3 };
        assert_eq!(x.label(5.3), "199526.231");
        assert_eq!(x.label(6.0), "1000000");
        assert_eq!(x.label(-5.0), "0");
        let y = TickFormat::PowerOfTen { decimals: 2 };
        assert_eq!(y.label(5.3), "199526.23");
    }

    #[test]
    fn significant_digits() {
        assert_eq!(format_significant(0.0, 3), "0");
        assert_eq!(format_significant(0.012345, 3), "0.0123");
        assert_eq!(format_significant(0.00034567, 3), "0.000346");
        assert_eq!(format_significant(1.5e-7, 3), "1.50e-7");
        assert_eq!(format_significant(12.0, 3), "12");
    }

    #[test]
    fn auto_labels_switch_to_scientific() {
        assert_eq!(format_auto(0.25), "0.25");
        assert_eq!(format_auto(0.0004), "4e-4");
        assert_eq!(format_auto(300000.0), "3e5");
    }

    #[test]
    fn integer_ticks() {
        assert_eq!(TickFormat::Integers { count: 4 }.label(2.0000001), "2");
    }

    #[test]
    fn vertical_band_swaps_coordinates() {
        let band = Band {
            along: vec![0.0, 1.0],
            lower: vec![10.0, 11.0],
            upper: vec![20.0, 21.0],
            orientation: FillOrientation::Vertical,
            color: Color32::BLUE,
            alpha: 0.3,
            label: None,
        };
        let quads = band.quads();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0][0], [10.0, 0.0]);
        assert_eq!(quads[0][2], [21.0, 1.0]);
    }
}
