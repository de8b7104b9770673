use eframe::egui::Color32;
use image::{Rgba, RgbaImage};
use palette::{FromColor, IntoColor, Lab, LinSrgb, Mix, Srgb};
use serde::{Deserialize, Serialize};

use crate::data::text::NumericArray;

// ---------------------------------------------------------------------------
// Named colours used by the regression figures
// ---------------------------------------------------------------------------

pub const MAROON: Color32 = Color32::from_rgb(128, 0, 0);
pub const LIGHT_SALMON: Color32 = Color32::from_rgb(255, 160, 122);
pub const RED: Color32 = Color32::from_rgb(255, 0, 0);
pub const MIDNIGHT_BLUE: Color32 = Color32::from_rgb(25, 25, 112);
pub const CORNFLOWER_BLUE: Color32 = Color32::from_rgb(100, 149, 237);
pub const BLUE: Color32 = Color32::from_rgb(0, 0, 255);
pub const BLACK: Color32 = Color32::BLACK;

/// `color` with its alpha replaced, `alpha` in 0..=1.
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

// ---------------------------------------------------------------------------
// Continuous colour maps
// ---------------------------------------------------------------------------

/// Diverging and sequential maps for heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMapKind {
    /// Blue → grey → red, interpolated in Lab.
    Coolwarm,
    /// Purple → teal → yellow, interpolated in linear RGB.
    Viridis,
}

const COOLWARM: [(u8, u8, u8); 3] = [(59, 76, 192), (221, 221, 221), (180, 4, 38)];

const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

impl ColorMapKind {
    /// Colour at `t` in 0..=1 (clamped; NaN maps to the low end).
    pub fn sample(self, t: f64) -> Color32 {
        let t = (if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }) as f32;
        match self {
            ColorMapKind::Coolwarm => {
                let (a, b, f) = segment(&COOLWARM, t);
                let a: Lab = to_srgb(a).into_linear().into_color();
                let b: Lab = to_srgb(b).into_linear().into_color();
                let mixed = LinSrgb::from_color(a.mix(b, f));
                from_srgb(Srgb::from_linear(mixed))
            }
            ColorMapKind::Viridis => {
                let (a, b, f) = segment(&VIRIDIS, t);
                let a = to_srgb(a).into_linear();
                let b = to_srgb(b).into_linear();
                from_srgb(Srgb::from_linear(a.mix(b, f)))
            }
        }
    }

    /// `steps` evenly spaced colours from low to high.
    pub fn gradient(self, steps: usize) -> Vec<Color32> {
        let denom = steps.saturating_sub(1).max(1) as f64;
        (0..steps).map(|i| self.sample(i as f64 / denom)).collect()
    }
}

fn segment(stops: &[(u8, u8, u8)], t: f32) -> ((u8, u8, u8), (u8, u8, u8), f32) {
    let scaled = t * (stops.len() - 1) as f32;
    let i = (scaled.floor() as usize).min(stops.len() - 2);
    (stops[i], stops[i + 1], scaled - i as f32)
}

fn to_srgb((r, g, b): (u8, u8, u8)) -> Srgb {
    Srgb::new(r, g, b).into_format()
}

fn from_srgb(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Rasterization
// ---------------------------------------------------------------------------

/// Paint a grid into an image, normalising to the grid's own min/max.
///
/// With `lower_origin`, grid row 0 ends up at the bottom of the image.
pub fn rasterize(grid: &NumericArray, cmap: ColorMapKind, lower_origin: bool) -> RgbaImage {
    let (lo, hi) = (grid.min(), grid.max());
    let span = hi - lo;
    let width = grid.cols as u32;
    let height = grid.rows as u32;

    RgbaImage::from_fn(width, height, |px, py| {
        let row = if lower_origin {
            grid.rows - 1 - py as usize
        } else {
            py as usize
        };
        let v = grid.values[row * grid.cols + px as usize];
        let t = if span > 0.0 { (v - lo) / span } else { 0.5 };
        let c = cmap.sample(t);
        Rgba([c.r(), c.g(), c.b(), 255])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color32, b: (u8, u8, u8)) -> bool {
        let d = |x: u8, y: u8| (i16::from(x) - i16::from(y)).abs() <= 1;
        d(a.r(), b.0) && d(a.g(), b.1) && d(a.b(), b.2)
    }

    #[test]
    fn colormap_endpoints_hit_the_first_and_last_stop() {
        assert!(close(ColorMapKind::Viridis.sample(0.0), (68, 1, 84)));
        assert!(close(ColorMapKind::Viridis.sample(1.0), (253, 231, 37)));
        assert!(close(ColorMapKind::Coolwarm.sample(0.0), (59, 76, 192)));
        assert!(close(ColorMapKind::Coolwarm.sample(1.0), (180, 4, 38)));
        assert!(close(ColorMapKind::Coolwarm.sample(f64::NAN), (59, 76, 192)));
    }

    #[test]
    fn lower_origin_flips_rows() {
        let grid = NumericArray {
            rows: 2,
            cols: 1,
            values: vec![0.0, 1.0],
        };
        let img = rasterize(&grid, ColorMapKind::Viridis, true);
        // Row 0 (the minimum) is painted at the bottom.
        let [r, g, b, _] = img.get_pixel(0, 1).0;
        assert!(close(Color32::from_rgb(r, g, b), (68, 1, 84)));
        let [r, g, b, _] = img.get_pixel(0, 0).0;
        assert!(close(Color32::from_rgb(r, g, b), (253, 231, 37)));
    }

    #[test]
    fn alpha_is_replaced() {
        assert_eq!(with_alpha(RED, 0.5).a(), 128);
    }
}
