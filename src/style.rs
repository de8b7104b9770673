use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::quantile::PlottingPositions;

// ---------------------------------------------------------------------------
// PlotStyle – per-figure rendering configuration
// ---------------------------------------------------------------------------

/// Font sizes and text handling for one figure.
///
/// Passed to every plot builder and stored on the figure it returns; nothing
/// here is process-wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Axis title size in points.
    pub label_size: f32,
    /// Tick label size in points.
    pub tick_size: f32,
    /// Legend entry size in points.
    pub legend_size: f32,
    pub title_size: f32,
    /// Render `$…$` TeX fragments in labels as plain text with symbols.
    pub tex_labels: bool,
    /// Figure size in inches, `[width, height]`.
    pub figure_size: [f32; 2],
    /// Plotting positions of the bootstrap quantile band.
    pub quantiles: PlottingPositions,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            label_size: 20.0,
            tick_size: 20.0,
            legend_size: 15.0,
            title_size: 16.0,
            tex_labels: true,
            figure_size: [8.5, 7.0],
            quantiles: PlottingPositions::default(),
        }
    }
}

impl PlotStyle {
    /// Read a style from a JSON file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading style file {}", path.display()))?;
        let style = serde_json::from_str(&text)
            .with_context(|| format!("parsing style file {}", path.display()))?;
        Ok(style)
    }

    /// Same style with a different figure size.
    pub fn with_figure_size(&self, width: f32, height: f32) -> Self {
        Self {
            figure_size: [width, height],
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let style: PlotStyle = serde_json::from_str(r#"{"label_size": 12, "tex_labels": false}"#)
            .unwrap();
        assert_eq!(style.label_size, 12.0);
        assert!(!style.tex_labels);
        assert_eq!(style.legend_size, 15.0);
        assert_eq!(style.quantiles, PlottingPositions::LINEAR);
    }

    #[test]
    fn quantile_positions_are_configurable() {
        let style: PlotStyle =
            serde_json::from_str(r#"{"quantiles": {"alpha": 0.0, "beta": 0.0}}"#).unwrap();
        assert_eq!(style.quantiles, PlottingPositions::WEIBULL);
    }
}
