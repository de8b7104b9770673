use std::path::{Path, PathBuf};

use eframe::egui::TextureHandle;

use crate::data::loader::ResultLoader;
use crate::data::model::{LabelDictionary, Observations};
use crate::data::schema::{Artifact, PlotKind};
use crate::figure::{self, Figure};
use crate::style::PlotStyle;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Result directory being viewed (None until the user picks one).
    pub result_dir: Option<PathBuf>,

    /// Which figure is shown.
    pub kind: PlotKind,

    /// Style every figure is built with.
    pub style: PlotStyle,

    /// The current figure; None when nothing is loaded or the build failed.
    pub figure: Option<Figure>,

    /// Presence of every artifact of the result directory.
    pub inventory: Vec<(Artifact, bool)>,

    /// Observation table and labels, for the data view.
    pub observations: Option<(LabelDictionary, Observations)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Snap the plot back to the figure's limits on the next frame.
    pub reset_view: bool,

    /// Show the observation table instead of the figure.
    pub show_table: bool,

    /// Texture of the current heatmap, uploaded lazily by the plot view.
    pub heatmap_texture: Option<TextureHandle>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            result_dir: None,
            kind: PlotKind::Combined,
            style: PlotStyle::default(),
            figure: None,
            inventory: Vec::new(),
            observations: None,
            status_message: None,
            reset_view: true,
            show_table: false,
            heatmap_texture: None,
        }
    }
}

impl AppState {
    /// Point the viewer at a new result directory and build the figure.
    pub fn open_dir(&mut self, dir: &Path) {
        let loader = ResultLoader::new(dir);
        self.inventory = loader.inventory();
        self.observations = match loader
            .labels()
            .and_then(|labels| loader.observations(&labels).map(|obs| (labels, obs)))
        {
            Ok(pair) => Some(pair),
            Err(e) => {
                log::warn!("observation table unavailable: {e}");
                None
            }
        };
        self.result_dir = Some(dir.to_path_buf());
        self.rebuild();
    }

    /// Switch the figure kind.
    pub fn set_kind(&mut self, kind: PlotKind) {
        if self.kind != kind {
            self.kind = kind;
            self.rebuild();
        }
    }

    /// Replace the style and rebuild with it.
    pub fn set_style(&mut self, style: PlotStyle) {
        self.style = style;
        self.rebuild();
    }

    /// Re-read the artifacts and rebuild the current figure.
    pub fn rebuild(&mut self) {
        let Some(dir) = &self.result_dir else {
            return;
        };
        self.heatmap_texture = None;
        self.reset_view = true;

        match figure::build(self.kind, dir, &self.style) {
            Ok(fig) => {
                log::info!("showing {} from {}", self.kind, dir.display());
                self.figure = Some(fig);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to build {}: {e}", self.kind);
                self.status_message = Some(format!("Error: {e}"));
                self.figure = None;
            }
        }
    }

    /// Number of artifacts present out of a complete set.
    pub fn artifact_counts(&self) -> (usize, usize) {
        let present = self.inventory.iter().filter(|(_, ok)| *ok).count();
        (present, self.inventory.len())
    }
}
