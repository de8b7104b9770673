//! Figures for nonparametric conditional-density regression results.
//!
//! A fitting run leaves a result directory of plain-text artifacts. This
//! crate reads them, summarises the bootstrap replicates and describes the
//! standard figures (`figure::plot_*`), which the desktop viewer draws.

pub mod app;
pub mod color;
pub mod data;
pub mod figure;
pub mod state;
pub mod style;
pub mod synthetic;
pub mod tex;
pub mod ui;

pub use data::error::{ArtifactError, Result};
pub use data::schema::PlotKind;
pub use figure::Figure;
pub use style::PlotStyle;
