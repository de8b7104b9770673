use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use eframe::egui;

use mrexo_viewer::app::MrexoViewerApp;
use mrexo_viewer::state::AppState;
use mrexo_viewer::{PlotKind, PlotStyle};

#[derive(Parser, Debug)]
#[command(name = "mrexo-viewer", about = "Figures for conditional-density regression results")]
struct Cli {
    /// Result directory holding `input/` and `output/`.
    result_dir: Option<PathBuf>,

    /// Figure to show first.
    #[arg(long, value_enum, default_value_t = PlotArg::Combined)]
    plot: PlotArg,

    /// JSON style file (font sizes, figure size, quantile positions).
    #[arg(long, env = "MREXO_VIEWER_STYLE")]
    style: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PlotArg {
    YGivenX,
    XGivenY,
    Combined,
    Joint,
    Weights,
}

impl From<PlotArg> for PlotKind {
    fn from(arg: PlotArg) -> Self {
        match arg {
            PlotArg::YGivenX => PlotKind::YGivenX,
            PlotArg::XGivenY => PlotKind::XGivenY,
            PlotArg::Combined => PlotKind::Combined,
            PlotArg::Joint => PlotKind::JointDistribution,
            PlotArg::Weights => PlotKind::Weights,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState {
        kind: cli.plot.into(),
        ..AppState::default()
    };
    if let Some(path) = &cli.style {
        state.style = PlotStyle::load(path)?;
        log::info!("loaded style from {}", path.display());
    }
    if let Some(dir) = &cli.result_dir {
        let dir = dir
            .canonicalize()
            .with_context(|| format!("result directory {}", dir.display()))?;
        state.open_dir(&dir);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "mrexo viewer",
        options,
        Box::new(|_cc| Ok(Box::new(MrexoViewerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with an error: {e}"))
}
