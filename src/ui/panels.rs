use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::with_alpha;
use crate::data::quantile::PlottingPositions;
use crate::data::schema::{PlotKind, SCHEMA_VERSION};
use crate::figure::LegendHandle;
use crate::state::AppState;
use crate::tex;

const POSITIONS: [(&str, PlottingPositions); 4] = [
    ("Linear (1, 1)", PlottingPositions::LINEAR),
    ("Weibull (0, 0)", PlottingPositions::WEIBULL),
    ("Empirical CDF (0, 1)", PlottingPositions::EMPIRICAL_CDF),
    ("Hazen (½, ½)", PlottingPositions::HAZEN),
];

// ---------------------------------------------------------------------------
// Left side panel – artifacts, legend, style
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            artifacts_section(ui, state);
            ui.separator();
            legend_section(ui, state);
            ui.separator();
            style_section(ui, state);
        });
}

fn artifacts_section(ui: &mut Ui, state: &AppState) {
    let (present, total) = state.artifact_counts();
    let header = format!("Artifacts  ({present}/{total})");
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("artifacts")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("Layout version {SCHEMA_VERSION}"));
            if state.inventory.is_empty() {
                ui.label("No result directory loaded.");
            }
            for (artifact, ok) in &state.inventory {
                let color = if *ok { Color32::GREEN } else { Color32::RED };
                let mark = if *ok { "✔" } else { "✘" };
                ui.label(RichText::new(format!("{mark} {artifact}")).color(color).monospace());
            }
        });
}

fn legend_section(ui: &mut Ui, state: &AppState) {
    ui.strong("Legend");
    let Some(fig) = &state.figure else {
        ui.label("No figure.");
        return;
    };
    if fig.legend().is_empty() {
        ui.label("This figure has no legend.");
        return;
    }
    for handle in fig.legend() {
        let (color, text) = match handle {
            LegendHandle::Line { color, label, .. } => (*color, label),
            LegendHandle::Patch {
                color,
                alpha,
                label,
            } => (with_alpha(*color, *alpha), label),
        };
        ui.horizontal_wrapped(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 10.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 2.0, color);
            ui.label(
                RichText::new(tex::display(text, fig.style.tex_labels))
                    .size(fig.style.legend_size * 0.8),
            );
        });
    }
}

fn style_section(ui: &mut Ui, state: &mut AppState) {
    let mut style = state.style.clone();

    egui::CollapsingHeader::new(RichText::new("Style").strong())
        .id_salt("style")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.add(egui::Slider::new(&mut style.label_size, 8.0..=32.0).text("Label size"));
            ui.add(egui::Slider::new(&mut style.tick_size, 8.0..=32.0).text("Tick size"));
            ui.add(egui::Slider::new(&mut style.legend_size, 8.0..=32.0).text("Legend size"));
            ui.add(egui::Slider::new(&mut style.title_size, 8.0..=32.0).text("Title size"));
            ui.checkbox(&mut style.tex_labels, "Render TeX in labels");

            ui.label("Bootstrap quantiles");
            let current = POSITIONS
                .iter()
                .find(|(_, p)| *p == style.quantiles)
                .map(|(name, _)| *name)
                .unwrap_or("Custom");
            egui::ComboBox::from_id_salt("quantile_positions")
                .selected_text(current)
                .show_ui(ui, |ui: &mut Ui| {
                    for (name, pos) in POSITIONS {
                        ui.selectable_value(&mut style.quantiles, pos, name);
                    }
                });
        });

    if style != state.style {
        state.set_style(style);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_dir_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.rebuild();
                ui.close_menu();
            }
        });

        ui.separator();

        for kind in PlotKind::ALL {
            if ui.selectable_label(state.kind == kind && !state.show_table, kind.title()).clicked() {
                state.show_table = false;
                state.set_kind(kind);
            }
        }

        ui.separator();

        if ui.selectable_label(state.show_table, "Data").clicked() {
            state.show_table = !state.show_table;
        }
        if ui.button("Reset view").clicked() {
            state.reset_view = true;
        }

        if let Some(dir) = &state.result_dir {
            ui.separator();
            ui.label(dir.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_dir_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Open result directory")
        .pick_folder();

    if let Some(path) = dir {
        log::info!("Opening result directory {}", path.display());
        state.open_dir(&path);
    }
}
