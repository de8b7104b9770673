use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::tex;

const ROW_HEIGHT: f32 = 18.0;

/// The observation table read from `input/XY_inputs.csv`.
pub fn observation_table(ui: &mut Ui, state: &AppState) {
    let Some((labels, obs)) = &state.observations else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No observations loaded.");
        });
        return;
    };

    ui.label(format!("{} observations", obs.len()));
    ui.separator();

    let tex_labels = state.style.tex_labels;
    let headers = [
        tex::display(&labels.x_char, tex_labels),
        format!("σ {}", tex::display(&labels.x_char, tex_labels)),
        tex::display(&labels.y_char, tex_labels),
        format!("σ {}", tex::display(&labels.y_char, tex_labels)),
    ];
    let columns = [&obs.x, &obs.x_sigma, &obs.y, &obs.y_sigma];

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(40.0))
        .columns(Column::remainder().at_least(80.0), columns.len())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("#");
            });
            for h in &headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, obs.len(), |mut row| {
                let i = row.index();
                row.col(|ui: &mut Ui| {
                    ui.label(i.to_string());
                });
                for col in columns {
                    row.col(|ui: &mut Ui| {
                        ui.label(RichText::new(format!("{:.6}", col[i])).monospace());
                    });
                }
            });
        });
}
