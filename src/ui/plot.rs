use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, TextureOptions, Ui};
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotImage, PlotPoint, PlotPoints, PlotUi, Points, Polygon};

use crate::color::{rasterize, with_alpha};
use crate::figure::{Artist, Axes, Band, Colorbar, ErrorBars, Heatmap, LineSeries, Scale, TickFormat};
use crate::state::AppState;
use crate::tex;

const COLORBAR_WIDTH: f32 = 18.0;
const COLORBAR_GUTTER: f32 = 70.0;

// ---------------------------------------------------------------------------
// Axis transforms
// ---------------------------------------------------------------------------

/// Data → plot coordinates. Log axes are drawn in log10 space.
fn to_plot(scale: Scale, v: f64) -> f64 {
    match scale {
        Scale::Linear => v,
        Scale::Log10 => v.log10(),
    }
}

fn tick_label(scale: Scale, format: TickFormat, value: f64) -> String {
    match (scale, format) {
        (Scale::Log10, _) => TickFormat::Auto.label(10f64.powf(value)),
        (Scale::Linear, TickFormat::Integers { count }) => {
            let rounded = value.round();
            if (value - rounded).abs() > 1e-6 || rounded < 0.0 || rounded >= count as f64 {
                String::new()
            } else {
                format.label(value)
            }
        }
        (Scale::Linear, f) => f.label(value),
    }
}

// ---------------------------------------------------------------------------
// Figure view (central panel)
// ---------------------------------------------------------------------------

/// Render the current figure in the central panel.
pub fn figure_view(ui: &mut Ui, state: &mut AppState) {
    let reset = std::mem::take(&mut state.reset_view);

    let Some(figure) = &state.figure else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a result directory to view figures  (File → Open…)");
        });
        return;
    };

    // Upload the heatmap once per figure.
    let heatmap = figure.axes.artists.iter().find_map(|a| match a {
        Artist::Heatmap(h) => Some(h),
        _ => None,
    });
    if let (Some(h), None) = (heatmap, &state.heatmap_texture) {
        let img = rasterize(&h.grid, h.colormap, h.lower_origin);
        let size = [img.width() as usize, img.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
        state.heatmap_texture =
            Some(ui.ctx().load_texture("heatmap", color_image, TextureOptions::NEAREST));
    }
    let texture_id = state.heatmap_texture.as_ref().map(|t| t.id());

    let style = &figure.style;
    let axes = &figure.axes;

    if let Some(title) = &axes.title {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(tex::display(title, style.tex_labels)).size(style.title_size));
        });
    }

    let gutter = if figure.colorbar.is_some() {
        COLORBAR_GUTTER
    } else {
        0.0
    };
    let aspect = style.figure_size[0] / style.figure_size[1].max(f32::EPSILON);
    let avail = ui.available_size();
    let width = (avail.x - gutter).min(avail.y * aspect).max(100.0);
    let height = width / aspect;

    ui.horizontal(|ui: &mut Ui| {
        axes_plot(ui, axes, figure.kind, style, reset, texture_id, width, height);
        if let Some(cb) = &figure.colorbar {
            colorbar(ui, cb, style.tick_size * 0.7, height);
        }
    });
}

#[allow(clippy::too_many_arguments)]
fn axes_plot(
    ui: &mut Ui,
    axes: &Axes,
    kind: crate::data::schema::PlotKind,
    style: &crate::style::PlotStyle,
    reset: bool,
    texture_id: Option<egui::TextureId>,
    width: f32,
    height: f32,
) {
    let (xs, ys) = (axes.x_scale, axes.y_scale);
    let (xt, yt) = (axes.x_ticks, axes.y_ticks);
    let tex_labels = style.tex_labels;

    let mut plot = Plot::new(("figure", kind))
        .width(width)
        .height(height)
        .x_axis_label(RichText::new(tex::display(&axes.x_label, tex_labels)).size(style.label_size))
        .y_axis_label(RichText::new(tex::display(&axes.y_label, tex_labels)).size(style.label_size))
        .x_axis_formatter(move |mark, _range| tick_label(xs, xt, mark.value))
        .y_axis_formatter(move |mark, _range| tick_label(ys, yt, mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if !axes.legend.is_empty() {
        plot = plot.legend(Legend::default().position(egui_plot::Corner::LeftTop));
    }

    plot.show(ui, |plot_ui| {
        if reset {
            if let (Some(xl), Some(yl)) = (axes.x_limits, axes.y_limits) {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [to_plot(xs, xl.min), to_plot(ys, yl.min)],
                    [to_plot(xs, xl.max), to_plot(ys, yl.max)],
                ));
            }
        }

        for artist in &axes.artists {
            match artist {
                Artist::Heatmap(h) => {
                    if let Some(id) = texture_id {
                        draw_heatmap(plot_ui, h, xs, ys, id);
                    }
                }
                Artist::Band(b) => draw_band(plot_ui, b, xs, ys),
                Artist::Line(l) => draw_line(plot_ui, l, xs, ys),
                Artist::ErrorBars(e) => draw_error_bars(plot_ui, e, xs, ys),
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Artists
// ---------------------------------------------------------------------------

fn draw_line(plot_ui: &mut PlotUi, l: &LineSeries, xs: Scale, ys: Scale) {
    let points: PlotPoints = l
        .x
        .iter()
        .zip(&l.y)
        .map(|(&x, &y)| [to_plot(xs, x), to_plot(ys, y)])
        .collect();
    let mut line = Line::new(points).color(l.color).width(l.width);
    if let Some(label) = &l.label {
        line = line.name(label);
    }
    plot_ui.line(line);
}

/// Bands are drawn segment by segment: egui fills convex shapes only.
fn draw_band(plot_ui: &mut PlotUi, b: &Band, xs: Scale, ys: Scale) {
    let fill = with_alpha(b.color, b.alpha);
    for quad in b.quads() {
        let points: Vec<[f64; 2]> = quad
            .iter()
            .map(|[x, y]| [to_plot(xs, *x), to_plot(ys, *y)])
            .collect();
        let mut polygon = Polygon::new(PlotPoints::new(points))
            .fill_color(fill)
            .stroke(Stroke::NONE);
        if let Some(label) = &b.label {
            polygon = polygon.name(label);
        }
        plot_ui.polygon(polygon);
    }
}

fn draw_error_bars(plot_ui: &mut PlotUi, e: &ErrorBars, xs: Scale, ys: Scale) {
    // On log axes a bar reaching zero or below is clipped.
    let span = |scale: Scale, v: f64, err: f64| {
        let lo = match scale {
            Scale::Log10 if v - err <= 0.0 => v * 1e-3,
            _ => v - err,
        };
        (to_plot(scale, lo), to_plot(scale, v + err))
    };
    let stroke_width = e.line_width.max(0.5);

    for i in 0..e.x.len() {
        let (x, y) = (to_plot(xs, e.x[i]), to_plot(ys, e.y[i]));
        let (x0, x1) = span(xs, e.x[i], e.x_err[i]);
        let (y0, y1) = span(ys, e.y[i], e.y_err[i]);
        plot_ui.line(
            Line::new(PlotPoints::new(vec![[x0, y], [x1, y]]))
                .color(e.color)
                .width(stroke_width),
        );
        plot_ui.line(
            Line::new(PlotPoints::new(vec![[x, y0], [x, y1]]))
                .color(e.color)
                .width(stroke_width),
        );
    }

    let centers: PlotPoints = e
        .x
        .iter()
        .zip(&e.y)
        .map(|(&x, &y)| [to_plot(xs, x), to_plot(ys, y)])
        .collect();
    plot_ui.points(
        Points::new(centers)
            .radius(e.marker_size / 2.0)
            .color(e.color),
    );
}

fn draw_heatmap(plot_ui: &mut PlotUi, h: &Heatmap, xs: Scale, ys: Scale, texture: egui::TextureId) {
    let [x0, x1, y0, y1] = h.extent;
    let (x0, x1) = (to_plot(xs, x0), to_plot(xs, x1));
    let (y0, y1) = (to_plot(ys, y0), to_plot(ys, y1));
    let center = PlotPoint::new((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    let size = egui::vec2((x1 - x0).abs() as f32, (y1 - y0).abs() as f32);
    plot_ui.image(PlotImage::new(texture, center, size));
}

// ---------------------------------------------------------------------------
// Colorbar
// ---------------------------------------------------------------------------

fn colorbar(ui: &mut Ui, cb: &Colorbar, font_size: f32, height: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(COLORBAR_GUTTER, height), Sense::hover());
    let painter = ui.painter_at(rect);
    let bar = egui::Rect::from_min_size(
        rect.min + egui::vec2(4.0, 0.0),
        egui::vec2(COLORBAR_WIDTH, rect.height()),
    );

    let steps = 64;
    let colors = cb.colormap.gradient(steps);
    let step_h = bar.height() / steps as f32;
    for (i, c) in colors.iter().enumerate() {
        // Low values at the bottom.
        let top = bar.bottom() - (i as f32 + 1.0) * step_h;
        let strip = egui::Rect::from_min_size(
            egui::pos2(bar.left(), top),
            egui::vec2(bar.width(), step_h + 0.5),
        );
        painter.rect_filled(strip, 0.0, *c);
    }

    let (lo, hi) = cb.range;
    let span = hi - lo;
    for (value, label) in &cb.ticks {
        let t = if span > 0.0 { ((value - lo) / span) as f32 } else { 0.5 };
        let y = bar.bottom() - t * bar.height();
        painter.line_segment(
            [egui::pos2(bar.right(), y), egui::pos2(bar.right() + 4.0, y)],
            Stroke::new(1.0, ui.visuals().text_color()),
        );
        painter.text(
            egui::pos2(bar.right() + 6.0, y),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(font_size),
            ui.visuals().text_color(),
        );
    }
    painter.rect_stroke(bar, 0.0, Stroke::new(1.0, Color32::GRAY), egui::StrokeKind::Inside);
}
