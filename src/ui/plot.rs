use eframe::egui::{self, Align2, Frame, Order, Rect, RichText, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Series plot (central panel)
// ---------------------------------------------------------------------------

/// Render the title, the plot and the legend overlay in the central panel.
pub fn series_plot(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(state.options.title.as_str());
        if let Some(subtitle) = &state.options.subtitle {
            ui.label(subtitle.as_str());
        }
    });

    let response = Plot::new("series_plot")
        .x_axis_label(state.options.x_label.clone())
        .y_axis_label(state.options.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for idx in state.visible_indices() {
                let s = &state.series[idx];
                let points: PlotPoints = s.points.iter().map(|p| [p.x, p.y]).collect();

                let line = Line::new(points)
                    .name(&s.name)
                    .color(state.colors[idx])
                    .width(1.5);

                plot_ui.line(line);
            }
        });

    legend_overlay(ui, state, response.response.rect);
}

/// egui_plot only places its legend in corners, so the legend is a floating
/// frame pinned by its top-right corner to the requested fraction of `plot_rect`.
fn legend_overlay(ui: &Ui, state: &AppState, plot_rect: Rect) {
    let visible = state.visible_indices();
    if visible.is_empty() {
        return;
    }

    let (dx, dy) = state
        .options
        .legend
        .anchor_px(plot_rect.width() as f64, plot_rect.height() as f64);
    let anchor = plot_rect.min + egui::vec2(dx as f32, dy as f32);

    egui::Area::new(egui::Id::new("series_legend"))
        .order(Order::Foreground)
        .pivot(Align2::RIGHT_TOP)
        .fixed_pos(anchor)
        .interactable(false)
        .show(ui.ctx(), |ui: &mut Ui| {
            Frame::popup(ui.style()).show(ui, |ui: &mut Ui| {
                for idx in visible {
                    let text = format!("━━  {}", state.series[idx].name);
                    ui.label(RichText::new(text).color(state.colors[idx]));
                }
            });
        });
}
