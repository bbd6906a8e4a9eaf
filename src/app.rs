use anyhow::{Result, anyhow};
use eframe::egui;

use crate::constants::{VIEWER_MIN_SIZE, VIEWER_SIZE};
use crate::data::model::Series;
use crate::export::PlotOptions;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AgrViewerApp {
    pub state: AppState,
}

impl AgrViewerApp {
    pub fn new(series: Vec<Series>, options: PlotOptions) -> Self {
        Self {
            state: AppState::new(series, options),
        }
    }
}

impl eframe::App for AgrViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: series toggles ----
        egui::SidePanel::left("series_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::series_plot(ui, &self.state);
        });
    }
}

/// Open a window showing `series` and block until it is closed.
pub fn run_viewer(series: Vec<Series>, options: PlotOptions) -> Result<()> {
    let window_title = format!("{} – agr-plot", options.title);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(window_title.clone())
            .with_inner_size(VIEWER_SIZE)
            .with_min_inner_size(VIEWER_MIN_SIZE),
        ..Default::default()
    };

    log::info!("Opening viewer with {} series", series.len());
    eframe::run_native(
        &window_title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(AgrViewerApp::new(series, options)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
