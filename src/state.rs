use eframe::egui::Color32;

use crate::color::generate_palette;
use crate::data::model::Series;
use crate::export::PlotOptions;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Selected series, in legend order.
    pub series: Vec<Series>,

    /// One colour per series, fixed for the session.
    pub colors: Vec<Color32>,

    /// Per-series visibility toggles.
    pub visible: Vec<bool>,

    /// Title, axis labels and legend anchor.
    pub options: PlotOptions,
}

impl AppState {
    pub fn new(series: Vec<Series>, options: PlotOptions) -> Self {
        let colors = generate_palette(series.len())
            .into_iter()
            .map(Color32::from)
            .collect();
        let visible = vec![true; series.len()];
        Self {
            series,
            colors,
            visible,
            options,
        }
    }

    /// Indices of the series currently shown.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, shown)| **shown)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn set_visible(&mut self, idx: usize, shown: bool) {
        if let Some(slot) = self.visible.get_mut(idx) {
            *slot = shown;
        }
    }

    /// Show every series.
    pub fn select_all(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = true);
    }

    /// Hide every series.
    pub fn select_none(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = false);
    }
}
