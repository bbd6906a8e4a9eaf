// Rendering and CLI defaults.

// Static image canvas
pub const PLOT_WIDTH: u32 = 1280;
pub const PLOT_HEIGHT: u32 = 760;
pub const PLOT_MARGIN: u32 = 20;
pub const X_LABEL_AREA: u32 = 50;
pub const Y_LABEL_AREA: u32 = 70;

// Fonts
pub const FONT_FAMILY: &str = "sans-serif";
pub const FONT_SIZE_TITLE: u32 = 28;
pub const FONT_SIZE_SUBTITLE: u32 = 20;
pub const FONT_SIZE_AXIS_LABEL: u32 = 18;
pub const FONT_SIZE_LEGEND: u32 = 16;

// Lines
pub const LINE_WIDTH: u32 = 2;
pub const LEGEND_SWATCH_PX: i32 = 20;
pub const LEGEND_MARGIN_PX: i32 = 10;

/// Approximate glyph width relative to font size, used to size the legend box.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;

/// Relative padding added around the data extent.
pub const RANGE_PADDING: f64 = 0.05;

// Labels used when neither the command line nor the file provides one
pub const DEFAULT_X_LABEL: &str = "frame";
pub const DEFAULT_Y_LABEL: &str = "y";

// Viewer window
pub const VIEWER_SIZE: [f32; 2] = [1200.0, 800.0];
pub const VIEWER_MIN_SIZE: [f32; 2] = [600.0, 400.0];
