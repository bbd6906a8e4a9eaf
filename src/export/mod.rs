/// Exporters: everything downstream of the selected series.
///
/// `csv` never touches a plotting backend, so csv-only builds
/// (`--no-default-features`) keep working.
pub mod csv;
#[cfg(feature = "render")]
pub mod image;
pub mod layout;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::ValueEnum;

use crate::data::model::Series;

// ---------------------------------------------------------------------------
// Output format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Svg,
    Png,
    Jpg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(ExportFormat::Csv),
            "svg" => Some(ExportFormat::Svg),
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpg),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ---------------------------------------------------------------------------
// Presentation options
// ---------------------------------------------------------------------------

/// Legend anchor as fractions of the plotting area: origin bottom-left,
/// y upward. The legend box's upper-right corner sits on the anchor.
/// Values outside `[0, 1]` are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendPosition {
    pub x: f64,
    pub y: f64,
}

impl Default for LegendPosition {
    fn default() -> Self {
        LegendPosition { x: 1.0, y: 1.0 }
    }
}

impl LegendPosition {
    pub fn new(x: f64, y: f64) -> Self {
        LegendPosition { x, y }
    }

    /// Anchor in pixels from the top-left of a `width` × `height` area.
    pub fn anchor_px(&self, width: f64, height: f64) -> (f64, f64) {
        (self.x * width, (1.0 - self.y) * height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub title: String,
    /// Drawn under the title when the file declares one.
    pub subtitle: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub legend: LegendPosition,
}

// ---------------------------------------------------------------------------
// Destination
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

impl Destination {
    /// `<input file name>.<ext>` in the current directory.
    pub fn derived(input: &Path, format: ExportFormat) -> Self {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "plot".to_string());
        Destination::File(PathBuf::from(format!("{name}.{}", format.extension())))
    }

    /// `-` means stdout.
    pub fn from_arg(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Destination::Stdout
        } else {
            Destination::File(path.to_path_buf())
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::File(p) => write!(f, "{}", p.display()),
            Destination::Stdout => f.write_str("<stdout>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Write `series` in `format` to `dest`.
pub fn export(
    series: &[Series],
    options: &PlotOptions,
    format: ExportFormat,
    dest: &Destination,
) -> Result<()> {
    match (format, dest) {
        (ExportFormat::Csv, Destination::File(path)) => self::csv::write_csv_file(series, path)?,
        (ExportFormat::Csv, Destination::Stdout) => {
            self::csv::write_csv(series, std::io::stdout().lock())?
        }
        (_, Destination::Stdout) => bail!("{format} output cannot be written to stdout"),
        (_, Destination::File(path)) => render_image(series, options, format, path)?,
    }
    log::info!("Wrote {} series as {format} to {dest}", series.len());
    Ok(())
}

#[cfg(feature = "render")]
fn render_image(
    series: &[Series],
    options: &PlotOptions,
    format: ExportFormat,
    path: &Path,
) -> Result<()> {
    self::image::render(series, options, format, path)
}

#[cfg(not(feature = "render"))]
fn render_image(
    _series: &[Series],
    _options: &PlotOptions,
    format: ExportFormat,
    _path: &Path,
) -> Result<()> {
    bail!("{format} export needs the `render` feature; rebuild with it or use `-e csv`")
}
