use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Parser;

use crate::constants::{DEFAULT_X_LABEL, DEFAULT_Y_LABEL};
use crate::data::filter::{Scale, Selection, select};
use crate::data::loader::load_file;
use crate::data::model::{Document, Series};
use crate::export::{self, Destination, ExportFormat, LegendPosition, PlotOptions};

/// Plot .agr (Grace) files created with VMD, or export their data to csv,
/// svg, png or jpg.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "plot", version, about)]
pub struct Cli {
    /// Path to .agr file
    pub input_file: PathBuf,

    /// Skip the interactive plot window
    #[arg(long = "do_not_plot")]
    pub do_not_plot: bool,

    /// Plot title; defaults to the title stored in the file
    #[arg(short, long)]
    pub title: Option<String>,

    /// Text below the x axis [default: file's x-axis label, else "frame"]
    #[arg(short = 'x', long = "axis_x", value_name = "LABEL")]
    pub axis_x: Option<String>,

    /// Text beside the y axis [default: file's y-axis label, else "y"]
    #[arg(short = 'y', long = "axis_y", value_name = "LABEL")]
    pub axis_y: Option<String>,

    /// Only these series, in this order
    #[arg(short, long = "restrict_to", value_name = "NAME", num_args = 1..)]
    pub restrict_to: Option<Vec<String>>,

    /// Export to the given format
    #[arg(short, long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Scale factors for the x and y coordinates
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["SCALE_X", "SCALE_Y"],
        allow_negative_numbers = true
    )]
    pub scale: Option<Vec<f64>>,

    /// Legend anchor as fractions of the plot area (x, y from bottom-left)
    #[arg(
        short,
        long = "legend_position",
        num_args = 2,
        value_names = ["LEGEND_X", "LEGEND_Y"],
        allow_negative_numbers = true
    )]
    pub legend_position: Option<Vec<f64>>,

    /// Text to use in the legend instead of series names
    #[arg(long, value_name = "LABEL", num_args = 1..)]
    pub labels: Option<Vec<String>>,

    /// Export destination; `-` writes csv to stdout [default: <input>.<format>]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn selection(&self) -> Selection {
        Selection {
            restrict_to: self.restrict_to.clone(),
            labels: self.labels.clone(),
            scale: pair(&self.scale).map_or_else(Scale::default, |(x, y)| Scale::new(x, y)),
        }
    }

    /// Presentation options, falling back to what the file declares and then
    /// to fixed defaults.
    pub fn plot_options(&self, document: &Document) -> PlotOptions {
        let title = self
            .title
            .clone()
            .or_else(|| document.title.clone())
            .unwrap_or_else(|| file_name(&self.input_file));
        PlotOptions {
            title,
            subtitle: document.subtitle.clone(),
            x_label: self
                .axis_x
                .clone()
                .or_else(|| document.x_label.clone())
                .unwrap_or_else(|| DEFAULT_X_LABEL.to_string()),
            y_label: self
                .axis_y
                .clone()
                .or_else(|| document.y_label.clone())
                .unwrap_or_else(|| DEFAULT_Y_LABEL.to_string()),
            legend: pair(&self.legend_position)
                .map_or_else(LegendPosition::default, |(x, y)| LegendPosition::new(x, y)),
        }
    }

    /// Explicit `-e`, else the extension of `-o`.
    pub fn export_format(&self) -> Result<Option<ExportFormat>> {
        if self.export.is_some() {
            return Ok(self.export);
        }
        match &self.output {
            None => Ok(None),
            Some(path) if path.as_os_str() == "-" => Ok(Some(ExportFormat::Csv)),
            Some(path) => match ExportFormat::from_path(path) {
                Some(format) => Ok(Some(format)),
                None => bail!(
                    "cannot tell the export format from {}; pass -e {{csv,svg,png,jpg}}",
                    path.display()
                ),
            },
        }
    }

    pub fn destination(&self, format: ExportFormat) -> Destination {
        match &self.output {
            Some(path) => Destination::from_arg(path),
            None => Destination::derived(&self.input_file, format),
        }
    }
}

fn pair(values: &Option<Vec<f64>>) -> Option<(f64, f64)> {
    match values.as_deref() {
        Some([x, y]) => Some((*x, *y)),
        _ => None,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// file → series → (restrict / relabel / scale) → (export | viewer)
///
/// All validation happens before anything is written.
pub fn run(cli: Cli) -> Result<()> {
    if !cli.do_not_plot && !VIEWER_AVAILABLE {
        bail!("this build has no interactive viewer; pass --do_not_plot");
    }
    let format = cli.export_format()?;

    let document = load_file(&cli.input_file)?;
    let series = select(&document, &cli.selection())?;
    let options = cli.plot_options(&document);

    if let Some(format) = format {
        let dest = cli.destination(format);
        export::export(&series, &options, format, &dest)?;
        if dest != Destination::Stdout {
            println!("Exported {} series to {dest}.", series.len());
        }
    }

    if !cli.do_not_plot {
        show(series, options)?;
    }
    Ok(())
}

const VIEWER_AVAILABLE: bool = cfg!(feature = "gui");

#[cfg(feature = "gui")]
fn show(series: Vec<Series>, options: PlotOptions) -> Result<()> {
    crate::app::run_viewer(series, options)
}

#[cfg(not(feature = "gui"))]
fn show(_series: Vec<Series>, _options: PlotOptions) -> Result<()> {
    bail!("this build has no interactive viewer; pass --do_not_plot")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("plot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn minimal_invocation() {
        let cli = parse(&["energy.agr"]);
        assert_eq!(cli.input_file, PathBuf::from("energy.agr"));
        assert!(!cli.do_not_plot);
        assert_eq!(cli.selection(), Selection::default());
        assert_eq!(cli.export_format().unwrap(), None);
    }

    #[test]
    fn full_invocation() {
        let cli = parse(&[
            "energy.agr",
            "-t", "Energies",
            "-x", "time (ns)",
            "-y", "kcal/mol",
            "-e", "png",
            "-s", "0.005", "-1",
            "-l", "0.5", "1.2",
            "--do_not_plot",
            "-r", "Total", "Bond",
            "--labels", "T", "B",
        ]);
        assert_eq!(cli.title.as_deref(), Some("Energies"));
        assert_eq!(cli.export, Some(ExportFormat::Png));
        assert!(cli.do_not_plot);
        assert_eq!(
            cli.selection(),
            Selection {
                restrict_to: Some(vec!["Total".into(), "Bond".into()]),
                labels: Some(vec!["T".into(), "B".into()]),
                scale: Scale::new(0.005, -1.0),
            }
        );
        let opts = cli.plot_options(&Document::default());
        assert_eq!(opts.x_label, "time (ns)");
        assert_eq!(opts.y_label, "kcal/mol");
        assert_eq!(opts.legend, LegendPosition::new(0.5, 1.2));
    }

    #[test]
    fn scale_needs_two_values() {
        assert!(Cli::try_parse_from(["plot", "a.agr", "-s", "2"]).is_err());
    }

    #[test]
    fn unknown_export_format_is_rejected() {
        assert!(Cli::try_parse_from(["plot", "a.agr", "-e", "pdf"]).is_err());
    }

    #[test]
    fn defaults_come_from_document_then_constants() {
        let cli = parse(&["/tmp/rmsd.agr"]);
        let mut doc = Document::default();
        let opts = cli.plot_options(&doc);
        assert_eq!(opts.title, "rmsd.agr");
        assert_eq!(opts.x_label, "frame");
        assert_eq!(opts.y_label, "y");
        assert_eq!(opts.legend, LegendPosition::default());

        doc.title = Some("RMSD".into());
        doc.x_label = Some("Frame".into());
        doc.y_label = Some("RMSD (A)".into());
        let opts = cli.plot_options(&doc);
        assert_eq!(opts.title, "RMSD");
        assert_eq!(opts.x_label, "Frame");
        assert_eq!(opts.y_label, "RMSD (A)");

        let cli = parse(&["/tmp/rmsd.agr", "-t", "Mine"]);
        assert_eq!(cli.plot_options(&doc).title, "Mine");
    }

    #[test]
    fn subtitle_comes_from_document() {
        let cli = parse(&["/tmp/rmsd.agr", "-t", "Mine"]);
        assert_eq!(cli.plot_options(&Document::default()).subtitle, None);
        let doc = Document {
            subtitle: Some("run 2".into()),
            ..Default::default()
        };
        assert_eq!(cli.plot_options(&doc).subtitle.as_deref(), Some("run 2"));
    }

    #[cfg(not(feature = "gui"))]
    #[test]
    fn viewer_request_fails_before_export() {
        let out = std::env::temp_dir().join(format!("agr-plot-noviewer-{}.csv", std::process::id()));
        let input = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/vmd_energy.agr");
        let err = run(parse(&[input, "-o", out.to_str().unwrap()])).unwrap_err();
        assert!(err.to_string().contains("--do_not_plot"), "{err}");
        assert!(!out.exists());
    }

    #[test]
    fn format_inferred_from_output() {
        assert_eq!(
            parse(&["a.agr", "-o", "out.svg"]).export_format().unwrap(),
            Some(ExportFormat::Svg)
        );
        assert_eq!(
            parse(&["a.agr", "-o", "-"]).export_format().unwrap(),
            Some(ExportFormat::Csv)
        );
        assert!(parse(&["a.agr", "-o", "out.bin"]).export_format().is_err());
        assert_eq!(
            parse(&["a.agr", "-e", "csv", "-o", "out.txt"]).export_format().unwrap(),
            Some(ExportFormat::Csv)
        );
    }

    #[test]
    fn destination_defaults_to_derived_name() {
        let cli = parse(&["data/rmsd.agr"]);
        assert_eq!(
            cli.destination(ExportFormat::Jpg),
            Destination::File(PathBuf::from("rmsd.agr.jpg"))
        );
        let cli = parse(&["data/rmsd.agr", "-o", "plots/r.png"]);
        assert_eq!(
            cli.destination(ExportFormat::Png),
            Destination::File(PathBuf::from("plots/r.png"))
        );
    }
}
