use std::path::Path;

use anyhow::{Context, Result, bail};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::layout::{axis_ranges, legend_box_size, legend_origin};
use super::{ExportFormat, PlotOptions};
use crate::color::generate_palette;
use crate::constants::{
    FONT_FAMILY, FONT_SIZE_AXIS_LABEL, FONT_SIZE_LEGEND, FONT_SIZE_SUBTITLE, FONT_SIZE_TITLE,
    LEGEND_SWATCH_PX,
    LINE_WIDTH, PLOT_HEIGHT, PLOT_MARGIN, PLOT_WIDTH, X_LABEL_AREA, Y_LABEL_AREA,
};
use crate::data::model::{Bounds, Series};

/// Render `series` as a line chart into `path`. svg goes through the SVG
/// backend; png and jpg through the bitmap backend, which encodes by extension.
pub fn render(
    series: &[Series],
    options: &PlotOptions,
    format: ExportFormat,
    path: &Path,
) -> Result<()> {
    let size = (PLOT_WIDTH, PLOT_HEIGHT);
    let result = match format {
        ExportFormat::Svg => draw_chart(SVGBackend::new(path, size).into_drawing_area(), series, options),
        ExportFormat::Png | ExportFormat::Jpg => {
            draw_chart(BitMapBackend::new(path, size).into_drawing_area(), series, options)
        }
        ExportFormat::Csv => bail!("csv is not an image format"),
    };
    result.with_context(|| format!("rendering {}", path.display()))
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    series: &[Series],
    options: &PlotOptions,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let titled = root.titled(&options.title, (FONT_FAMILY, FONT_SIZE_TITLE))?;
    let area = match &options.subtitle {
        Some(subtitle) => titled.titled(subtitle, (FONT_FAMILY, FONT_SIZE_SUBTITLE))?,
        None => titled,
    };

    let (x_range, y_range) = axis_ranges(Bounds::of(series));
    let mut chart = ChartBuilder::on(&area)
        .margin(PLOT_MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(&options.x_label)
        .y_desc(&options.y_label)
        .axis_desc_style((FONT_FAMILY, FONT_SIZE_AXIS_LABEL))
        .draw()?;

    for (s, colour) in series.iter().zip(generate_palette(series.len())) {
        let color = RGBColor::from(colour);
        chart
            .draw_series(LineSeries::new(
                s.points.iter().map(|p| (p.x, p.y)),
                color.stroke_width(LINE_WIDTH),
            ))?
            .label(s.name.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + LEGEND_SWATCH_PX, y)], color.stroke_width(LINE_WIDTH))
            });
    }

    if !series.is_empty() {
        let labels: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        let area = chart.plotting_area().dim_in_pixel();
        let (x, y) = legend_origin(options.legend, area, legend_box_size(&labels, FONT_SIZE_LEGEND));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::Coordinate(x, y))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font((FONT_FAMILY, FONT_SIZE_LEGEND))
            .draw()?;
    }

    root.present()?;
    Ok(())
}
