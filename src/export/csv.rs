use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::data::model::{Point, Series};

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Table layout: two columns per series, `NAME.x` and `NAME.y`, in series
/// order. Every point is one row holding only its own series' cells, so
/// series of different lengths and repeated x values survive untouched:
///
/// ```text
/// Bond.x,Bond.y,Total.x,Total.y
/// 0,1,,
/// 1,2,,
/// ,,0,3
/// ,,1,4.5
/// ```
pub fn write_csv<W: Write>(series: &[Series], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(
        series
            .iter()
            .flat_map(|s| [format!("{}.x", s.name), format!("{}.y", s.name)]),
    )?;

    let width = series.len() * 2;
    let mut row = vec![String::new(); width];
    for (k, s) in series.iter().enumerate() {
        for p in &s.points {
            row[2 * k] = p.x.to_string();
            row[2 * k + 1] = p.y.to_string();
            writer.write_record(&row)?;
        }
        row[2 * k].clear();
        row[2 * k + 1].clear();
    }

    writer.flush()?;
    Ok(())
}

pub fn write_csv_file(series: &[Series], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(series, file).with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Read a table written by [`write_csv`] back into series. Columns are paired
/// by position, so repeated names are fine.
pub fn read_series<R: Read>(reader: R) -> Result<Vec<Series>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    if headers.len() % 2 != 0 {
        bail!("expected an even number of columns, found {}", headers.len());
    }

    let mut series = Vec::with_capacity(headers.len() / 2);
    for k in 0..headers.len() / 2 {
        let x_col = &headers[2 * k];
        let y_col = &headers[2 * k + 1];
        let name = x_col
            .strip_suffix(".x")
            .with_context(|| format!("column {} ({x_col:?}) is not an x column", 2 * k))?;
        if y_col.strip_suffix(".y") != Some(name) {
            bail!("column {} ({y_col:?}) does not pair with {x_col:?}", 2 * k + 1);
        }
        series.push(Series::new(name, Vec::new()));
    }

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (k, s) in series.iter_mut().enumerate() {
            let x = record.get(2 * k).unwrap_or("");
            let y = record.get(2 * k + 1).unwrap_or("");
            match (x.is_empty(), y.is_empty()) {
                (true, true) => continue,
                (false, false) => {}
                _ => bail!("CSV row {row_no}: series {:?} has only one coordinate", s.name),
            }
            let x = x
                .parse::<f64>()
                .with_context(|| format!("Row {row_no}, {}.x: '{x}' is not a number", s.name))?;
            let y = y
                .parse::<f64>()
                .with_context(|| format!("Row {row_no}, {}.y: '{y}' is not a number", s.name))?;
            s.points.push(Point::new(x, y));
        }
    }

    Ok(series)
}
