use std::collections::BTreeSet;

use super::error::SelectError;
use super::model::{Document, Series};

// ---------------------------------------------------------------------------
// Selection: which series to keep and how to present them
// ---------------------------------------------------------------------------

/// Independent per-axis scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Scale { x: 1.0, y: 1.0 }
    }
}

impl Scale {
    pub fn new(x: f64, y: f64) -> Self {
        Scale { x, y }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 1.0 && self.y == 1.0
    }
}

/// Everything the user asked for between parsing and export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Series names to keep, in the order they should appear. `None` keeps all.
    pub restrict_to: Option<Vec<String>>,
    /// Replacement names, assigned positionally after restriction.
    pub labels: Option<Vec<String>>,
    pub scale: Scale,
}

// ---------------------------------------------------------------------------
// Restriction
// ---------------------------------------------------------------------------

/// Return indices of the series to keep, in output order.
///
/// * `restrict_to` is `None` → every series, document order
/// * otherwise → for each requested name (first occurrence only), every series
///   with exactly that name, document order within the name
///
/// Every requested name must match at least one series.
pub fn restricted_indices(
    document: &Document,
    restrict_to: Option<&[String]>,
) -> Result<Vec<usize>, SelectError> {
    let Some(requested) = restrict_to else {
        return Ok((0..document.len()).collect());
    };

    let mut seen = BTreeSet::new();
    let mut indices = Vec::new();
    let mut missing = Vec::new();

    for name in requested {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let before = indices.len();
        indices.extend(
            document
                .series
                .iter()
                .enumerate()
                .filter(|(_, s)| s.name == *name)
                .map(|(i, _)| i),
        );
        if indices.len() == before {
            missing.push(name.clone());
        }
    }

    if !missing.is_empty() {
        return Err(SelectError::UnknownSeries {
            missing,
            available: document.names().into_iter().map(String::from).collect(),
        });
    }
    Ok(indices)
}

// ---------------------------------------------------------------------------
// Full transform
// ---------------------------------------------------------------------------

/// Restrict, relabel, then scale. The document is left untouched.
pub fn select(document: &Document, selection: &Selection) -> Result<Vec<Series>, SelectError> {
    let indices = restricted_indices(document, selection.restrict_to.as_deref())?;

    if let Some(labels) = &selection.labels {
        if labels.len() != indices.len() {
            return Err(SelectError::LabelCount {
                labels: labels.len(),
                series: indices.len(),
            });
        }
    }

    let Scale { x, y } = selection.scale;
    let series = indices
        .iter()
        .enumerate()
        .map(|(pos, &idx)| {
            let source = &document.series[idx];
            let named = match &selection.labels {
                Some(labels) => source.renamed(labels[pos].as_str()),
                None => source.clone(),
            };
            if selection.scale.is_identity() {
                named
            } else {
                named.scaled(x, y)
            }
        })
        .collect();

    Ok(series)
}
