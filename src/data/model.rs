// ---------------------------------------------------------------------------
// Point – one (x, y) sample
// ---------------------------------------------------------------------------

/// A single sample of a series. `x` is usually a simulation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

// ---------------------------------------------------------------------------
// Series – one named curve
// ---------------------------------------------------------------------------

/// One named sequence of samples, kept in file order.
///
/// Series produced by the loader always hold at least one point; x values
/// are neither sorted nor unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Series {
            name: name.into(),
            points,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copy of this series with every x multiplied by `scale_x` and every y
    /// by `scale_y`.
    pub fn scaled(&self, scale_x: f64, scale_y: f64) -> Series {
        Series {
            name: self.name.clone(),
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x * scale_x, p.y * scale_y))
                .collect(),
        }
    }

    /// Copy of this series under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Series {
        Series {
            name: name.into(),
            points: self.points.clone(),
        }
    }

    /// `(min, max)` of the finite x and y values, or `None` when nothing is finite.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(std::slice::from_ref(self))
    }
}

// ---------------------------------------------------------------------------
// Bounds – data extent used for axis ranges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Extent of all finite points across `series`.
    pub fn of(series: &[Series]) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        for p in series.iter().flat_map(|s| s.points.iter()) {
            if !p.x.is_finite() || !p.y.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                None => Bounds {
                    x_min: p.x,
                    x_max: p.x,
                    y_min: p.y,
                    y_max: p.y,
                },
                Some(b) => Bounds {
                    x_min: b.x_min.min(p.x),
                    x_max: b.x_max.max(p.x),
                    y_min: b.y_min.min(p.y),
                    y_max: b.y_max.max(p.y),
                },
            });
        }
        bounds
    }
}

// ---------------------------------------------------------------------------
// Document – the complete parsed file
// ---------------------------------------------------------------------------

/// The full parse result: ordered series plus whatever presentation hints
/// the file carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Series in legend order.
    pub series: Vec<Series>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

impl Document {
    pub fn from_series(series: Vec<Series>) -> Self {
        Document {
            series,
            ..Default::default()
        }
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the document holds no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Series names in document order (duplicates included).
    pub fn names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    /// Total number of points across all series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }
}
