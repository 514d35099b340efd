use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Series – one loaded two-column table
// ---------------------------------------------------------------------------

/// An ordered sequence of `(x, y)` samples.
///
/// A `Series` is never empty: the only constructors reject zero-length input,
/// so "absent" and "present" are the only states a caller can observe.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Series {
    /// Build a series from parsed rows. Returns `None` for zero rows.
    pub fn from_points(points: Vec<(f64, f64)>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let (x, y) = points.into_iter().unzip();
        Some(Series { x, y })
    }

    /// Build a series from separate coordinate vectors.
    /// Returns `None` when the vectors are empty or differ in length.
    pub fn from_columns(x: Vec<f64>, y: Vec<f64>) -> Option<Self> {
        if x.is_empty() || x.len() != y.len() {
            return None;
        }
        Some(Series { x, y })
    }

    /// Abscissa values (time or position).
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Ordinate values – same length as `x`.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of samples, always at least one.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// `(x_min, x_max, y_min, y_max)` over finite samples, or `None` if every
    /// sample is NaN / infinite.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut acc: Option<(f64, f64, f64, f64)> = None;
        for (x, y) in self.points() {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            acc = Some(match acc {
                None => (x, x, y, y),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            });
        }
        acc
    }
}

// ---------------------------------------------------------------------------
// SnapshotTag – fractional-period capture instants
// ---------------------------------------------------------------------------

/// The instant at which a spatial snapshot was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnapshotTag {
    Quarter,
    Half,
    ThreeQuarter,
    Full,
}

impl SnapshotTag {
    /// All tags in capture order.
    pub const ALL: [SnapshotTag; 4] = [
        SnapshotTag::Quarter,
        SnapshotTag::Half,
        SnapshotTag::ThreeQuarter,
        SnapshotTag::Full,
    ];

    /// Token used in file names and legends.
    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotTag::Quarter => "T4",
            SnapshotTag::Half => "T2",
            SnapshotTag::ThreeQuarter => "3T4",
            SnapshotTag::Full => "T",
        }
    }
}

impl fmt::Display for SnapshotTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SeriesKind – which file variant of a run to load
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Full time history of the tracked observable.
    History,
    /// Spatial profile at one capture instant.
    Snapshot(SnapshotTag),
}

// ---------------------------------------------------------------------------
// RunId – the file stem shared by all outputs of one simulation run
// ---------------------------------------------------------------------------

/// Identifies one simulation run by its file stem, e.g.
/// `fput_n-8_alpha-neg0.8_C0.5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Wrap an existing file stem.
    pub fn new(stem: impl Into<String>) -> Self {
        RunId(stem.into())
    }

    /// Build the conventional stem from the run parameters.
    ///
    /// Negative `alpha` is written as `neg{|alpha|}` because the simulation
    /// never puts a minus sign in file names.
    pub fn from_params(name: &str, resolution: u32, alpha: f64, coupling: f64) -> Self {
        let alpha = if alpha < 0.0 {
            format!("neg{}", fmt_param(-alpha))
        } else {
            fmt_param(alpha)
        };
        RunId(format!(
            "{name}_n-{resolution}_alpha-{alpha}_C{}",
            fmt_param(coupling)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base file name (no directory) holding the requested variant.
    pub fn file_name(&self, kind: SeriesKind) -> String {
        match kind {
            SeriesKind::History => format!("{}_history.dat", self.0),
            SeriesKind::Snapshot(tag) => format!("{}_snap_{}.dat", self.0, tag),
        }
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shortest round-trip form, always with a fractional part (`1.0`, `0.8`).
fn fmt_param(v: f64) -> String {
    format!("{v:?}")
}
