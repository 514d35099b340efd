use plotters::style::RGBColor;

use crate::data::model::Series;

// ---------------------------------------------------------------------------
// Figure model – built explicitly, handed to the renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// One drawn curve.
#[derive(Debug, Clone)]
pub struct Trace {
    pub series: Series,
    pub label: Option<String>,
    pub color: RGBColor,
    pub style: LineStyle,
}

impl Trace {
    pub fn solid(series: Series, color: RGBColor) -> Self {
        Trace {
            series,
            label: None,
            color,
            style: LineStyle::Solid,
        }
    }

    pub fn dashed(series: Series, color: RGBColor) -> Self {
        Trace {
            style: LineStyle::Dashed,
            ..Self::solid(series, color)
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One set of axes.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub title: String,
    pub traces: Vec<Trace>,
    pub legend: bool,
    pub grid: bool,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Panel {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_legend(mut self) -> Self {
        self.legend = true;
        self
    }

    pub fn with_grid(mut self) -> Self {
        self.grid = true;
        self
    }

    pub fn push(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    /// Add `series` if it was found; absent series leave the panel untouched.
    /// Returns whether a trace was added.
    pub fn push_found(&mut self, series: Option<Series>, make: impl FnOnce(Series) -> Trace) -> bool {
        match series {
            Some(s) => {
                self.traces.push(make(s));
                true
            }
            None => false,
        }
    }

    /// `(x_min, x_max, y_min, y_max)` over every trace, padded so that a
    /// single point or a flat line still gets a non-degenerate range.
    pub fn data_range(&self) -> (f64, f64, f64, f64) {
        let bounds = self
            .traces
            .iter()
            .filter_map(|t| t.series.bounds())
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1), a.2.min(b.2), a.3.max(b.3)));
        let Some((x0, x1, y0, y1)) = bounds else {
            return (0.0, 1.0, 0.0, 1.0);
        };
        let (x0, x1) = widen(x0, x1, 0.0);
        let (y0, y1) = widen(y0, y1, 0.05);
        (x0, x1, y0, y1)
    }
}

fn widen(lo: f64, hi: f64, pad_frac: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON * lo.abs().max(1.0) {
        let half = (lo.abs() * 0.5).max(0.5);
        return (lo - half, hi + half);
    }
    (lo - span * pad_frac, hi + span * pad_frac)
}

/// A whole canvas: a title over a `rows × cols` grid of panels.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub size: (u32, u32),
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` entries.
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn new(title: impl Into<String>, size: (u32, u32), rows: usize, cols: usize) -> Self {
        Figure {
            title: title.into(),
            size,
            rows,
            cols,
            panels: vec![Panel::default(); rows * cols],
        }
    }

    pub fn panel_mut(&mut self, row: usize, col: usize) -> &mut Panel {
        &mut self.panels[row * self.cols + col]
    }

    pub fn panel(&self, row: usize, col: usize) -> &Panel {
        &self.panels[row * self.cols + col]
    }

    pub fn trace_count(&self) -> usize {
        self.panels.iter().map(|p| p.traces.len()).sum()
    }

    /// `true` when no panel received any trace.
    pub fn is_empty(&self) -> bool {
        self.trace_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(f64, f64)]) -> Series {
        Series::from_points(points.to_vec()).unwrap()
    }

    #[test]
    fn empty_figure_reports_empty() {
        let fig = Figure::new("t", (100, 100), 3, 2);
        assert_eq!(fig.panels.len(), 6);
        assert!(fig.is_empty());
    }

    #[test]
    fn push_found_ignores_absent_series() {
        let mut panel = Panel::new("p");
        assert!(!panel.push_found(None, |s| Trace::solid(s, RGBColor(0, 0, 0))));
        assert!(panel.push_found(Some(series(&[(0.0, 0.0)])), |s| Trace::solid(
            s,
            RGBColor(0, 0, 0)
        )));
        assert_eq!(panel.traces.len(), 1);
    }

    #[test]
    fn panel_index_is_row_major() {
        let mut fig = Figure::new("t", (100, 100), 2, 2);
        fig.panel_mut(1, 0).title = "lower left".into();
        assert_eq!(fig.panels[2].title, "lower left");
        assert_eq!(fig.panel(1, 0).title, "lower left");
    }

    #[test]
    fn range_of_single_point_is_not_degenerate() {
        let mut panel = Panel::new("p");
        panel.push(Trace::solid(series(&[(2.0, 3.0)]), RGBColor(0, 0, 0)));
        let (x0, x1, y0, y1) = panel.data_range();
        assert!(x0 < 2.0 && 2.0 < x1);
        assert!(y0 < 3.0 && 3.0 < y1);
    }

    #[test]
    fn range_spans_all_traces() {
        let mut panel = Panel::new("p");
        panel.push(Trace::solid(series(&[(0.0, -1.0), (1.0, 1.0)]), RGBColor(0, 0, 0)));
        panel.push(Trace::solid(series(&[(0.5, 0.0), (4.0, 2.0)]), RGBColor(0, 0, 0)));
        let (x0, x1, y0, y1) = panel.data_range();
        assert_eq!((x0, x1), (0.0, 4.0));
        assert!(y0 < -1.0 && y1 > 2.0);
    }

    #[test]
    fn empty_panel_gets_unit_range() {
        assert_eq!(Panel::new("p").data_range(), (0.0, 1.0, 0.0, 1.0));
    }
}
