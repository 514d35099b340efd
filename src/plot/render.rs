use anyhow::{Context, Result};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::figure::{Figure, LineStyle, Panel};
use super::fonts;

// ---------------------------------------------------------------------------
// Figure → RGB raster
// ---------------------------------------------------------------------------

/// Dash and gap lengths as fractions of the panel's normalised diagonal.
const DASH: f64 = 0.02;
const GAP: f64 = 0.012;

/// Render `fig` into an owned RGB image.
///
/// The drawing surface borrows a local pixel buffer and is dropped before the
/// buffer is handed out, whether drawing succeeds or fails.
pub fn render(fig: &Figure) -> Result<RgbImage> {
    let (width, height) = fig.size;
    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        draw_figure(&root, fig)?;
        root.present().context("flushing drawing surface")?;
    }
    RgbImage::from_raw(width, height, buf).context("pixel buffer does not match canvas size")
}

fn draw_figure(root: &DrawingArea<BitMapBackend<'_>, Shift>, fig: &Figure) -> Result<()> {
    let text = fonts::text_enabled();
    root.fill(&WHITE)?;

    let body = if text && !fig.title.is_empty() {
        root.titled(&fig.title, (fonts::FAMILY, 28))?
    } else {
        root.clone()
    };

    let areas = body.split_evenly((fig.rows, fig.cols));
    for (panel, area) in fig.panels.iter().zip(areas.iter()) {
        draw_panel(area, panel, text)
            .with_context(|| format!("drawing panel '{}'", panel.title))?;
    }
    Ok(())
}

fn draw_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, panel: &Panel, text: bool) -> Result<()> {
    let (x0, x1, y0, y1) = panel.data_range();

    let mut builder = ChartBuilder::on(area);
    builder.margin(12);
    if text {
        builder
            .caption(&panel.title, (fonts::FAMILY, 20))
            .x_label_area_size(30)
            .y_label_area_size(60);
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    if text {
        let mut mesh = chart.configure_mesh();
        if !panel.grid {
            mesh.disable_mesh();
        }
        mesh.label_style((fonts::FAMILY, 13)).draw()?;
    } else {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x0, y0), (x1, y1)],
            BLACK.stroke_width(1),
        )))?;
    }

    let show_legend = text && panel.legend;
    let mut labelled = 0;
    for trace in &panel.traces {
        let color = trace.color;
        let style = color.stroke_width(2);
        let points: Vec<(f64, f64)> = trace
            .series
            .points()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();

        let anno = match trace.style {
            LineStyle::Solid => chart.draw_series(LineSeries::new(points.iter().copied(), style))?,
            LineStyle::Dashed => chart.draw_series(
                dash_segments(&points, (x1 - x0, y1 - y0), DASH, GAP)
                    .into_iter()
                    .map(|seg| PathElement::new(seg, style)),
            )?,
        };
        if let Some(label) = trace.label.as_deref().filter(|_| show_legend) {
            anno.label(label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
            labelled += 1;
        }

        // A lone sample has no segment to stroke.
        if let [only] = points.as_slice() {
            chart.draw_series(std::iter::once(Circle::new(*only, 4, color.filled())))?;
        }
    }

    if labelled > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((fonts::FAMILY, 14))
            .draw()?;
    }
    Ok(())
}

/// Split a polyline into dash pieces.
///
/// Lengths are measured after scaling each axis by `span`, so the pattern
/// looks the same on any data range.
pub(crate) fn dash_segments(
    points: &[(f64, f64)],
    span: (f64, f64),
    dash: f64,
    gap: f64,
) -> Vec<Vec<(f64, f64)>> {
    if points.len() < 2 {
        return Vec::new();
    }
    let sx = if span.0 > 0.0 { span.0 } else { 1.0 };
    let sy = if span.1 > 0.0 { span.1 } else { 1.0 };
    let dist = |a: (f64, f64), b: (f64, f64)| {
        let dx = (b.0 - a.0) / sx;
        let dy = (b.1 - a.1) / sy;
        (dx * dx + dy * dy).sqrt()
    };

    let mut out = Vec::new();
    let mut current = vec![points[0]];
    let mut on = true;
    let mut left = dash;

    for w in points.windows(2) {
        let (mut a, b) = (w[0], w[1]);
        let mut seg = dist(a, b);
        while seg > left {
            let f = left / seg;
            let p = (a.0 + (b.0 - a.0) * f, a.1 + (b.1 - a.1) * f);
            current.push(p);
            if on {
                out.push(std::mem::take(&mut current));
            }
            on = !on;
            seg -= left;
            a = p;
            left = if on { dash } else { gap };
        }
        left -= seg;
        if on {
            current.push(b);
        }
    }
    if on && current.len() > 1 {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Series;
    use crate::plot::figure::Trace;

    #[test]
    fn dashes_alternate_along_a_line() {
        let segs = dash_segments(&[(0.0, 0.0), (1.0, 0.0)], (1.0, 1.0), 0.25, 0.25);
        assert_eq!(
            segs,
            vec![
                vec![(0.0, 0.0), (0.25, 0.0)],
                vec![(0.5, 0.0), (0.75, 0.0)],
            ]
        );
    }

    #[test]
    fn dashes_continue_across_vertices() {
        let pts = [(0.0, 0.0), (0.1, 0.0), (0.2, 0.0), (0.3, 0.0)];
        let segs = dash_segments(&pts, (1.0, 1.0), 0.25, 0.5);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].first(), Some(&(0.0, 0.0)));
        assert_eq!(segs[0].last(), Some(&(0.25, 0.0)));
    }

    #[test]
    fn too_few_points_give_no_dashes() {
        assert!(dash_segments(&[(1.0, 1.0)], (1.0, 1.0), 0.1, 0.1).is_empty());
        assert!(dash_segments(&[], (1.0, 1.0), 0.1, 0.1).is_empty());
    }

    fn sample_figure() -> Figure {
        let mut fig = Figure::new("sample", (320, 240), 1, 2);
        let s = Series::from_points((0..50).map(|i| (i as f64, (i as f64 * 0.2).sin())).collect()).unwrap();
        fig.panel_mut(0, 0).push(Trace::dashed(s.clone(), RED).labelled("a"));
        fig.panel_mut(0, 1)
            .push(Trace::solid(Series::from_points(vec![(1.0, 1.0)]).unwrap(), BLUE));
        fig
    }

    #[test]
    fn render_produces_canvas_sized_image() {
        let img = render(&sample_figure()).unwrap();
        assert_eq!(img.dimensions(), (320, 240));
        // Something other than the white background was drawn.
        assert!(img.pixels().any(|p| p.0 != [255, 255, 255]));
    }

    #[test]
    fn render_is_deterministic() {
        let a = render(&sample_figure()).unwrap();
        let b = render(&sample_figure()).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
