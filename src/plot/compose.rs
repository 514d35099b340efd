use std::path::PathBuf;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use super::figure::{Figure, Panel, Trace};
use super::reference::{self, harmonic_reference};
use super::render::render;
use super::sink::OutputSink;
use crate::color;
use crate::data::loader::SeriesLoader;
use crate::data::model::{RunId, SeriesKind, SnapshotTag};

// ---------------------------------------------------------------------------
// Canvas requests
// ---------------------------------------------------------------------------

/// One run's history overlaid on the analytic single-mode solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRequest {
    pub title: String,
    pub run: RunId,
    /// Stiffness `K`; the reference oscillates at `sqrt(2K)`.
    pub stiffness: f64,
    /// End of the reference time axis.
    pub final_time: f64,
    pub output: String,
}

/// Snapshots and history of a single run, side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityRequest {
    pub title: String,
    pub run: RunId,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub resolution: u32,
    pub run: RunId,
}

/// One row per resolution: snapshots on the left, history on the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRequest {
    pub title: String,
    pub rows: Vec<GridRow>,
    pub output: String,
}

/// What happened to one canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasOutcome {
    Saved(PathBuf),
    /// No series was found; nothing was written.
    Skipped,
    /// Rendering or writing failed; logged.
    Failed,
}

const OVERLAY_SIZE: (u32, u32) = (1000, 600);
const STABILITY_SIZE: (u32, u32) = (1200, 500);
const GRID_WIDTH: u32 = 1200;
const GRID_ROW_HEIGHT: u32 = 1400 / 3;

// ---------------------------------------------------------------------------
// PlotComposer
// ---------------------------------------------------------------------------

/// Builds canvases from optional series and hands non-empty ones to the sink.
pub struct PlotComposer<'a> {
    loader: SeriesLoader<'a>,
    sink: OutputSink<'a>,
    reference_samples: usize,
}

impl<'a> PlotComposer<'a> {
    pub fn new(loader: SeriesLoader<'a>, sink: OutputSink<'a>) -> Self {
        PlotComposer {
            loader,
            sink,
            reference_samples: reference::DEFAULT_SAMPLES,
        }
    }

    pub fn with_reference_samples(mut self, samples: usize) -> Self {
        self.reference_samples = samples;
        self
    }

    pub fn overlay(&self, req: &OverlayRequest) -> CanvasOutcome {
        info!("Plotting {}...", req.title);
        self.finish(self.build_overlay(req), &req.output)
    }

    pub fn stability(&self, req: &StabilityRequest) -> CanvasOutcome {
        info!("Plotting {}...", req.title);
        self.finish(self.build_stability(req), &req.output)
    }

    pub fn grid(&self, req: &GridRequest) -> CanvasOutcome {
        info!("Plotting {}...", req.title);
        self.finish(self.build_grid(req), &req.output)
    }

    /// The overlay only exists if the numerical history does.
    pub fn build_overlay(&self, req: &OverlayRequest) -> Figure {
        let mut fig = Figure::new(&req.title, OVERLAY_SIZE, 1, 1);
        let Some(numerical) = self.loader.load_run(&req.run, SeriesKind::History) else {
            return fig;
        };

        let panel = fig.panel_mut(0, 0);
        *panel = Panel::new(&req.title).with_legend().with_grid();
        match harmonic_reference(req.stiffness, req.final_time, self.reference_samples) {
            Some(exact) => panel.push(Trace::solid(exact, color::REFERENCE).labelled("Exact")),
            None => warn!(
                "  no reference curve for stiffness {} over [0, {}]",
                req.stiffness, req.final_time
            ),
        }
        panel.push(Trace::dashed(numerical, color::NUMERICAL).labelled("Numerical"));
        fig
    }

    pub fn build_stability(&self, req: &StabilityRequest) -> Figure {
        let mut fig = Figure::new(&req.title, STABILITY_SIZE, 1, 2);

        let mut snapshots = Panel::new("Snapshots").with_legend().with_grid();
        self.push_snapshots(&mut snapshots, &req.run);
        *fig.panel_mut(0, 0) = snapshots;

        let mut history = Panel::new("History").with_grid();
        self.push_history(&mut history, &req.run);
        *fig.panel_mut(0, 1) = history;

        fig
    }

    pub fn build_grid(&self, req: &GridRequest) -> Figure {
        let height = GRID_ROW_HEIGHT * req.rows.len().max(1) as u32;
        let mut fig = Figure::new(&req.title, (GRID_WIDTH, height), req.rows.len(), 2);

        for (i, row) in req.rows.iter().enumerate() {
            let mut snapshots = Panel::new(format!("N={} Snapshots", row.resolution));
            // Tags read the same in every row; one legend is enough.
            if i == 0 {
                snapshots = snapshots.with_legend();
            }
            self.push_snapshots(&mut snapshots, &row.run);
            *fig.panel_mut(i, 0) = snapshots;

            let mut history = Panel::new(format!("N={} History", row.resolution));
            self.push_history(&mut history, &row.run);
            *fig.panel_mut(i, 1) = history;
        }
        fig
    }

    fn push_snapshots(&self, panel: &mut Panel, run: &RunId) {
        for tag in SnapshotTag::ALL {
            let series = self.loader.load_run(run, SeriesKind::Snapshot(tag));
            panel.push_found(series, |s| {
                Trace::solid(s, color::snapshot_color(tag)).labelled(tag.as_str())
            });
        }
    }

    fn push_history(&self, panel: &mut Panel, run: &RunId) {
        let series = self.loader.load_run(run, SeriesKind::History);
        panel.push_found(series, |s| Trace::solid(s, color::HISTORY));
    }

    /// Discard an empty figure, otherwise render and save it.
    fn finish(&self, fig: Figure, output: &str) -> CanvasOutcome {
        if fig.is_empty() {
            info!("  [SKIPPED] No data found for {output}");
            return CanvasOutcome::Skipped;
        }
        let canvas = match render(&fig) {
            Ok(canvas) => canvas,
            Err(e) => {
                error!("  [FAILED] rendering {output}: {e:#}");
                return CanvasOutcome::Failed;
            }
        };
        match self.sink.save(&canvas, output) {
            Some(path) => CanvasOutcome::Saved(path),
            None => CanvasOutcome::Failed,
        }
    }
}
