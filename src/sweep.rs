use std::f64::consts::PI;

use log::info;
use serde::{Deserialize, Serialize};

use crate::data::model::RunId;
use crate::plot::{
    CanvasOutcome, GridRequest, GridRow, OverlayRequest, PlotComposer, StabilityRequest,
};

// ---------------------------------------------------------------------------
// Canvas requests
// ---------------------------------------------------------------------------

/// One entry of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CanvasRequest {
    Overlay(OverlayRequest),
    Stability(StabilityRequest),
    Grid(GridRequest),
}

impl CanvasRequest {
    pub fn output(&self) -> &str {
        match self {
            CanvasRequest::Overlay(r) => &r.output,
            CanvasRequest::Stability(r) => &r.output,
            CanvasRequest::Grid(r) => &r.output,
        }
    }
}

/// Counts of canvas outcomes over a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SweepSummary {
    fn record(&mut self, outcome: &CanvasOutcome) {
        match outcome {
            CanvasOutcome::Saved(_) => self.saved += 1,
            CanvasOutcome::Skipped => self.skipped += 1,
            CanvasOutcome::Failed => self.failed += 1,
        }
    }
}

/// Produce every canvas in order. One canvas never affects another.
pub fn run(composer: &PlotComposer<'_>, requests: &[CanvasRequest]) -> SweepSummary {
    let mut summary = SweepSummary::default();
    for request in requests {
        let outcome = match request {
            CanvasRequest::Overlay(r) => composer.overlay(r),
            CanvasRequest::Stability(r) => composer.stability(r),
            CanvasRequest::Grid(r) => composer.grid(r),
        };
        summary.record(&outcome);
    }
    info!(
        "Sweep finished: {} saved, {} skipped, {} failed",
        summary.saved, summary.skipped, summary.failed
    );
    summary
}

// ---------------------------------------------------------------------------
// The FPUT campaign
// ---------------------------------------------------------------------------

const RUN_NAME: &str = "fput";

/// Resolution levels shared by every grid canvas.
pub const DEFAULT_RESOLUTIONS: [u32; 3] = [8, 16, 32];

/// Grid rows for the given resolutions; `alpha_per_n` scales alpha with N.
fn grid_rows(resolutions: &[u32], alpha_per_n: f64, coupling: f64) -> Vec<GridRow> {
    resolutions
        .iter()
        .map(|&n| GridRow {
            resolution: n,
            run: RunId::from_params(RUN_NAME, n, alpha_per_n * n as f64, coupling),
        })
        .collect()
}

/// The standard campaign: single-mode check, linear / nonlinear / negative
/// alpha resolution grids, and the C=0.9 stability check.
pub fn default_requests(resolutions: &[u32]) -> Vec<CanvasRequest> {
    vec![
        CanvasRequest::Overlay(OverlayRequest {
            title: "Question (a): N=1 Comparison".into(),
            run: RunId::from_params(RUN_NAME, 1, 0.0, 1.0),
            stiffness: 16.0,
            final_time: 10.0 * PI,
            output: "plot_a_comparison.png".into(),
        }),
        CanvasRequest::Grid(GridRequest {
            title: "Question (b): Linear".into(),
            rows: grid_rows(resolutions, 0.0, 1.0),
            output: "plot_b_linear.png".into(),
        }),
        CanvasRequest::Grid(GridRequest {
            title: "Question (c): Nonlinear".into(),
            rows: grid_rows(resolutions, 0.1, 0.5),
            output: "plot_c_nonlinear.png".into(),
        }),
        CanvasRequest::Stability(StabilityRequest {
            title: "Question (d): Stability C=0.9".into(),
            run: RunId::from_params(RUN_NAME, 32, 3.2, 0.9),
            output: "plot_d_C0.9.png".into(),
        }),
        CanvasRequest::Grid(GridRequest {
            title: "Question (e): Negative Alpha".into(),
            rows: grid_rows(resolutions, -0.1, 0.5),
            output: "plot_e_negative.png".into(),
        }),
    ]
}
