//! Canvas composition, rendering and output.
//!
//! A request becomes a [`figure::Figure`] (panels of traces built from
//! whatever series were found). Empty figures are dropped; the rest are
//! rasterised by [`render`] and written by [`sink::OutputSink`].

pub mod compose;
pub mod figure;
pub mod fonts;
pub mod reference;
pub mod render;
pub mod sink;

pub use compose::{CanvasOutcome, GridRequest, GridRow, OverlayRequest, PlotComposer, StabilityRequest};
