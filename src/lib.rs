//! Comparison figures for a simulation sweep over resolution and
//! nonlinearity, drawn from whatever result files the sweep produced.

pub mod color;
pub mod config;
pub mod data;
pub mod plot;
pub mod sweep;
