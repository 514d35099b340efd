use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::plot::reference;
use crate::sweep::{default_requests, CanvasRequest, DEFAULT_RESOLUTIONS};

/// Everything a sweep run needs besides the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Subdirectory searched after the working directory, and preferred for
    /// output when it exists.
    #[serde(default = "SweepConfig::default_data_dir")]
    pub data_dir: String,
    /// Samples in the analytic reference curve.
    #[serde(default = "SweepConfig::default_reference_samples")]
    pub reference_samples: usize,
    /// TrueType font for captions and labels.
    #[serde(default)]
    pub font: Option<PathBuf>,
    /// Canvases in production order.
    #[serde(default = "SweepConfig::default_canvases")]
    pub canvases: Vec<CanvasRequest>,
}

impl SweepConfig {
    fn default_data_dir() -> String {
        "data".to_string()
    }
    fn default_reference_samples() -> usize {
        reference::DEFAULT_SAMPLES
    }
    fn default_canvases() -> Vec<CanvasRequest> {
        default_requests(&DEFAULT_RESOLUTIONS)
    }

    /// Read a JSON config; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid sweep config")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialising sweep config")
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            reference_samples: Self::default_reference_samples(),
            font: None,
            canvases: Self::default_canvases(),
        }
    }
}
