use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use log::{error, info};

use crate::data::storage::Storage;

// ---------------------------------------------------------------------------
// OutputSink – where rendered canvases go
// ---------------------------------------------------------------------------

/// Writes canvases next to the data they were drawn from: into the data
/// subdirectory when it exists, otherwise into the working directory.
pub struct OutputSink<'a> {
    storage: &'a dyn Storage,
    work_dir: PathBuf,
    data_dir: PathBuf,
}

impl<'a> OutputSink<'a> {
    pub fn new(storage: &'a dyn Storage, work_dir: &Path, data_dir: &str) -> Self {
        OutputSink {
            storage,
            work_dir: work_dir.to_path_buf(),
            data_dir: work_dir.join(data_dir),
        }
    }

    /// Destination for `filename`, chosen at call time.
    pub fn target(&self, filename: &str) -> PathBuf {
        if self.storage.is_dir(&self.data_dir) {
            self.data_dir.join(filename)
        } else {
            self.work_dir.join(filename)
        }
    }

    /// Encode and write `canvas`. Failures are logged and reported as `None`.
    pub fn save(&self, canvas: &RgbImage, filename: &str) -> Option<PathBuf> {
        let out = self.target(filename);
        match self.write_png(canvas, &out) {
            Ok(()) => {
                info!("  [SAVED] {}", out.display());
                Some(out)
            }
            Err(e) => {
                error!("  [FAILED] {}: {e:#}", out.display());
                None
            }
        }
    }

    fn write_png(&self, canvas: &RgbImage, out: &Path) -> Result<()> {
        let bytes = encode_png(canvas)?;
        self.storage
            .write(out, &bytes)
            .with_context(|| format!("writing {}", out.display()))
    }
}

/// PNG-encode an RGB canvas. Output depends only on the pixels.
pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgb8,
        )
        .context("encoding PNG")?;
    Ok(bytes)
}
