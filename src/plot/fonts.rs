use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, info, warn};
use plotters::style::{register_font, FontStyle};
use thiserror::Error;

/// Family name every caption and label is drawn with.
pub const FAMILY: &str = "sans-serif";

/// Environment variable that points at a TrueType font to use.
pub const FONT_ENV: &str = "SWEEP_PLOT_FONT";

const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Error)]
pub enum FontError {
    #[error("reading font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is not a usable TrueType font")]
    Invalid(PathBuf),
}

static TEXT_ENABLED: OnceLock<bool> = OnceLock::new();

/// Whether a font has been registered and text can be drawn.
pub fn text_enabled() -> bool {
    TEXT_ENABLED.get().copied().unwrap_or(false)
}

/// Register a font for [`FAMILY`] once per process.
///
/// Tries `preferred`, then `$SWEEP_PLOT_FONT`, then a few common system
/// locations. Without any font figures are still rendered, just without text.
pub fn init(preferred: Option<&Path>) -> bool {
    *TEXT_ENABLED.get_or_init(|| {
        let env_path = std::env::var_os(FONT_ENV).map(PathBuf::from);
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(env_path)
            .chain(CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match register(&path) {
                Ok(()) => {
                    info!("Using font {}", path.display());
                    return true;
                }
                Err(e) => warn!("{e}"),
            }
        }
        warn!("No TrueType font found; figures will be rendered without text (set {FONT_ENV})");
        false
    })
}

fn register(path: &Path) -> Result<(), FontError> {
    let bytes = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Registered fonts live for the rest of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| FontError::Invalid(path.to_path_buf()))?;
    debug!("registered {FAMILY} from {}", path.display());
    Ok(())
}
