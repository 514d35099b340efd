use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

use crate::data::model::SnapshotTag;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            RGBColor(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed roles
// ---------------------------------------------------------------------------

/// Analytic reference curve.
pub const REFERENCE: RGBColor = RGBColor(0, 0, 0);
/// Numerical curve drawn over the reference.
pub const NUMERICAL: RGBColor = RGBColor(214, 39, 40);
/// Time-history panels.
pub const HISTORY: RGBColor = RGBColor(31, 119, 180);

/// Colour for a snapshot tag; stable across every canvas of a sweep.
pub fn snapshot_color(tag: SnapshotTag) -> RGBColor {
    let palette = generate_palette(SnapshotTag::ALL.len());
    let idx = SnapshotTag::ALL
        .iter()
        .position(|t| *t == tag)
        .unwrap_or(0);
    palette[idx]
}
