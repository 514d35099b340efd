use crate::data::model::Series;

/// Number of samples used for the analytic curve.
pub const DEFAULT_SAMPLES: usize = 1000;

/// Closed-form response of a single harmonic mode with stiffness `k`, started
/// from rest at the origin with unit velocity: `x(t) = sin(ωt) / ω`,
/// `ω = sqrt(2k)`.
///
/// Sampled at `samples` evenly spaced points over `[0, final_time]`, both ends
/// included. Returns `None` if `k` is not positive or `samples` is zero.
pub fn harmonic_reference(k: f64, final_time: f64, samples: usize) -> Option<Series> {
    if !(k > 0.0) || samples == 0 {
        return None;
    }
    let omega = (2.0 * k).sqrt();
    let step = if samples > 1 {
        final_time / (samples - 1) as f64
    } else {
        0.0
    };
    let points = (0..samples)
        .map(|i| {
            let t = i as f64 * step;
            (t, (omega * t).sin() / omega)
        })
        .collect();
    Series::from_points(points)
}
