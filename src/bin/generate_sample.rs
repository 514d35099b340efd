use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use sweep_plotter::data::model::{RunId, SeriesKind, SnapshotTag};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform noise in `[-amp, amp)`.
    fn jitter(&mut self, amp: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amp
    }
}

fn table(points: impl Iterator<Item = (f64, f64)>) -> String {
    let mut out = String::new();
    for (x, y) in points {
        let _ = writeln!(out, "{x:.8e} {y:.8e}");
    }
    out
}

/// Displacement history of the first mode with a weak alpha-dependent drift.
fn history(alpha: f64, coupling: f64, rng: &mut SimpleRng) -> String {
    let omega = (2.0 * 16.0f64).sqrt();
    let steps = 400;
    let t_end = 10.0 * PI;
    table((0..=steps).map(|i| {
        let t = t_end * i as f64 / steps as f64;
        let drift = 1.0 + 0.02 * alpha * (t / t_end);
        let x = drift * (omega * t).sin() / omega * coupling.min(1.0);
        (t, x + rng.jitter(1e-3))
    }))
}

/// Chain profile at a fraction of the period.
fn snapshot(n: u32, alpha: f64, fraction: f64, rng: &mut SimpleRng) -> String {
    table((0..=n).map(|i| {
        let s = i as f64 / n as f64;
        let base = (PI * s).sin() * (2.0 * PI * fraction).cos();
        let bend = 0.05 * alpha * (2.0 * PI * s).sin() * fraction;
        (s, base + bend + rng.jitter(1e-3))
    }))
}

fn write(dir: &Path, run: &RunId, kind: SeriesKind, text: &str) -> Result<()> {
    let path = dir.join(run.file_name(kind));
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let dir = Path::new("data");
    fs::create_dir_all(dir).context("creating data directory")?;

    let fractions = [0.25, 0.5, 0.75, 1.0];
    let mut written = 0usize;

    // Single-mode check.
    let single = RunId::from_params("fput", 1, 0.0, 1.0);
    write(dir, &single, SeriesKind::History, &history(0.0, 1.0, &mut rng))?;
    written += 1;

    // Full linear grid, partial nonlinear grid, negative alpha left unrun.
    let campaigns: [(f64, f64, &[u32]); 2] = [(0.0, 1.0, &[8, 16, 32]), (0.1, 0.5, &[8, 16])];
    for (alpha_per_n, coupling, resolutions) in campaigns {
        for &n in resolutions {
            let alpha = alpha_per_n * n as f64;
            let run = RunId::from_params("fput", n, alpha, coupling);
            write(dir, &run, SeriesKind::History, &history(alpha, coupling, &mut rng))?;
            written += 1;
            for (tag, &fraction) in SnapshotTag::ALL.iter().zip(&fractions) {
                // Sparse runs stop before the full period.
                if alpha > 0.0 && *tag == SnapshotTag::Full {
                    continue;
                }
                write(dir, &run, SeriesKind::Snapshot(*tag), &snapshot(n, alpha, fraction, &mut rng))?;
                written += 1;
            }
        }
    }

    // Unstable run: blew up after the first capture.
    let unstable = RunId::from_params("fput", 32, 3.2, 0.9);
    write(
        dir,
        &unstable,
        SeriesKind::Snapshot(SnapshotTag::Quarter),
        &snapshot(32, 3.2, 0.25, &mut rng),
    )?;
    write(dir, &unstable, SeriesKind::Snapshot(SnapshotTag::Half), "")?;
    write(dir, &unstable, SeriesKind::History, "0.0 0.0\n")?;
    written += 3;

    println!("Wrote {written} files to {}", dir.display());
    Ok(())
}
