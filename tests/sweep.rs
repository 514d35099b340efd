use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use sweep_plotter::data::loader::SeriesLoader;
use sweep_plotter::data::model::{RunId, SeriesKind, SnapshotTag};
use sweep_plotter::data::resolver::PathResolver;
use sweep_plotter::data::storage::LocalStorage;
use sweep_plotter::plot::sink::OutputSink;
use sweep_plotter::plot::{CanvasOutcome, GridRequest, GridRow, PlotComposer};
use sweep_plotter::sweep::{self, default_requests, SweepSummary, DEFAULT_RESOLUTIONS};

fn composer<'a>(storage: &'a LocalStorage, work: &Path) -> PlotComposer<'a> {
    let loader = SeriesLoader::new(PathResolver::for_workspace(storage, work, "data"));
    PlotComposer::new(loader, OutputSink::new(storage, work, "data")).with_reference_samples(200)
}

fn sine_table(n: usize) -> String {
    (0..n)
        .map(|i| {
            let t = 2.0 * PI * i as f64 / n as f64;
            format!("{t} {}\n", t.sin())
        })
        .collect()
}

fn write_run(dir: &Path, run: &RunId, tags: &[SnapshotTag], history: bool) {
    for tag in tags {
        fs::write(dir.join(run.file_name(SeriesKind::Snapshot(*tag))), sine_table(17)).unwrap();
    }
    if history {
        fs::write(dir.join(run.file_name(SeriesKind::History)), sine_table(64)).unwrap();
    }
}

#[test]
fn sweep_writes_into_data_dir_and_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp.path();
    let data = work.join("data");
    fs::create_dir(&data).unwrap();

    write_run(&data, &RunId::new("fput_n-1_alpha-0.0_C1.0"), &[], true);
    write_run(&data, &RunId::new("fput_n-8_alpha-0.0_C1.0"), &SnapshotTag::ALL, true);
    // Data split across both locations is still found.
    write_run(work, &RunId::new("fput_n-32_alpha-0.0_C1.0"), &[SnapshotTag::Half], false);
    write_run(&data, &RunId::new("fput_n-32_alpha-3.2_C0.9"), &[SnapshotTag::Quarter], false);

    let storage = LocalStorage;
    let requests = default_requests(&DEFAULT_RESOLUTIONS);
    let summary = sweep::run(&composer(&storage, work), &requests);
    assert_eq!(
        summary,
        SweepSummary {
            saved: 3,
            skipped: 2,
            failed: 0
        }
    );

    for name in ["plot_a_comparison.png", "plot_b_linear.png", "plot_d_C0.9.png"] {
        assert!(data.join(name).is_file(), "{name} missing");
        assert!(!work.join(name).exists(), "{name} written outside data dir");
    }
    assert!(!data.join("plot_c_nonlinear.png").exists());
    assert!(!data.join("plot_e_negative.png").exists());

    let first = fs::read(data.join("plot_b_linear.png")).unwrap();
    sweep::run(&composer(&storage, work), &requests);
    let second = fs::read(data.join("plot_b_linear.png")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn without_data_dir_output_goes_to_working_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp.path();
    write_run(work, &RunId::new("fput_n-32_alpha-3.2_C0.9"), &[], true);

    let storage = LocalStorage;
    let summary = sweep::run(&composer(&storage, work), &default_requests(&DEFAULT_RESOLUTIONS));
    assert_eq!(summary.saved, 1);
    assert!(work.join("plot_d_C0.9.png").is_file());
}

#[test]
fn all_absent_grid_writes_no_file() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp.path();
    fs::create_dir(work.join("data")).unwrap();
    // Present but empty and malformed files count as absent.
    fs::write(work.join("data").join("g8_history.dat"), "").unwrap();
    fs::write(work.join("data").join("g16_snap_T4.dat"), "1 2 3\n").unwrap();

    let req = GridRequest {
        title: "Empty".into(),
        rows: [8, 16, 32]
            .into_iter()
            .map(|n| GridRow {
                resolution: n,
                run: RunId::new(format!("g{n}")),
            })
            .collect(),
        output: "empty_grid.png".into(),
    };
    let storage = LocalStorage;
    assert_eq!(composer(&storage, work).grid(&req), CanvasOutcome::Skipped);
    assert!(!work.join("data").join("empty_grid.png").exists());
    assert!(!work.join("empty_grid.png").exists());
}

#[test]
fn single_row_history_still_produces_a_canvas() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp.path();
    fs::write(work.join("lonely_history.dat"), "3.0 4.0\n").unwrap();

    let storage = LocalStorage;
    let loader = SeriesLoader::new(PathResolver::for_workspace(&storage, work, "data"));
    let series = loader.load("lonely_history.dat").unwrap();
    assert_eq!((series.x(), series.y()), (&[3.0][..], &[4.0][..]));

    let req = sweep_plotter::plot::StabilityRequest {
        title: "Lonely".into(),
        run: RunId::new("lonely"),
        output: "lonely.png".into(),
    };
    let outcome = composer(&storage, work).stability(&req);
    assert_eq!(outcome, CanvasOutcome::Saved(work.join("lonely.png")));
    let img = image::open(work.join("lonely.png")).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (1200, 500));
}
