mod cli;

use anyhow::Result;
use clap::Parser;
use log::info;

use sweep_plotter::config::SweepConfig;
use sweep_plotter::data::loader::SeriesLoader;
use sweep_plotter::data::resolver::PathResolver;
use sweep_plotter::data::storage::LocalStorage;
use sweep_plotter::plot::fonts;
use sweep_plotter::plot::sink::OutputSink;
use sweep_plotter::plot::PlotComposer;
use sweep_plotter::sweep;

use cli::Args;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::default(),
    };
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if args.font.is_some() {
        config.font = args.font;
    }

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let work_dir = args.dir;
    info!("Working directory: {}", work_dir.display());
    fonts::init(config.font.as_deref());

    let storage = LocalStorage;
    let loader = SeriesLoader::new(PathResolver::for_workspace(
        &storage,
        &work_dir,
        &config.data_dir,
    ));
    let sink = OutputSink::new(&storage, &work_dir, &config.data_dir);
    let composer =
        PlotComposer::new(loader, sink).with_reference_samples(config.reference_samples);

    let summary = sweep::run(&composer, &config.canvases);
    println!(
        "{} saved, {} skipped, {} failed",
        summary.saved, summary.skipped, summary.failed
    );
    Ok(())
}
