use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Directory holding the run outputs (and/or its data subdirectory)
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Name of the data subdirectory (overrides config)
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Sweep config (JSON); the built-in campaign is used when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// TrueType font for captions and labels (overrides config)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Print the effective config as JSON and exit
    #[arg(long, default_value_t = false)]
    pub print_config: bool,
}
