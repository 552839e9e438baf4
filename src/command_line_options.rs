use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CommandLineOptions {
    /// YAML file with `tree` and `galaxy` sections. Defaults are used
    /// for everything if omitted.
    pub parameter_file_path: Option<PathBuf>,
    #[clap(short, parse(from_occurrences))]
    pub verbosity: usize,
    #[clap(long)]
    pub num_stars: Option<usize>,
    #[clap(long)]
    pub seed: Option<u64>,
    #[clap(long)]
    pub no_render: bool,
}
