use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postbox")]
#[command(about = "Interactive client for a remote post-storage service", long_about = None)]
pub struct Cli {
    /// Base URL of the post-storage service (overrides config)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Directory containing config.json (defaults to the user config dir)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Run a single command and exit instead of starting the session
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,

    /// Disable the price feed plugin
    #[arg(long)]
    pub no_price: bool,

    /// Skip the initial post listing on startup
    #[arg(long)]
    pub no_initial_list: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
