use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use directories::ProjectDirs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use postbox::config::PostboxConfig;
use postbox::controller::ViewController;
use postbox::error::Result;
use postbox::price::{PriceFeed, SpotPriceFeed};
use postbox::service::http::HttpService;
use postbox::surface::TerminalSurface;

mod args;
use args::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "postbox=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let service_url = cli.url.as_deref().unwrap_or(&config.service_url);

    let service = Arc::new(HttpService::new(service_url));
    let surface = Arc::new(TerminalSurface);

    let mut controller = ViewController::new(service, surface)
        .with_refresh_delay(Duration::from_millis(config.refresh_delay_ms));

    if !cli.no_price {
        if let Some(pair) = &config.price_pair {
            let feed: Arc<dyn PriceFeed> = Arc::new(SpotPriceFeed::new(pair));
            controller = controller.with_price_feed(feed);
        }
    }

    if let Some(command) = &cli.command {
        controller.handle(command).await;
        return Ok(());
    }

    // Matches the original surface: show the list before the first prompt.
    if !cli.no_initial_list {
        controller.show_list().await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        match lines.next_line().await? {
            Some(line) => controller.handle(line.trim()).await,
            None => break, // EOF ends the session
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<PostboxConfig> {
    let config_dir = match &cli.config_dir {
        Some(dir) => Some(dir.clone()),
        None => {
            ProjectDirs::from("com", "postbox", "postbox").map(|d| d.config_dir().to_path_buf())
        }
    };

    match config_dir {
        Some(dir) => PostboxConfig::load(dir),
        None => Ok(PostboxConfig::default()),
    }
}
