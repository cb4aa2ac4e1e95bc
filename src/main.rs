use std::path::PathBuf;

use clap::Parser;
use linkbot::app::App;
use linkbot::config::Config;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "linkbot", about = "Chat-driven trade queue for console link trading")]
struct Cli {
    /// Path to the TOML config file. Defaults are used when the file is
    /// absent.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    config.init_logging();
    info!("linkbot starting");

    tokio::select! {
        result = App::run(config) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("linkbot stopped");
}
