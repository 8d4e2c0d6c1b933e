use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinematch::{
    cli::{AppState, Session},
    config::Config,
    db::json::JsonFile,
};

/// Command-line arguments; each overrides the matching environment variable
#[derive(Parser, Debug)]
#[command(name = "cinematch")]
#[command(about = "Console movie recommendations")]
#[command(version)]
struct Args {
    /// JSON file holding registered users
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Default number of recommendations to show
    #[arg(short, long)]
    max_results: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(data_file) = args.data_file {
        config.data_file = data_file;
    }
    if let Some(max_results) = args.max_results {
        config.max_results = max_results;
    }

    // Logs go to stderr so they never interleave with the menus
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let persistence = JsonFile::new(&config.data_file);
    let store = persistence
        .load()
        .with_context(|| format!("Failed to load {}", config.data_file.display()))?;

    let state = AppState::new(store, persistence, config.max_results);

    let stdin = io::stdin();
    let mut session = Session::new(state, stdin.lock(), io::stdout());
    session.run().context("Session failed")?;

    Ok(())
}
