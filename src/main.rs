use crate::config::Config;
use crate::tracker::Tracker;
use clap::{ArgAction, Parser};
use eyre::Error;
use std::path::PathBuf;
use tokio::io::{BufReader, stdin};
use tracing::{Level, info};

mod checks;
mod command;
mod config;
mod display;
mod model;
mod operations;
mod repl;
mod tracker;

#[derive(Parser)]
#[command(author, version, about)]
struct Options {
    /// Use FILE instead of tracker.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Database URL, overriding the configuration file
    #[arg(short, long, value_name = "URL")]
    database: Option<String>,
    /// Create missing tables before accepting commands
    #[arg(long)]
    init_schema: bool,
    /// Set verbosity level
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    color_eyre::install()?;
    let options = Options::parse();
    let level = match options.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let config = Config::load_or_default(options.config.as_deref())?;
    let url = options.database.unwrap_or(config.database.url);
    let mut tracker = Tracker::connect(&url).await?;
    info!("project tracker ready");
    if options.init_schema {
        tracker.create_schema().await?;
    }
    let result = repl::run(
        &mut tracker,
        BufReader::new(stdin()),
        &mut std::io::stdout(),
        &config.repl.prompt,
    )
    .await;
    let closed = tracker.close().await;
    result?;
    closed
}
