use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stayr::Config;

/// Stayr - server-rendered home listing marketplace
#[derive(Parser)]
#[command(name = "stayr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path, overriding the default discovery order
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.toml if none exists
    Init,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Init)) {
        if Config::create_default_if_missing()? {
            println!("Created config.toml");
        } else {
            println!("config.toml already exists");
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    stayr::init_tracing(&config);

    let worker_threads = config.general.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(stayr::run(config))
}
