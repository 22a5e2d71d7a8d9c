//! Manage the named tile sources offered by the map.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gcs_core::{MapConfig, TileSources};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Tile sources file (defaults to GCS_MAP_SOURCES or map_sources.json)
    #[arg(long)]
    file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every source
    List,
    /// Register a custom source
    Add { name: String, url: String },
}

fn main() -> Result<()> {
    gcs_cli::init_tracing("gcs_core=info")?;
    let args = Args::parse();
    let path = args
        .file
        .unwrap_or_else(|| MapConfig::from_env().tile_sources_path);

    let mut sources = TileSources::load(&path)?;
    match args.command {
        Command::List => {
            for (name, url) in sources.iter() {
                println!("{:<20} {}", name, url);
            }
        }
        Command::Add { name, url } => {
            sources.add(&name, &url)?;
            sources.save(&path)?;
            println!("Added '{}' to {}", name.trim(), path);
        }
    }
    Ok(())
}
