//! Replay an operator event script against an in-memory mission map.
//!
//! Prints the resulting waypoints, geofence and rally points as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use gcs_cli::script::{self, Script};
use gcs_core::{InMemorySurface, MapConfig, MissionMap, TileSources};
use std::fs;

/// Replay a mission script and print the resulting collections
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the JSON script
    script: String,

    /// Tile sources file (defaults to GCS_MAP_SOURCES or map_sources.json)
    #[arg(long)]
    sources: Option<String>,

    /// Also dump the rendered surface (markers, paths, popup)
    #[arg(long)]
    surface: bool,
}

fn main() -> Result<()> {
    gcs_cli::init_tracing("gcs_core=info")?;
    let args = Args::parse();

    let config = MapConfig::from_env();
    let sources_path = args
        .sources
        .clone()
        .unwrap_or_else(|| config.tile_sources_path.clone());
    let tile_sources = TileSources::load(&sources_path)
        .with_context(|| format!("loading tile sources from {}", sources_path))?;

    let raw = fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script))?;
    let script = Script::from_json(&raw)?;
    tracing::info!("Replaying {} events from {}", script.events.len(), args.script);

    let mut map = MissionMap::with_tile_sources(InMemorySurface::new(), config, tile_sources);
    let rejected = script::replay(&mut map, &script);
    if !rejected.is_empty() {
        eprintln!("{} event(s) rejected", rejected.len());
    }

    let report = script::report(&map, rejected);
    println!("{}", serde_json::to_string_pretty(&report)?);

    if args.surface {
        println!("{}", serde_json::to_string_pretty(map.surface())?);
    }
    Ok(())
}
