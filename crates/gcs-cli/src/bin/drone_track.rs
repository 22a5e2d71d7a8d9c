//! Feed a simulated drone track into the live position marker.
//!
//! Flies either a circle around the map center or the waypoints from a
//! mission script, updating the marker at a fixed rate.

use anyhow::Result;
use clap::Parser;
use gcs_cli::script::Script;
use gcs_cli::sim::{update_period, CircularTrack, DroneTrack, MissionTrack};
use gcs_core::{InMemorySurface, MapConfig, MissionMap};
use tokio::time;

/// Drive the drone marker along a simulated track
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Mission script whose waypoints the drone follows (circle if absent)
    #[arg(long)]
    mission: Option<String>,

    /// Circle radius in meters
    #[arg(long, default_value_t = 200.0)]
    radius: f64,

    /// Ground speed in m/s
    #[arg(long, default_value_t = 10.0)]
    speed: f64,

    /// Duration in seconds (mission tracks stop at the last waypoint)
    #[arg(long, default_value_t = 60)]
    duration: u64,

    /// Update rate in Hz
    #[arg(long, default_value_t = 1.0)]
    rate: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    gcs_cli::init_tracing("gcs_core=info")?;
    let args = Args::parse();
    let period = update_period(args.rate)
        .ok_or_else(|| anyhow::anyhow!("--rate must be a positive finite number"))?;
    anyhow::ensure!(
        args.radius.is_finite() && args.radius > 0.0,
        "--radius must be a positive finite number"
    );

    let config = MapConfig::from_env();
    let center = config.center;
    let mut map = MissionMap::new(InMemorySurface::new(), config);

    let track: Box<dyn DroneTrack> = match &args.mission {
        Some(path) => {
            let script = Script::from_json(&std::fs::read_to_string(path)?)?;
            map.set_waypoints(script.waypoints);
            Box::new(MissionTrack::new(&map.get_waypoints(), args.speed))
        }
        None => Box::new(CircularTrack::new(center, args.radius, args.speed)),
    };

    let limit = match track.duration() {
        Some(end) => end.min(args.duration as f64),
        None => args.duration as f64,
    };
    println!("Tracking drone for {:.0}s at {}Hz", limit, args.rate);

    let start = time::Instant::now();
    let mut updates = 0u32;
    let mut interval = time::interval(period);

    loop {
        interval.tick().await;

        let elapsed = start.elapsed().as_secs_f64();
        if elapsed > limit {
            break;
        }

        let [lat, lon] = track.position(elapsed);
        map.set_drone_position(lat, lon);
        updates += 1;
        println!("[{:3}] drone at ({:.6}, {:.6})", updates, lat, lon);
    }

    println!("\nTrack complete. Sent {} position updates.", updates);
    Ok(())
}
