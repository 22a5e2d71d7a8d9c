//! GCS CLI - Command line tools for the mission map.
//!
//! - mission_replay: replay an operator event script and print the result
//! - drone_track: feed a simulated track into the drone marker
//! - tile_sources: list and add named tile layers

pub mod script;
pub mod sim;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the fmt subscriber, honoring `RUST_LOG` on top of `default_directive`.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(default_directive.parse()?))
        .init();
    Ok(())
}
