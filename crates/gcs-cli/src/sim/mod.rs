//! Simulation helpers for the live drone marker.

mod tracks;

pub use tracks::{update_period, CircularTrack, DroneTrack, MissionTrack};
