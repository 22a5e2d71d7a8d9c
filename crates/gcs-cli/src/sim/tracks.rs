//! Simulated drone tracks for feeding the live position marker.

use gcs_core::{LatLon, Point};
use std::f64::consts::PI;
use std::time::Duration;

const METERS_PER_DEG_LAT: f64 = 111_320.0;
const MIN_RADIUS_M: f64 = 1.0;
const MIN_SPEED_MPS: f64 = 0.1;
const MAX_SPEED_MPS: f64 = 1_000.0;
const MIN_RATE_HZ: f64 = 0.01;
const MAX_RATE_HZ: f64 = 100.0;

/// Interval between position updates, or `None` for a non-positive or
/// non-finite rate. Rates are clamped to 0.01..=100 Hz.
pub fn update_period(rate_hz: f64) -> Option<Duration> {
    if !rate_hz.is_finite() || rate_hz <= 0.0 {
        return None;
    }
    Some(Duration::from_secs_f64(1.0 / rate_hz.clamp(MIN_RATE_HZ, MAX_RATE_HZ)))
}

fn clamp_speed(speed_mps: f64) -> f64 {
    if speed_mps.is_nan() {
        return MIN_SPEED_MPS;
    }
    speed_mps.clamp(MIN_SPEED_MPS, MAX_SPEED_MPS)
}

/// Something that yields a drone position over time.
pub trait DroneTrack {
    /// Position at `t` seconds from start.
    fn position(&self, t: f64) -> LatLon;

    /// Seconds until the track is finished, if it ever is.
    fn duration(&self) -> Option<f64> {
        None
    }
}

/// Endless circle around a center point.
pub struct CircularTrack {
    pub center: LatLon,
    pub radius_m: f64,
    period: f64,
}

impl CircularTrack {
    /// Radii below 1 m (or non-finite) are raised to 1 m.
    pub fn new(center: LatLon, radius_m: f64, speed_mps: f64) -> Self {
        let radius_m = if radius_m.is_finite() {
            radius_m.max(MIN_RADIUS_M)
        } else {
            MIN_RADIUS_M
        };
        let period = 2.0 * PI * radius_m / clamp_speed(speed_mps);
        Self {
            center,
            radius_m,
            period,
        }
    }

    pub fn period(&self) -> f64 {
        self.period
    }
}

impl DroneTrack for CircularTrack {
    fn position(&self, t: f64) -> LatLon {
        let angle_rad = 2.0 * PI * t / self.period;
        let [lat, lon] = self.center;
        let lat_offset = (self.radius_m / METERS_PER_DEG_LAT) * angle_rad.cos();
        let lon_offset =
            (self.radius_m / (METERS_PER_DEG_LAT * lat.to_radians().cos())) * angle_rad.sin();
        [lat + lat_offset, lon + lon_offset]
    }
}

/// Flies the waypoint polyline in order at constant speed.
pub struct MissionTrack {
    legs: Vec<(LatLon, LatLon, f64)>,
    speed_mps: f64,
}

impl MissionTrack {
    pub fn new(waypoints: &[Point], speed_mps: f64) -> Self {
        let legs = waypoints
            .windows(2)
            .map(|pair| {
                let (a, b) = (pair[0].lat_lon(), pair[1].lat_lon());
                (a, b, haversine_distance(a, b))
            })
            .collect();
        Self {
            legs,
            speed_mps: clamp_speed(speed_mps),
        }
    }

    fn total_distance_m(&self) -> f64 {
        self.legs.iter().map(|(_, _, d)| d).sum()
    }
}

impl DroneTrack for MissionTrack {
    fn position(&self, t: f64) -> LatLon {
        let mut remaining = (t * self.speed_mps).max(0.0);
        for (from, to, distance_m) in &self.legs {
            if remaining <= *distance_m {
                let progress = if *distance_m > 0.0 {
                    remaining / distance_m
                } else {
                    1.0
                };
                return [
                    from[0] + progress * (to[0] - from[0]),
                    from[1] + progress * (to[1] - from[1]),
                ];
            }
            remaining -= distance_m;
        }
        self.legs.last().map(|(_, to, _)| *to).unwrap_or([0.0, 0.0])
    }

    fn duration(&self) -> Option<f64> {
        Some(self.total_distance_m() / self.speed_mps)
    }
}

/// Great-circle distance in meters.
fn haversine_distance(a: LatLon, b: LatLon) -> f64 {
    const R: f64 = 6_371_000.0;

    let phi1 = a[0].to_radians();
    let phi2 = b[0].to_radians();
    let dphi = (b[0] - a[0]).to_radians();
    let dlambda = (b[1] - a[1]).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * R * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_returns_to_start() {
        let track = CircularTrack::new([41.79, 44.75], 200.0, 10.0);
        let start = track.position(0.0);
        let lap = track.position(track.period());
        assert!((start[0] - lap[0]).abs() < 1e-6);
        assert!((start[1] - lap[1]).abs() < 1e-6);
    }

    #[test]
    fn degenerate_circle_stays_finite() {
        let cases = [
            (0.0, 10.0),
            (-5.0, 10.0),
            (f64::NAN, 10.0),
            (200.0, f64::INFINITY),
        ];
        for (radius, speed) in cases {
            let track = CircularTrack::new([41.79, 44.75], radius, speed);
            assert!(track.period() > 0.0);
            let [lat, lon] = track.position(3.0);
            assert!(lat.is_finite() && lon.is_finite());
        }
    }

    #[test]
    fn update_period_rejects_bad_rates() {
        assert_eq!(update_period(f64::INFINITY), None);
        assert_eq!(update_period(f64::NAN), None);
        assert_eq!(update_period(0.0), None);
        assert_eq!(update_period(-1.0), None);
        assert_eq!(update_period(2.0), Some(Duration::from_millis(500)));
        let fastest = update_period(1e9).unwrap();
        assert!(fastest > Duration::ZERO && fastest <= Duration::from_millis(11));
    }

    #[test]
    fn mission_track_ends_on_last_waypoint() {
        let waypoints = vec![
            Point::new(41.79, 44.75),
            Point::new(41.80, 44.75),
            Point::new(41.80, 44.76),
        ];
        let track = MissionTrack::new(&waypoints, 10.0);
        let duration = track.duration().unwrap();
        assert!(duration > 0.0);

        assert_eq!(track.position(0.0), [41.79, 44.75]);
        let end = track.position(duration + 60.0);
        assert!((end[0] - 41.80).abs() < 1e-9);
        assert!((end[1] - 44.76).abs() < 1e-9);
    }

    #[test]
    fn single_waypoint_has_no_legs() {
        let track = MissionTrack::new(&[Point::new(1.0, 2.0)], 10.0);
        assert_eq!(track.duration(), Some(0.0));
    }
}
