//! Inline edit popup for a single point.

use crate::error::{MissionError, Result};
use crate::models::{Category, Point};
use crate::surface::MarkerId;
use serde::{Deserialize, Serialize};

/// Form contents as the operator sees and edits them.
///
/// The form is tied to a marker rather than an index so saving after the
/// collection changed resolves to the right point (or fails).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditForm {
    pub marker: MarkerId,
    pub category: Category,
    pub lat: String,
    pub lon: String,
    /// Present only for categories that carry altitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<String>,
}

impl EditForm {
    /// Prefill from a stored point.
    pub fn for_point(marker: MarkerId, category: Category, point: &Point) -> Self {
        Self {
            marker,
            category,
            lat: format!("{:.6}", point.lat),
            lon: format!("{:.6}", point.lon),
            altitude: point.altitude_m.map(|alt| alt.to_string()),
        }
    }

    /// Parse the fields into a point.
    ///
    /// Latitude and longitude must be finite numbers. For categories that
    /// carry altitude, a missing or unparsable altitude becomes 0.
    pub fn parse(&self) -> Result<Point> {
        let lat = parse_coordinate("latitude", &self.lat)?;
        let lon = parse_coordinate("longitude", &self.lon)?;
        let point = Point::new(lat, lon);

        if !self.category.carries_altitude() {
            return Ok(point);
        }
        let altitude_m = self.altitude.as_deref().map(parse_altitude).unwrap_or(0.0);
        Ok(point.with_altitude(altitude_m))
    }
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(MissionError::InvalidCoordinate {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_altitude(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|alt| alt.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(lat: &str, lon: &str, altitude: Option<&str>) -> EditForm {
        EditForm {
            marker: MarkerId(1),
            category: Category::Waypoint,
            lat: lat.to_string(),
            lon: lon.to_string(),
            altitude: altitude.map(str::to_string),
        }
    }

    #[test]
    fn prefill_formats_six_decimals() {
        let point = Point::new(41.790717005, 44.75805360).with_altitude(15.0);
        let form = EditForm::for_point(MarkerId(7), Category::Waypoint, &point);
        assert_eq!(form.lat, "41.790717");
        assert_eq!(form.lon, "44.758054");
        assert_eq!(form.altitude.as_deref(), Some("15"));

        let vertex = EditForm::for_point(MarkerId(8), Category::Geofence, &Point::new(1.0, 2.0));
        assert!(vertex.altitude.is_none());
    }

    #[test]
    fn altitude_falls_back_to_zero() {
        assert_eq!(form("1", "2", Some("abc")).parse().unwrap().altitude_m, Some(0.0));
        assert_eq!(form("1", "2", Some("")).parse().unwrap().altitude_m, Some(0.0));
        assert_eq!(form("1", "2", Some("NaN")).parse().unwrap().altitude_m, Some(0.0));
        assert_eq!(form("1", "2", Some(" 42.5 ")).parse().unwrap().altitude_m, Some(42.5));
        assert_eq!(form("1", "2", None).parse().unwrap().altitude_m, Some(0.0));
    }

    #[test]
    fn vertex_forms_never_produce_altitude() {
        let mut vertex = form("1", "2", Some("30"));
        vertex.category = Category::Geofence;
        assert_eq!(vertex.parse().unwrap().altitude_m, None);
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        let err = form("north", "2", None).parse().unwrap_err();
        assert!(matches!(err, MissionError::InvalidCoordinate { field: "latitude", .. }));

        let err = form("1", "NaN", None).parse().unwrap_err();
        assert!(matches!(err, MissionError::InvalidCoordinate { field: "longitude", .. }));

        assert!(form("1", "inf", None).parse().is_err());
    }
}
