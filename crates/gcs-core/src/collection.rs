//! Ordered point collection with paired markers and a derived path.
//!
//! Markers are matched to points by position in two parallel vectors.
//! Handlers never capture an index: they carry the [`MarkerId`] and the
//! current index is looked up when the handler runs, so a delete only has
//! to relabel the markers that shifted.

use crate::error::{MissionError, Result};
use crate::models::{Category, CollectionStyle, LatLon, PathRule, Point};
use crate::surface::{MapSurface, MarkerIcon, MarkerId, PathId, PathShape};

/// Minimum vertex count for a polygon to be drawn closed.
pub const POLYGON_MIN_VERTICES: usize = 3;

pub struct PointCollection {
    category: Category,
    style: CollectionStyle,
    points: Vec<Point>,
    markers: Vec<MarkerId>,
    path: PathId,
}

impl PointCollection {
    /// Create an empty collection and its (empty) path on the surface.
    pub fn new<S: MapSurface + ?Sized>(
        category: Category,
        style: CollectionStyle,
        surface: &mut S,
    ) -> Self {
        let path = surface.add_path(style.color);
        Self {
            category,
            style,
            points: Vec::new(),
            markers: Vec::new(),
            path,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn style(&self) -> &CollectionStyle {
        &self.style
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn markers(&self) -> &[MarkerId] {
        &self.markers
    }

    pub fn path_id(&self) -> PathId {
        self.path
    }

    /// Current index of a marker, resolved at call time.
    pub fn index_of(&self, marker: MarkerId) -> Option<usize> {
        self.markers.iter().position(|m| *m == marker)
    }

    /// Append a point and its numbered marker. Returns the new index.
    pub fn add<S: MapSurface + ?Sized>(&mut self, surface: &mut S, point: Point) -> usize {
        let point = self.style.normalize(point);
        let index = self.points.len();
        let marker = surface.add_marker(
            point.lat_lon(),
            MarkerIcon::numbered(index, self.style.color),
            true,
        );
        self.points.push(point);
        self.markers.push(marker);
        tracing::debug!(
            "{} {} added at ({}, {}) as {}",
            self.category,
            index + 1,
            point.lat,
            point.lon,
            marker
        );
        self.redraw_path(surface);
        index
    }

    /// Replace the point at `index` and move its marker.
    pub fn update<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        index: usize,
        point: Point,
    ) -> Result<()> {
        self.check_index(index)?;
        let point = self.style.normalize(point);
        self.points[index] = point;
        surface.move_marker(self.markers[index], point.lat_lon());
        tracing::debug!("{} {} updated to ({}, {})", self.category, index + 1, point.lat, point.lon);
        self.redraw_path(surface);
        Ok(())
    }

    /// Remove the point at `index` and relabel every marker after it.
    pub fn delete<S: MapSurface + ?Sized>(&mut self, surface: &mut S, index: usize) -> Result<Point> {
        self.check_index(index)?;
        let point = self.points.remove(index);
        let marker = self.markers.remove(index);
        surface.remove_marker(marker);

        for (i, marker) in self.markers.iter().enumerate().skip(index) {
            surface.set_marker_icon(*marker, MarkerIcon::numbered(i, self.style.color));
        }

        tracing::debug!(
            "{} {} deleted, {} remaining",
            self.category,
            index + 1,
            self.points.len()
        );
        self.redraw_path(surface);
        Ok(point)
    }

    /// Move a dragged marker's point without touching its label.
    pub fn drag<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        marker: MarkerId,
        lat: f64,
        lon: f64,
    ) -> Result<usize> {
        let index = self
            .index_of(marker)
            .ok_or(MissionError::UnknownMarker(marker))?;
        let point = &mut self.points[index];
        point.lat = lat;
        point.lon = lon;
        surface.move_marker(marker, [lat, lon]);
        self.redraw_path(surface);
        Ok(index)
    }

    pub fn clear<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        for marker in self.markers.drain(..) {
            surface.remove_marker(marker);
        }
        self.points.clear();
        self.redraw_path(surface);
    }

    /// Owned snapshot of the points in order.
    pub fn get_all(&self) -> Vec<Point> {
        self.points.clone()
    }

    /// Replace every point, as `clear` followed by `add` for each.
    pub fn set_all<S, I>(&mut self, surface: &mut S, points: I)
    where
        S: MapSurface + ?Sized,
        I: IntoIterator<Item = Point>,
    {
        self.clear(surface);
        for point in points {
            self.add(surface, point);
        }
    }

    /// Recompute the rendered path from the current points.
    pub fn redraw_path<S: MapSurface + ?Sized>(&self, surface: &mut S) {
        let (shape, coords) = path_geometry(self.style.path_rule, &self.points);
        surface.set_path(self.path, shape, &coords);
    }

    /// Remove every marker and the path from the surface.
    pub fn teardown<S: MapSurface + ?Sized>(mut self, surface: &mut S) {
        for marker in self.markers.drain(..) {
            surface.remove_marker(marker);
        }
        surface.remove_path(self.path);
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.points.len() {
            Ok(())
        } else {
            tracing::warn!(
                "{} index {} rejected, collection holds {}",
                self.category,
                index,
                self.points.len()
            );
            Err(MissionError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
        }
    }
}

/// Shape and coordinates drawn for a set of points under `rule`.
pub fn path_geometry(rule: PathRule, points: &[Point]) -> (PathShape, Vec<LatLon>) {
    let mut coords: Vec<LatLon> = points.iter().map(Point::lat_lon).collect();
    match rule {
        PathRule::Polyline => (PathShape::Polyline, coords),
        PathRule::Polygon if coords.len() >= POLYGON_MIN_VERTICES => {
            coords.push(coords[0]);
            (PathShape::Polygon, coords)
        }
        PathRule::Polygon => (PathShape::Polyline, coords),
        PathRule::Hidden => (PathShape::Polyline, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::InMemorySurface;

    fn waypoints(surface: &mut InMemorySurface) -> PointCollection {
        PointCollection::new(Category::Waypoint, Category::Waypoint.style(15.0), surface)
    }

    fn assert_paired(collection: &PointCollection, surface: &InMemorySurface) {
        assert_eq!(collection.points.len(), collection.markers.len());
        for (i, marker) in collection.markers().iter().enumerate() {
            assert_eq!(surface.label(*marker), Some(i + 1));
            let position = surface.marker(*marker).unwrap().position;
            assert_eq!(position, collection.points[i].lat_lon());
        }
    }

    #[test]
    fn add_labels_markers_in_order() {
        let mut surface = InMemorySurface::new();
        let mut wps = waypoints(&mut surface);

        assert_eq!(wps.add(&mut surface, Point::new(1.0, 2.0)), 0);
        assert_eq!(wps.add(&mut surface, Point::new(3.0, 4.0).with_altitude(30.0)), 1);

        assert_paired(&wps, &surface);
        assert_eq!(wps.point(0).unwrap().altitude_m, Some(15.0));
        assert_eq!(wps.point(1).unwrap().altitude_m, Some(30.0));

        let path = surface.path(wps.path_id()).unwrap();
        assert_eq!(path.coords, vec![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn update_out_of_range_is_rejected() {
        let mut surface = InMemorySurface::new();
        let mut wps = waypoints(&mut surface);
        wps.add(&mut surface, Point::new(1.0, 2.0));

        let err = wps.update(&mut surface, 3, Point::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, MissionError::IndexOutOfRange { index: 3, len: 1 }));
        assert_eq!(wps.get_all(), vec![Point::new(1.0, 2.0).with_altitude(15.0)]);
    }

    #[test]
    fn delete_relabels_and_handlers_follow_new_index() {
        let mut surface = InMemorySurface::new();
        let mut wps = waypoints(&mut surface);
        for i in 0..4 {
            wps.add(&mut surface, Point::new(i as f64, i as f64));
        }

        let removed = wps.delete(&mut surface, 1).unwrap();
        assert_eq!(removed.lat, 1.0);
        assert_eq!(surface.marker_count(), 3);
        assert_paired(&wps, &surface);

        // The marker that used to be fourth now resolves to index 2
        let marker = wps.markers()[2];
        assert_eq!(wps.index_of(marker), Some(2));
        let index = wps.drag(&mut surface, marker, 9.0, 9.5).unwrap();
        assert_eq!(index, 2);
        assert_eq!(wps.point(2).unwrap().lat_lon(), [9.0, 9.5]);
        assert_eq!(wps.point(1).unwrap().lat_lon(), [2.0, 2.0]);
        assert_paired(&wps, &surface);
    }

    #[test]
    fn delete_out_of_range_keeps_state() {
        let mut surface = InMemorySurface::new();
        let mut wps = waypoints(&mut surface);
        wps.add(&mut surface, Point::new(1.0, 2.0));

        assert!(wps.delete(&mut surface, 1).is_err());
        assert_eq!(wps.len(), 1);
        assert_paired(&wps, &surface);
    }

    #[test]
    fn drag_keeps_altitude_and_labels() {
        let mut surface = InMemorySurface::new();
        let mut wps = waypoints(&mut surface);
        wps.add(&mut surface, Point::new(1.0, 2.0).with_altitude(20.0));
        wps.add(&mut surface, Point::new(3.0, 4.0));

        let marker = wps.markers()[1];
        wps.drag(&mut surface, marker, 5.0, 6.0).unwrap();

        assert_eq!(wps.point(0), Some(&Point::new(1.0, 2.0).with_altitude(20.0)));
        assert_eq!(wps.point(1), Some(&Point::new(5.0, 6.0).with_altitude(15.0)));
        assert_paired(&wps, &surface);
    }

    #[test]
    fn drag_unknown_marker_fails() {
        let mut surface = InMemorySurface::new();
        let mut wps = waypoints(&mut surface);
        let err = wps.drag(&mut surface, MarkerId(999), 1.0, 1.0).unwrap_err();
        assert!(matches!(err, MissionError::UnknownMarker(MarkerId(999))));
    }

    #[test]
    fn clear_removes_markers_and_path() {
        let mut surface = InMemorySurface::new();
        let mut wps = waypoints(&mut surface);
        wps.add(&mut surface, Point::new(1.0, 2.0));
        wps.add(&mut surface, Point::new(3.0, 4.0));

        wps.clear(&mut surface);
        assert!(wps.is_empty());
        assert_eq!(surface.marker_count(), 0);
        assert!(surface.path(wps.path_id()).unwrap().coords.is_empty());
    }

    #[test]
    fn polygon_closes_from_three_vertices() {
        let pts: Vec<Point> = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        ];

        let (shape, coords) = path_geometry(PathRule::Polygon, &pts[..2]);
        assert_eq!(shape, PathShape::Polyline);
        assert_eq!(coords.len(), 2);

        let (shape, coords) = path_geometry(PathRule::Polygon, &pts);
        assert_eq!(shape, PathShape::Polygon);
        assert_eq!(coords.len(), 4);
        assert_eq!(coords.first(), coords.last());
    }

    #[test]
    fn hidden_path_never_draws() {
        let (_, coords) = path_geometry(PathRule::Hidden, &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(coords.is_empty());
    }

    #[test]
    fn teardown_removes_everything() {
        let mut surface = InMemorySurface::new();
        let mut wps = waypoints(&mut surface);
        wps.add(&mut surface, Point::new(1.0, 2.0));
        let path = wps.path_id();

        wps.teardown(&mut surface);
        assert_eq!(surface.marker_count(), 0);
        assert!(surface.path(path).is_none());
    }
}
