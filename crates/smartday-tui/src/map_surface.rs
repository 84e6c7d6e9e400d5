//! Terminal implementation of the map surface.
//!
//! Markers are drawn on a ratatui canvas in lat/lng space; the open info
//! window renders as a popup next to the map. Construction and relayout only
//! manage viewport state, so they are infallible here, but the capability
//! contract keeps the fallible signature for widgets that do fail.

use smartday_core::error::Result;
use smartday_core::map::{Coordinate, MapSurface, MarkerId, PointOfInterest};

/// Info-window content for one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoContent {
    pub title: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
struct SurfaceMarker {
    id: MarkerId,
    coord: Coordinate,
    info: InfoContent,
}

/// Map viewport state rendered by the shell.
#[derive(Debug, Clone)]
pub struct TerminalMapSurface {
    constructed: bool,
    center: Coordinate,
    zoom: u8,
    markers: Vec<SurfaceMarker>,
    open_info: Option<MarkerId>,
    next_id: MarkerId,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl TerminalMapSurface {
    pub fn new() -> Self {
        Self {
            constructed: false,
            center: smartday_core::map::DEFAULT_CENTER,
            zoom: smartday_core::map::DEFAULT_ZOOM,
            markers: Vec::new(),
            open_info: None,
            next_id: 0,
            x_bounds: [0.0, 1.0],
            y_bounds: [0.0, 1.0],
        }
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Longitude bounds of the current viewport.
    pub fn x_bounds(&self) -> [f64; 2] {
        self.x_bounds
    }

    /// Latitude bounds of the current viewport.
    pub fn y_bounds(&self) -> [f64; 2] {
        self.y_bounds
    }

    /// Marker positions with their handles, in placement order.
    pub fn marker_positions(&self) -> impl Iterator<Item = (MarkerId, Coordinate)> + '_ {
        self.markers.iter().map(|m| (m.id, m.coord))
    }

    /// Handles and titles, in placement order (drives the marker list).
    pub fn marker_titles(&self) -> impl Iterator<Item = (MarkerId, &str)> + '_ {
        self.markers.iter().map(|m| (m.id, m.info.title.as_str()))
    }

    /// Content of the currently open info window, if any.
    pub fn open_info_content(&self) -> Option<&InfoContent> {
        let id = self.open_info?;
        self.markers
            .iter()
            .find(|m| m.id == id)
            .map(|m| &m.info)
    }

    pub fn open_marker(&self) -> Option<MarkerId> {
        self.open_info
    }

    /// Half-extent of the viewport in degrees for a zoom level.
    fn span(zoom: u8) -> f64 {
        0.003 * f64::from(1u32 << zoom.min(14))
    }

    fn fit_bounds(&mut self) {
        if self.markers.is_empty() {
            let span = Self::span(self.zoom);
            self.x_bounds = [self.center.lng - span, self.center.lng + span];
            self.y_bounds = [self.center.lat - span, self.center.lat + span];
            return;
        }
        let mut min_lng = f64::INFINITY;
        let mut max_lng = f64::NEG_INFINITY;
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        for marker in &self.markers {
            min_lng = min_lng.min(marker.coord.lng);
            max_lng = max_lng.max(marker.coord.lng);
            min_lat = min_lat.min(marker.coord.lat);
            max_lat = max_lat.max(marker.coord.lat);
        }
        // Pad so edge markers do not sit on the border.
        let pad_lng = ((max_lng - min_lng) * 0.1).max(0.005);
        let pad_lat = ((max_lat - min_lat) * 0.1).max(0.005);
        self.x_bounds = [min_lng - pad_lng, max_lng + pad_lng];
        self.y_bounds = [min_lat - pad_lat, max_lat + pad_lat];
    }
}

impl Default for TerminalMapSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for TerminalMapSurface {
    fn construct(&mut self, center: Coordinate, zoom: u8) -> Result<()> {
        self.center = center;
        self.zoom = zoom;
        self.constructed = true;
        self.fit_bounds();
        Ok(())
    }

    fn relayout(&mut self) {
        self.fit_bounds();
    }

    fn place_marker(&mut self, point: &PointOfInterest) -> MarkerId {
        self.next_id += 1;
        self.markers.push(SurfaceMarker {
            id: self.next_id,
            coord: point.coordinate(),
            info: InfoContent {
                title: point.name.clone(),
                phone: point.phone_display().to_string(),
            },
        });
        self.fit_bounds();
        self.next_id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.retain(|m| m.id != id);
        if self.open_info == Some(id) {
            self.open_info = None;
        }
    }

    fn open_info(&mut self, id: MarkerId) {
        if self.markers.iter().any(|m| m.id == id) {
            self.open_info = Some(id);
        }
    }

    fn close_info(&mut self, id: MarkerId) {
        if self.open_info == Some(id) {
            self.open_info = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(name: &str, lat: f64, lng: f64) -> PointOfInterest {
        PointOfInterest {
            name: name.to_string(),
            lat,
            lng,
            tel: Some("02-120".to_string()),
        }
    }

    #[test]
    fn placing_and_removing_markers_tracks_info_windows() {
        let mut surface = TerminalMapSurface::new();
        surface
            .construct(smartday_core::map::DEFAULT_CENTER, 7)
            .unwrap();

        let a = surface.place_marker(&point("a", 37.51, 127.0));
        let b = surface.place_marker(&point("b", 37.52, 127.1));

        surface.open_info(a);
        assert_eq!(surface.open_info_content().unwrap().title, "a");

        surface.open_info(b);
        surface.close_info(b);
        assert_eq!(surface.open_info_content(), None);

        surface.remove_marker(a);
        assert_eq!(surface.marker_titles().count(), 1);
    }

    #[test]
    fn removing_an_open_marker_closes_its_window() {
        let mut surface = TerminalMapSurface::new();
        surface
            .construct(smartday_core::map::DEFAULT_CENTER, 7)
            .unwrap();
        let a = surface.place_marker(&point("a", 37.51, 127.0));
        surface.open_info(a);
        surface.remove_marker(a);
        assert_eq!(surface.open_marker(), None);
    }

    #[test]
    fn bounds_cover_all_markers() {
        let mut surface = TerminalMapSurface::new();
        surface
            .construct(smartday_core::map::DEFAULT_CENTER, 7)
            .unwrap();
        surface.place_marker(&point("a", 37.40, 126.90));
        surface.place_marker(&point("b", 37.60, 127.10));

        let [min_lng, max_lng] = surface.x_bounds();
        let [min_lat, max_lat] = surface.y_bounds();
        assert!(min_lng < 126.90 && max_lng > 127.10);
        assert!(min_lat < 37.40 && max_lat > 37.60);
    }
}
