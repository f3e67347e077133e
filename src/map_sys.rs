use std::{
    f64::consts::PI,
    fmt,
};
use cgmath::{EuclideanSpace, Point2, Vector2};

use crate::error::ClientError;
use crate::page::Page;
use crate::state::UiState;
use crate::task::{Effect, Request};


pub const DEFAULT_CENTER: LatLng = LatLng { lat: 12.9716, lng: 77.5946 };
pub const DEFAULT_ZOOM: u8 = 13;
const DEFAULT_VIEW_SIZE: (f64, f64) = (800.0, 600.0);
const TILE_SIZE: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.0511287798;
const SUBDOMAINS: [&'static str; 3] = ["a", "b", "c"];
const MAX_LNG: f64 = 180.0;
const MAX_LAT: f64 = 90.0;


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
            && self.lat.abs() <= MAX_LAT && self.lng.abs() <= MAX_LNG
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
}


#[derive(Debug, Clone)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub size: Vector2<f64>,
    markers: Vec<Marker>,
    tile_template: String,
}

impl MapView {
    pub fn new(tile_template: &str) -> Self {
        MapView {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            size: Vector2::new(DEFAULT_VIEW_SIZE.0, DEFAULT_VIEW_SIZE.1),
            markers: Vec::new(),
            tile_template: tile_template.to_owned(),
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    // At most one marker is ever shown.
    pub fn place_marker(&mut self, at: LatLng) {
        self.markers.clear();
        self.markers.push(Marker { position: at });
    }

    // Marker position if any, else the view center.
    pub fn focus(&self) -> LatLng {
        self.markers.first()
            .map(|marker| marker.position)
            .unwrap_or(self.center)
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powi(self.zoom as i32)
    }

    fn project(&self, at: LatLng) -> Point2<f64> {
        let scale = self.world_size();
        let lat = at.lat.max(-MAX_LATITUDE).min(MAX_LATITUDE);
        let sin = lat.to_radians().sin();

        Point2::new(
            (at.lng + 180.0) / 360.0 * scale,
            (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * scale,
        )
    }

    fn unproject(&self, point: Point2<f64>) -> LatLng {
        let scale = self.world_size();
        let n = PI - 2.0 * PI * point.y / scale;

        LatLng::new(n.sinh().atan().to_degrees(), point.x / scale * 360.0 - 180.0)
    }

    // `point` is relative to the top-left corner of the view.
    pub fn container_point_to_lat_lng(&self, point: Point2<f64>) -> LatLng {
        let origin = self.project(self.center) - self.size / 2.0;
        self.unproject(origin + point.to_vec())
    }

    pub fn tile_url(&self, at: LatLng) -> String {
        let max_index = (1u64 << self.zoom) as f64 - 1.0;
        let point = self.project(at);
        let x = (point.x / TILE_SIZE).floor().max(0.0).min(max_index) as u64;
        let y = (point.y / TILE_SIZE).floor().max(0.0).min(max_index) as u64;

        self.tile_template
            .replace("{s}", SUBDOMAINS[((x + y) % SUBDOMAINS.len() as u64) as usize])
            .replace("{z}", &self.zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}


pub fn on_map_click(page: &mut Page, state: &mut UiState, at: LatLng) -> Vec<Effect> {
    if !at.is_valid() {
        warn!("Ignore click outside the map at {}", at);
        return Vec::new();
    }

    page.map.place_marker(at);
    state.select_location(at);

    debug!("Selected location {}", at);

    vec![Effect::Send(Request::ReverseGeocode(at))]
}

pub fn on_map_tap(page: &mut Page, state: &mut UiState, point: Point2<f64>) -> Vec<Effect> {
    let at = page.map.container_point_to_lat_lng(point);
    on_map_click(page, state, at)
}

pub fn show_tile(page: &Page) -> Vec<Effect> {
    let at = page.map.focus();
    vec![Effect::Alert(format!("tile at {}: {}", at, page.map.tile_url(at)))]
}

pub fn on_geocoded(page: &mut Page, state: &mut UiState,
    at: LatLng, result: Result<Option<String>, ClientError>) {

    if !state.is_selected(at) {
        debug!("Drop address of stale location {}", at);
        return;
    }

    let label = match result {
        Ok(Some(address)) => {
            state.set_address(address.clone());
            address
        },
        Ok(None) => at.to_string(),
        Err(err) => {
            warn!("Reverse geocoding failed: {}", err);
            at.to_string()
        },
    };

    page.report_form.location = label;
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Route;

    const TILES: &'static str = "https://{s}.tile.example/{z}/{x}/{y}.png";

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn center_of_view_maps_to_center() {
        let map = MapView::new(TILES);
        let at = map.container_point_to_lat_lng(Point2::new(400.0, 300.0));

        assert!(close(at.lat, DEFAULT_CENTER.lat));
        assert!(close(at.lng, DEFAULT_CENTER.lng));
    }

    #[test]
    fn pixels_right_and_down_move_east_and_south() {
        let map = MapView::new(TILES);
        let at = map.container_point_to_lat_lng(Point2::new(600.0, 500.0));

        assert!(at.lng > DEFAULT_CENTER.lng);
        assert!(at.lat < DEFAULT_CENTER.lat);
    }

    #[test]
    fn tile_url_for_zero_zoom() {
        let mut map = MapView::new(TILES);
        map.zoom = 0;
        assert_eq!(map.tile_url(LatLng::new(0.0, 0.0)), "https://a.tile.example/0/0/0.png");
    }

    #[test]
    fn tile_url_for_default_center() {
        let map = MapView::new(TILES);
        // Bengaluru at z13 lies in tile 5861/3798.
        assert_eq!(map.tile_url(DEFAULT_CENTER), "https://c.tile.example/13/5861/3798.png");
    }

    #[test]
    fn second_click_replaces_marker() {
        let mut page = Page::new(Route::Home, TILES);
        let mut state = UiState::new();

        on_map_click(&mut page, &mut state, LatLng::new(12.0, 77.0));
        let effects = on_map_click(&mut page, &mut state, LatLng::new(13.0, 78.0));

        assert_eq!(page.map.markers().len(), 1);
        assert_eq!(page.map.markers()[0].position, LatLng::new(13.0, 78.0));
        assert_eq!(state.selected().map(|s| s.at), Some(LatLng::new(13.0, 78.0)));
        assert_eq!(effects, vec![Effect::Send(Request::ReverseGeocode(LatLng::new(13.0, 78.0)))]);
    }

    #[test]
    fn address_fills_location() {
        let mut page = Page::new(Route::Home, TILES);
        let mut state = UiState::new();
        let at = LatLng::new(12.5, 77.25);

        on_map_click(&mut page, &mut state, at);
        on_geocoded(&mut page, &mut state, at, Ok(Some("Cubbon Park".into())));

        assert_eq!(page.report_form.location, "Cubbon Park");
        assert_eq!(state.selected().and_then(|s| s.address.clone()), Some("Cubbon Park".into()));
    }

    #[test]
    fn failed_lookup_falls_back_to_coordinates() {
        let mut page = Page::new(Route::Home, TILES);
        let mut state = UiState::new();
        let at = LatLng::new(12.5, 77.25);

        on_map_click(&mut page, &mut state, at);
        on_geocoded(&mut page, &mut state, at, Err(ClientError::Transport("offline".into())));
        assert_eq!(page.report_form.location, "12.5,77.25");

        on_geocoded(&mut page, &mut state, at, Ok(None));
        assert_eq!(page.report_form.location, "12.5,77.25");
    }

    #[test]
    fn stale_address_is_dropped() {
        let mut page = Page::new(Route::Home, TILES);
        let mut state = UiState::new();
        let first = LatLng::new(12.5, 77.25);
        let second = LatLng::new(12.6, 77.35);

        on_map_click(&mut page, &mut state, first);
        on_map_click(&mut page, &mut state, second);
        on_geocoded(&mut page, &mut state, first, Ok(Some("Old place".into())));

        assert_eq!(page.report_form.location, "");
    }

    #[test]
    fn coordinates_must_be_on_the_globe() {
        assert!(LatLng::new(-90.0, 180.0).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -180.5).is_valid());
        assert!(!LatLng::new(std::f64::NAN, 0.0).is_valid());
        assert!(!LatLng::new(0.0, std::f64::INFINITY).is_valid());
    }

    #[test]
    fn invalid_click_is_ignored() {
        let mut page = Page::new(Route::Home, TILES);
        let mut state = UiState::new();

        let effects = on_map_click(&mut page, &mut state, LatLng::new(std::f64::NAN, std::f64::NAN));
        assert!(effects.is_empty());
        assert!(page.map.markers().is_empty());
        assert!(state.selected().is_none());

        assert!(on_map_tap(&mut page, &mut state, Point2::new(std::f64::NAN, 0.0)).is_empty());
        assert!(page.map.markers().is_empty());
    }

    #[test]
    fn tile_follows_marker_then_center() {
        let mut page = Page::new(Route::Home, TILES);
        assert_eq!(show_tile(&page), vec![Effect::Alert(format!("tile at {}: {}",
            DEFAULT_CENTER, "https://c.tile.example/13/5861/3798.png"))]);

        let mut state = UiState::new();
        let at = LatLng::new(0.0, 0.0);
        on_map_click(&mut page, &mut state, at);
        assert_eq!(page.map.focus(), at);
        assert_eq!(show_tile(&page), vec![Effect::Alert(format!("tile at 0,0: {}",
            page.map.tile_url(at)))]);
    }
}
