use foundation::{Location, Role};
use routing::RouteData;
use serde::Serialize;

use crate::camera::MapCamera;
use crate::detectors::{DEMO_DETECTORS, Detector};

pub const MAP_HINT: &str = "Click map to set destination (Shift+Click for start)";
pub const ROUTE_COLOR: &str = "#2194ce";

/// A click on the 2D map at a geographic coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MapClick {
    pub lat: f64,
    pub lng: f64,
    /// Shift (or the platform's equivalent) held at click time.
    pub modifier: bool,
}

impl MapClick {
    /// Which slot the click fills: start when the modifier is held or no start
    /// exists yet, otherwise the destination.
    pub fn role(&self, has_start: bool) -> Role {
        if self.modifier || !has_start {
            Role::Start
        } else {
            Role::End
        }
    }

    pub fn to_location(&self) -> Location {
        Location::named(
            self.lat,
            self.lng,
            format!("Selected Point ({:.4}, {:.4})", self.lat, self.lng),
        )
    }

    pub fn selection(&self, has_start: bool) -> (Location, Role) {
        (self.to_location(), self.role(has_start))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    Start,
    End,
    Detector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// `[lat, lng]`.
    pub position: [f64; 2],
    pub icon: MarkerIcon,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    /// `[lat, lng]` vertices.
    pub positions: Vec<[f64; 2]>,
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendItem {
    Start,
    Destination,
    Route,
}

/// Everything the 2D renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub camera: MapCamera,
    pub markers: Vec<Marker>,
    pub route: Option<Polyline>,
    pub detectors: Vec<Marker>,
    pub legend: Vec<LegendItem>,
    pub hint: &'static str,
}

pub struct SceneInput<'a> {
    pub camera: MapCamera,
    pub start: Option<&'a Location>,
    pub end: Option<&'a Location>,
    pub route: Option<&'a RouteData>,
    pub show_detectors: bool,
}

pub fn build_map_scene(input: SceneInput<'_>) -> MapScene {
    let mut markers = Vec::with_capacity(2);
    if let Some(start) = input.start {
        markers.push(location_marker(start, MarkerIcon::Start, "Start Location"));
    }
    if let Some(end) = input.end {
        markers.push(location_marker(end, MarkerIcon::End, "Destination"));
    }

    let route = input
        .route
        .map(RouteData::lat_lng_path)
        .filter(|path| !path.is_empty())
        .map(|positions| Polyline {
            positions,
            color: ROUTE_COLOR,
            weight: 4.0,
            opacity: 0.7,
        });

    let detectors = if input.show_detectors {
        DEMO_DETECTORS.iter().map(detector_marker).collect()
    } else {
        Vec::new()
    };

    let mut legend = vec![LegendItem::Start, LegendItem::Destination];
    if input.route.is_some() {
        legend.push(LegendItem::Route);
    }

    MapScene {
        camera: input.camera,
        markers,
        route,
        detectors,
        legend,
        hint: MAP_HINT,
    }
}

fn location_marker(loc: &Location, icon: MarkerIcon, title: &str) -> Marker {
    Marker {
        position: loc.lat_lng(),
        icon,
        title: title.to_string(),
        body: loc.label(),
    }
}

fn detector_marker(d: &Detector) -> Marker {
    Marker {
        position: [d.lat, d.lng],
        icon: MarkerIcon::Detector,
        title: d.name.to_string(),
        body: d.id.to_string(),
    }
}
