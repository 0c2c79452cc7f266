use chrono::NaiveDate;
use foundation::Location;
use foundation::math::swap_axes;
use serde::{Deserialize, Serialize};

use crate::departure::DepartureTime;

/// Body of `POST /calculate_route`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    /// `YYYY-MM-DDTHH:MM`.
    pub departure_time: String,
}

impl RouteRequest {
    pub fn between(
        start: &Location,
        end: &Location,
        departure: DepartureTime,
        service_date: NaiveDate,
    ) -> Self {
        Self {
            start_lat: start.lat,
            start_lng: start.lng,
            end_lat: end.lat,
            end_lng: end.lng,
            departure_time: departure.on(service_date),
        }
    }
}

/// GeoJSON `Feature` describing a calculated route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteData {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: RouteGeometry,
    pub properties: RouteProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[lng, lat]` pairs in travel order.
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteProperties {
    pub distance_km: f64,
    pub predicted_travel_time_min: f64,
    pub average_flow: f64,
    pub departure_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_nodes: Option<u32>,
}

impl RouteData {
    /// Route vertices as `[lat, lng]`, ready for a 2D polyline.
    pub fn lat_lng_path(&self) -> Vec<[f64; 2]> {
        swap_axes(&self.geometry.coordinates)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub traffic_records: u64,
    #[serde(default)]
    pub graph_nodes: u64,
    #[serde(default)]
    pub graph_edges: u64,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
