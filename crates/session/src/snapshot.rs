use foundation::{Location, ViewMode};
use routing::ServiceHealth;
use scene::MapScene;
use serde::Serialize;

use crate::autocomplete::FieldSnapshot;
use crate::model::PredictionModel;
use crate::route_state::RouteSummary;

/// Landing title shown over the globe for the first few seconds.
pub const GLOBE_PROMPT: [&str; 3] = [
    "TaipeiSim",
    "Historical Traffic Simulation Router",
    "Click or search to begin your journey to Taipei",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<PredictionModel> for ModelOption {
    fn from(m: PredictionModel) -> Self {
        Self {
            id: m.id(),
            name: m.name(),
            description: m.description(),
        }
    }
}

/// Last known state of the route service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HealthStatus {
    #[default]
    Unknown,
    Healthy {
        traffic_records: u64,
        graph_nodes: u64,
        graph_edges: u64,
    },
    Degraded {
        status: String,
    },
    Unreachable {
        reason: String,
    },
}

impl HealthStatus {
    pub fn from_check(outcome: Result<ServiceHealth, String>) -> Self {
        match outcome {
            Ok(h) if h.is_healthy() => HealthStatus::Healthy {
                traffic_records: h.traffic_records,
                graph_nodes: h.graph_nodes,
                graph_edges: h.graph_edges,
            },
            Ok(h) => HealthStatus::Degraded { status: h.status },
            Err(reason) => HealthStatus::Unreachable { reason },
        }
    }
}

/// Control panel render state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    pub start_field: FieldSnapshot,
    pub end_field: FieldSnapshot,
    /// `HH:MM`.
    pub departure_time: String,
    pub model: ModelOption,
    pub models: Vec<ModelOption>,
    pub show_detectors: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub route: Option<RouteSummary>,
    pub can_calculate: bool,
    pub can_reset: bool,
}

/// Everything a host needs to draw one frame.
///
/// `prompt` is only set on the globe while the landing title is up; `map`
/// only once the flat map is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub view_mode: ViewMode,
    pub prompt: Option<[&'static str; 3]>,
    pub start: Option<Location>,
    pub end: Option<Location>,
    pub panel: PanelSnapshot,
    pub map: Option<MapScene>,
    pub health: HealthStatus,
}
