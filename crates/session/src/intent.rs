use foundation::{Location, Role};
use geocoding::SearchResult;
use routing::{RouteData, RouteError, RouteRequest, ServiceHealth};
use scene::FlyTo;

use crate::model::PredictionModel;

/// Timer identities. One pending deadline per key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Quiet period after the last keystroke in a field.
    Debounce(Role),
    /// Delayed dropdown close after a field loses focus.
    HideSuggestions(Role),
    /// Globe exit animation before the map takes over.
    ViewTransition,
    /// Landing title on the globe.
    HidePrompt,
}

/// Everything the store reacts to.
#[derive(Debug, Clone)]
pub enum Intent {
    SelectLocation { location: Location, role: Role },

    GlobePointerDown { x: f64, y: f64 },
    GlobePointerMove { x: f64, y: f64 },
    GlobeClick,
    MapClick { lat: f64, lng: f64, modifier: bool },

    InputChanged { role: Role, text: String },
    InputFocused { role: Role },
    InputBlurred { role: Role },
    EnterPressed { role: Role },
    SuggestionChosen { role: Role, index: usize },
    SearchCompleted {
        role: Role,
        generation: u64,
        results: Vec<SearchResult>,
    },

    SetDepartureTime(String),
    SetModel(PredictionModel),
    ToggleDetectors(bool),

    CalculateRoute,
    RouteCompleted {
        ticket: u64,
        outcome: Result<RouteData, RouteError>,
    },
    HealthChecked(Result<ServiceHealth, String>),

    Reset,
}

impl Intent {
    /// Short tag for the journal.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::SelectLocation { .. } => "select_location",
            Intent::GlobePointerDown { .. } => "globe_pointer_down",
            Intent::GlobePointerMove { .. } => "globe_pointer_move",
            Intent::GlobeClick => "globe_click",
            Intent::MapClick { .. } => "map_click",
            Intent::InputChanged { .. } => "input_changed",
            Intent::InputFocused { .. } => "input_focused",
            Intent::InputBlurred { .. } => "input_blurred",
            Intent::EnterPressed { .. } => "enter_pressed",
            Intent::SuggestionChosen { .. } => "suggestion_chosen",
            Intent::SearchCompleted { .. } => "search_completed",
            Intent::SetDepartureTime(_) => "set_departure_time",
            Intent::SetModel(_) => "set_model",
            Intent::ToggleDetectors(_) => "toggle_detectors",
            Intent::CalculateRoute => "calculate_route",
            Intent::RouteCompleted { .. } => "route_completed",
            Intent::HealthChecked(_) => "health_checked",
            Intent::Reset => "reset",
        }
    }
}

/// Outward work requested by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Search {
        role: Role,
        generation: u64,
        query: String,
    },
    CalculateRoute {
        ticket: u64,
        request: RouteRequest,
    },
    CheckHealth,
    FlyTo(FlyTo),
}
