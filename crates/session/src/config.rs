use std::time::Duration;

use geocoding::GeocodeConfig;
use routing::{DepartureTime, RouteConfig};
use scene::{DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, DRAG_THRESHOLD_PX, FOLLOW_ZOOM};
use serde::{Deserialize, Serialize};

use crate::model::PredictionModel;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Delays that shape the interaction, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub debounce_ms: u64,
    pub blur_hide_ms: u64,
    pub view_transition_ms: u64,
    pub prompt_visible_ms: u64,
    pub fly_to_duration_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 800,
            blur_hide_ms: 500,
            view_transition_ms: 300,
            prompt_visible_ms: 5_000,
            fly_to_duration_ms: 1_500,
        }
    }
}

impl TimingConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn blur_hide(&self) -> Duration {
        Duration::from_millis(self.blur_hide_ms)
    }

    pub fn view_transition(&self) -> Duration {
        Duration::from_millis(self.view_transition_ms)
    }

    pub fn prompt_visible(&self) -> Duration {
        Duration::from_millis(self.prompt_visible_ms)
    }

    pub fn fly_to_duration(&self) -> Duration {
        Duration::from_millis(self.fly_to_duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// `[lat, lng]`.
    pub initial_center: [f64; 2],
    pub initial_zoom: f64,
    pub follow_zoom: f64,
    pub drag_threshold_px: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_center: DEFAULT_MAP_CENTER,
            initial_zoom: DEFAULT_MAP_ZOOM,
            follow_zoom: FOLLOW_ZOOM,
            drag_threshold_px: DRAG_THRESHOLD_PX,
        }
    }
}

/// Initial panel values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub departure_time: DepartureTime,
    pub model: PredictionModel,
}

/// Everything the host can tune. Every field has a default, so `{}` is a
/// complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub geocoder: GeocodeConfig,
    pub routing: RouteConfig,
    pub timing: TimingConfig,
    pub map: MapConfig,
    pub defaults: DefaultsConfig,
}

impl ClientConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: ClientConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.geocoder;
        if g.endpoint.trim().is_empty() {
            return Err(invalid("geocoder.endpoint is empty"));
        }
        if g.locality_hint.trim().is_empty() {
            return Err(invalid("geocoder.locality_hint is empty"));
        }
        if g.min_query_chars == 0 {
            return Err(invalid("geocoder.min_query_chars must be at least 1"));
        }
        if g.fetch_limit == 0 || g.max_suggestions == 0 {
            return Err(invalid("geocoder limits must be positive"));
        }
        if g.max_suggestions > g.fetch_limit {
            return Err(invalid(format!(
                "geocoder.max_suggestions ({}) exceeds fetch_limit ({})",
                g.max_suggestions, g.fetch_limit
            )));
        }

        let r = &self.routing;
        if r.endpoint.trim().is_empty() || r.health_endpoint.trim().is_empty() {
            return Err(invalid("routing endpoints must not be empty"));
        }

        let m = &self.map;
        let [lat, lng] = m.initial_center;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(invalid(format!("map.initial_center [{lat}, {lng}] is out of range")));
        }
        if !m.initial_zoom.is_finite() || !m.follow_zoom.is_finite() {
            return Err(invalid("map zoom levels must be finite"));
        }
        if !m.drag_threshold_px.is_finite() || m.drag_threshold_px < 0.0 {
            return Err(invalid("map.drag_threshold_px must be a non-negative number"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}
