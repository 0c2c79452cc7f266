use serde::{Deserialize, Serialize};

/// A selected geographic point.
///
/// Values are replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            name: None,
        }
    }

    pub fn named(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: Some(name.into()),
        }
    }

    /// Text shown for this location: its name, or `"lat, lng"` at 4 decimals.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => coordinate_label(self.lat, self.lng),
        }
    }

    /// `[lat, lng]`, the axis order 2D renderers consume.
    pub fn lat_lng(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// `"25.0330, 121.5654"`.
pub fn coordinate_label(lat: f64, lng: f64) -> String {
    format!("{lat:.4}, {lng:.4}")
}

/// Which endpoint slot a location-producing event fills.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Start,
    End,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Start, Role::End];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Start => "start",
            Role::End => "end",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "from" | "origin" => Some(Role::Start),
            "end" | "to" | "destination" => Some(Role::End),
            _ => None,
        }
    }

    /// Slot index for per-role arrays.
    pub fn index(self) -> usize {
        match self {
            Role::Start => 0,
            Role::End => 1,
        }
    }
}

/// Which renderer is on screen.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "2d")]
    TwoD,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::ThreeD => "3d",
            ViewMode::TwoD => "2d",
        }
    }
}
