use foundation::Location;
use serde::{Deserialize, Serialize};

use crate::client::GeocodeError;

/// One geocoder hit as returned on the wire.
///
/// Coordinates stay decimal text until a suggestion is chosen; the service
/// calls the longitude `lon`, which is accepted and stored as `lng`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub display_name: String,
    pub lat: String,
    #[serde(alias = "lon")]
    pub lng: String,
}

impl SearchResult {
    pub fn new(display_name: impl Into<String>, lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    /// Leading component of the display name, e.g. `"Taipei 101"`.
    pub fn primary_name(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or_default()
    }

    /// Parses the coordinates into a [`Location`] named after the display name.
    pub fn to_location(&self) -> Result<Location, GeocodeError> {
        let lat = parse_coordinate("lat", &self.lat)?;
        let lng = parse_coordinate("lng", &self.lng)?;
        Ok(Location::named(lat, lng, self.display_name.clone()))
    }
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::InvalidCoordinate {
            field,
            value: raw.to_string(),
        })
}
