use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeConfig {
    /// Search endpoint, e.g. Nominatim's `/search`.
    pub endpoint: String,
    /// Appended to queries that do not already mention it.
    pub locality_hint: String,
    /// Lower-case spellings of the locality, in any script, used for ranking.
    pub locality_aliases: Vec<String>,
    /// Comma-separated ISO 3166-1 alpha-2 codes passed as `countrycodes`.
    pub country_codes: String,
    /// `limit` sent to the geocoder.
    pub fetch_limit: usize,
    /// Suggestions kept after ranking.
    pub max_suggestions: usize,
    /// Shorter queries never hit the network.
    pub min_query_chars: usize,
    /// Sent as `User-Agent` where the host allows setting it.
    pub user_agent: Option<String>,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            locality_hint: "Taipei".to_string(),
            locality_aliases: vec![
                "taipei".to_string(),
                "臺北".to_string(),
                "台北".to_string(),
            ],
            country_codes: "tw".to_string(),
            fetch_limit: 10,
            max_suggestions: 8,
            min_query_chars: 2,
            user_agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GeocodeConfig;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: GeocodeConfig =
            serde_json::from_str(r#"{"locality_hint":"Kaohsiung","fetch_limit":5}"#).unwrap();
        assert_eq!(cfg.locality_hint, "Kaohsiung");
        assert_eq!(cfg.fetch_limit, 5);
        assert_eq!(cfg.max_suggestions, 8);
        assert_eq!(cfg.country_codes, "tw");
    }
}
