use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Route calculation endpoint; relative paths resolve against the page origin.
    pub endpoint: String,
    pub health_endpoint: String,
    /// Calendar day the chosen time-of-day is attached to. The historical
    /// traffic data only covers autumn 2017.
    pub service_date: NaiveDate,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            endpoint: "/calculate_route".to_string(),
            health_endpoint: "/health".to_string(),
            service_date: NaiveDate::from_ymd_opt(2017, 9, 19).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RouteConfig;
    use chrono::NaiveDate;

    #[test]
    fn default_service_date_is_2017_09_19() {
        assert_eq!(
            RouteConfig::default().service_date,
            NaiveDate::from_ymd_opt(2017, 9, 19).unwrap()
        );
    }

    #[test]
    fn service_date_parses_from_iso_text() {
        let cfg: RouteConfig = serde_json::from_str(r#"{"service_date":"2017-10-02"}"#).unwrap();
        assert_eq!(cfg.service_date, NaiveDate::from_ymd_opt(2017, 10, 2).unwrap());
        assert_eq!(cfg.endpoint, "/calculate_route");
        assert!(serde_json::from_str::<RouteConfig>(r#"{"service_date":"19/09/2017"}"#).is_err());
    }
}
