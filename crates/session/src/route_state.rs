use chrono::NaiveDate;
use foundation::Location;
use routing::{DepartureTime, RouteData, RouteError, RouteRequest};
use serde::Serialize;

/// Route request lifecycle: idle, loading, then a result or an error.
///
/// Each request gets a ticket; a completion is applied only when its ticket
/// is the current one and the controller is still loading. Reset moves the
/// ticket on, so a response that lands after reset is ignored.
#[derive(Debug, Clone, Default)]
pub struct RouteController {
    loading: bool,
    result: Option<RouteData>,
    error: Option<String>,
    ticket: u64,
}

impl RouteController {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&RouteData> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates the endpoints and opens a request.
    ///
    /// A missing endpoint sets the error line and sends nothing.
    pub fn begin(
        &mut self,
        start: Option<&Location>,
        end: Option<&Location>,
        departure: DepartureTime,
        service_date: NaiveDate,
    ) -> Result<(u64, RouteRequest), RouteError> {
        let (Some(start), Some(end)) = (start, end) else {
            let err = RouteError::MissingEndpoints;
            self.error = Some(err.user_message());
            return Err(err);
        };
        self.ticket += 1;
        self.loading = true;
        self.error = None;
        self.result = None;
        Ok((self.ticket, RouteRequest::between(start, end, departure, service_date)))
    }

    /// Returns `false` for a completion nobody is waiting for.
    pub fn finish(&mut self, ticket: u64, outcome: Result<RouteData, RouteError>) -> bool {
        if !self.loading || ticket != self.ticket {
            tracing::debug!(ticket, current = self.ticket, "ignoring stale route response");
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(route) => {
                tracing::info!(
                    distance_km = route.properties.distance_km,
                    minutes = route.properties.predicted_travel_time_min,
                    "route calculated"
                );
                self.result = Some(route);
            }
            Err(err) => {
                tracing::warn!(%err, "route calculation failed");
                self.error = Some(err.user_message());
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.ticket += 1;
        self.loading = false;
        self.result = None;
        self.error = None;
    }

    pub fn summary(&self) -> Option<RouteSummary> {
        self.result.as_ref().map(RouteSummary::from_route)
    }
}

/// Formatted figures for the results box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    /// `"2.41 km"`.
    pub distance: String,
    /// `"8 min"`.
    pub travel_time: String,
    /// Vehicles per hour, `"152"`.
    pub average_flow: String,
    /// `"2017-09-19 08:30"`.
    pub departure: String,
    pub path_nodes: Option<u32>,
}

impl RouteSummary {
    pub fn from_route(route: &RouteData) -> Self {
        let p = &route.properties;
        Self {
            distance: format!("{:.2} km", p.distance_km),
            travel_time: format!("{:.0} min", p.predicted_travel_time_min),
            average_flow: format!("{:.0}", p.average_flow),
            departure: p.departure_time.replacen('T', " ", 1),
            path_nodes: p.path_nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use routing::{RouteGeometry, RouteProperties};
    use transport::TransportError;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 9, 19).unwrap()
    }

    fn route() -> RouteData {
        RouteData {
            kind: "Feature".into(),
            geometry: RouteGeometry {
                kind: "LineString".into(),
                coordinates: vec![[121.50, 25.03], [121.52, 25.04]],
            },
            properties: RouteProperties {
                distance_km: 2.4137,
                predicted_travel_time_min: 7.9,
                average_flow: 152.3,
                departure_time: "2017-09-19T08:30".into(),
                path_nodes: Some(14),
            },
        }
    }

    fn endpoints() -> (Location, Location) {
        (Location::new(25.03, 121.50), Location::new(25.04, 121.52))
    }

    #[test]
    fn missing_endpoint_sets_error_without_loading() {
        let mut rc = RouteController::default();
        let (start, _) = endpoints();
        let err = rc.begin(Some(&start), None, DepartureTime::default(), date()).unwrap_err();
        assert_eq!(err, RouteError::MissingEndpoints);
        assert!(!rc.is_loading());
        assert_eq!(rc.error(), Some("Please select both start and end locations"));
    }

    #[test]
    fn success_clears_loading_and_stores_route() {
        let mut rc = RouteController::default();
        let (start, end) = endpoints();
        let (ticket, req) = rc
            .begin(Some(&start), Some(&end), DepartureTime::default(), date())
            .unwrap();
        assert_eq!(req.departure_time, "2017-09-19T08:30");
        assert!(rc.is_loading());
        assert!(rc.finish(ticket, Ok(route())));
        assert!(!rc.is_loading());
        assert!(rc.result().is_some());
        assert!(!rc.finish(ticket, Ok(route())));
    }

    #[test]
    fn failure_shows_user_message_and_keeps_no_result() {
        let mut rc = RouteController::default();
        let (start, end) = endpoints();
        let (ticket, _) = rc.begin(Some(&start), Some(&end), DepartureTime::default(), date()).unwrap();
        rc.finish(ticket, Err(TransportError::Network("refused".into()).into()));
        assert!(!rc.is_loading());
        assert!(rc.result().is_none());
        assert_eq!(rc.error(), Some("Could not reach the route service. Please try again."));
    }

    #[test]
    fn new_request_clears_previous_outcome() {
        let mut rc = RouteController::default();
        let (start, end) = endpoints();
        let (t1, _) = rc.begin(Some(&start), Some(&end), DepartureTime::default(), date()).unwrap();
        rc.finish(t1, Ok(route()));
        rc.begin(Some(&start), Some(&end), DepartureTime::default(), date()).unwrap();
        assert!(rc.result().is_none());
        assert!(rc.error().is_none());
    }

    #[test]
    fn reset_orphans_in_flight_request() {
        let mut rc = RouteController::default();
        let (start, end) = endpoints();
        let (ticket, _) = rc.begin(Some(&start), Some(&end), DepartureTime::default(), date()).unwrap();
        rc.reset();
        assert!(!rc.is_loading());
        assert!(!rc.finish(ticket, Ok(route())));
        assert!(rc.result().is_none());
    }

    #[test]
    fn summary_formats_figures() {
        assert_eq!(
            RouteSummary::from_route(&route()),
            RouteSummary {
                distance: "2.41 km".into(),
                travel_time: "8 min".into(),
                average_flow: "152".into(),
                departure: "2017-09-19 08:30".into(),
                path_nodes: Some(14),
            }
        );
    }
}
