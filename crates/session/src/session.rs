use std::collections::VecDeque;

use foundation::Time;
use geocoding::GeocodeClient;
use routing::RouteClient;
use scene::FlyTo;
use transport::HttpTransport;

use crate::config::{ClientConfig, ConfigError};
use crate::intent::{Effect, Intent};
use crate::snapshot::Snapshot;
use crate::store::Store;

/// Carries out network effects and turns their outcome back into intents.
pub struct EffectRunner<T> {
    geocoder: GeocodeClient<T>,
    router: RouteClient<T>,
}

impl<T: HttpTransport + Clone> EffectRunner<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            geocoder: GeocodeClient::new(transport.clone(), config.geocoder.clone()),
            router: RouteClient::new(transport, config.routing.clone()),
        }
    }
}

impl<T: HttpTransport> EffectRunner<T> {
    /// `None` for effects that are not network work (camera moves).
    pub async fn run(&self, effect: Effect) -> Option<Intent> {
        match effect {
            Effect::Search {
                role,
                generation,
                query,
            } => Some(Intent::SearchCompleted {
                role,
                generation,
                results: self.geocoder.search(&query, role).await,
            }),
            Effect::CalculateRoute { ticket, request } => Some(Intent::RouteCompleted {
                ticket,
                outcome: self.router.calculate(&request).await,
            }),
            Effect::CheckHealth => Some(Intent::HealthChecked(
                self.router.health().await.map_err(|e| e.to_string()),
            )),
            Effect::FlyTo(_) => None,
        }
    }
}

/// A store wired to real clients.
///
/// Each call runs the resulting effects to completion before returning, so
/// responses are applied in request order. Hosts that need overlapping
/// requests drive [`Store`] and [`EffectRunner`] themselves.
pub struct Session<T> {
    store: Store,
    runner: EffectRunner<T>,
    camera: Vec<FlyTo>,
}

impl<T: HttpTransport + Clone> Session<T> {
    pub fn new(config: ClientConfig, transport: T) -> Result<Self, ConfigError> {
        config.validate()?;
        let runner = EffectRunner::new(transport, &config);
        Ok(Self {
            store: Store::new(config),
            runner,
            camera: Vec::new(),
        })
    }
}

impl<T: HttpTransport> Session<T> {
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub async fn start(&mut self, now: Time) {
        let effects = self.store.start(now);
        self.run(now, effects).await;
    }

    pub async fn dispatch(&mut self, now: Time, intent: Intent) {
        let effects = self.store.dispatch(now, intent);
        self.run(now, effects).await;
    }

    pub async fn advance(&mut self, now: Time) {
        let effects = self.store.advance(now);
        self.run(now, effects).await;
    }

    /// Camera moves requested since the last call.
    pub fn take_camera_commands(&mut self) -> Vec<FlyTo> {
        std::mem::take(&mut self.camera)
    }

    pub fn snapshot(&self, now: Time) -> Snapshot {
        self.store.snapshot(now)
    }

    async fn run(&mut self, now: Time, effects: Vec<Effect>) {
        let mut queue = VecDeque::from(effects);
        while let Some(effect) = queue.pop_front() {
            if let Effect::FlyTo(fly) = effect {
                self.camera.push(fly);
                continue;
            }
            let Some(intent) = self.runner.run(effect).await else {
                continue;
            };
            queue.extend(self.store.dispatch(now, intent));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use foundation::{Role, ViewMode};
    use pretty_assertions::assert_eq;
    use transport::{Reply, ScriptedTransport};

    use super::*;
    use crate::snapshot::HealthStatus;

    const ROUTE: &str = r#"{
        "type": "Feature",
        "geometry": {"type": "LineString", "coordinates": [[121.5654, 25.0330], [121.5400, 25.0400], [121.5170, 25.0478]]},
        "properties": {
            "distance_km": 5.73,
            "predicted_travel_time_min": 16.4,
            "average_flow": 143.8,
            "departure_time": "2017-09-19T08:30",
            "path_nodes": 27
        }
    }"#;

    const HEALTH: &str =
        r#"{"status":"healthy","traffic_records":123456,"graph_nodes":4200,"graph_edges":9100}"#;

    fn session() -> (Session<Rc<ScriptedTransport>>, Rc<ScriptedTransport>) {
        let transport = Rc::new(ScriptedTransport::new());
        let session = Session::new(ClientConfig::default(), transport.clone()).unwrap();
        (session, transport)
    }

    #[test]
    fn rejects_invalid_config() {
        let mut cfg = ClientConfig::default();
        cfg.geocoder.fetch_limit = 0;
        assert!(Session::new(cfg, Rc::new(ScriptedTransport::new())).is_err());
    }

    #[test]
    fn start_probes_health() {
        let (mut s, t) = session();
        t.push("/health", Reply::json(200, HEALTH));
        pollster::block_on(s.start(Time(0)));
        assert_eq!(t.requests_to("/health").len(), 1);
        assert!(matches!(s.store().health(), HealthStatus::Healthy { graph_nodes: 4200, .. }));
    }

    #[test]
    fn search_flows_through_geocoder() {
        let (mut s, t) = session();
        t.push(
            "nominatim",
            Reply::json(
                200,
                r#"[
                    {"display_name": "Ximending, Wanhua, New Taipei", "lat": "25.0421", "lon": "121.5071"},
                    {"display_name": "Ximen Station, Wanhua District, Taipei", "lat": "25.0421", "lon": "121.5083"}
                ]"#,
            ),
        );
        pollster::block_on(async {
            s.dispatch(Time(0), Intent::InputChanged { role: Role::End, text: "Ximen".into() }).await;
            s.advance(Time(800)).await;
        });

        let reqs = t.requests_to("nominatim");
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].query_value("q"), Some("Ximen, Taipei"));
        let field = s.store().field(Role::End);
        assert!(field.is_visible());
        assert_eq!(field.suggestions().len(), 2);
        assert!(!field.is_searching());
    }

    #[test]
    fn empty_hinted_search_falls_back_to_raw_query() {
        let (mut s, t) = session();
        t.push("nominatim", Reply::json(200, "[]"));
        t.push(
            "nominatim",
            Reply::json(200, r#"[{"display_name": "Jiufen, Ruifang, New Taipei", "lat": "25.109", "lon": "121.845"}]"#),
        );
        pollster::block_on(async {
            s.dispatch(Time(0), Intent::InputChanged { role: Role::Start, text: "Jiufen".into() }).await;
            s.advance(Time(800)).await;
        });
        let qs: Vec<_> = t
            .requests_to("nominatim")
            .iter()
            .map(|r| r.query_value("q").unwrap_or_default().to_string())
            .collect();
        assert_eq!(qs, vec!["Jiufen, Taipei".to_string(), "Jiufen".to_string()]);
        assert_eq!(s.store().field(Role::Start).suggestions().len(), 1);
    }

    #[test]
    fn geocoder_outage_shows_empty_dropdown() {
        let (mut s, t) = session();
        t.push("nominatim", Reply::network_error("offline"));
        pollster::block_on(async {
            s.dispatch(Time(0), Intent::InputChanged { role: Role::Start, text: "Beitou".into() }).await;
            s.advance(Time(800)).await;
        });
        let field = s.store().field(Role::Start);
        assert!(field.is_visible());
        assert!(field.suggestions().is_empty());
        assert!(!field.is_searching());
    }

    #[test]
    fn full_trip_from_globe_to_route() {
        let (mut s, t) = session();
        t.push("/health", Reply::json(200, HEALTH));
        t.push("/calculate_route", Reply::json(200, ROUTE));

        pollster::block_on(async {
            s.start(Time(0)).await;
            s.dispatch(Time(1_000), Intent::GlobePointerDown { x: 200.0, y: 200.0 }).await;
            s.dispatch(Time(1_050), Intent::GlobeClick).await;
            s.advance(Time(1_350)).await;
            s.dispatch(Time(2_000), Intent::MapClick { lat: 25.0478, lng: 121.5170, modifier: false }).await;
            s.dispatch(Time(2_100), Intent::CalculateRoute).await;
        });

        assert_eq!(s.store().view_mode(), ViewMode::TwoD);
        assert_eq!(s.take_camera_commands().len(), 1);
        assert!(s.take_camera_commands().is_empty());

        let posted = t.requests_to("/calculate_route");
        assert_eq!(posted.len(), 1);
        let body: serde_json::Value =
            serde_json::from_str(posted[0].json_body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "start_lat": 25.0330,
                "start_lng": 121.5654,
                "end_lat": 25.0478,
                "end_lng": 121.5170,
                "departure_time": "2017-09-19T08:30"
            })
        );

        let snap = s.snapshot(Time(5_000));
        let summary = snap.panel.route.unwrap();
        assert_eq!(summary.distance, "5.73 km");
        assert_eq!(summary.travel_time, "16 min");
        let map = snap.map.unwrap();
        assert_eq!(map.route.unwrap().positions[0], [25.0330, 121.5654]);
        assert_eq!(map.markers.len(), 2);
    }

    #[test]
    fn server_error_detail_reaches_panel() {
        let (mut s, t) = session();
        t.push(
            "/calculate_route",
            Reply::json(500, r#"{"detail":"Could not find nearby road nodes"}"#),
        );
        pollster::block_on(async {
            s.dispatch(Time(0), Intent::SelectLocation { location: foundation::Location::new(25.03, 121.56), role: Role::Start }).await;
            s.dispatch(Time(0), Intent::SelectLocation { location: foundation::Location::new(25.05, 121.52), role: Role::End }).await;
            s.dispatch(Time(10), Intent::CalculateRoute).await;
        });
        assert_eq!(s.store().error(), Some("Could not find nearby road nodes"));
        assert!(!s.store().is_loading());
    }
}
