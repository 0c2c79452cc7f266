use foundation::{Location, Role, Time, ViewMode};
use geocoding::SearchResult;
use routing::{DepartureTime, RouteData, RouteError};
use runtime::{EventBus, Metrics, TimerQueue};
use scene::{CameraFollow, GlobePointer, MapCamera, MapClick, SceneInput, build_map_scene};

use crate::autocomplete::{Autocomplete, FieldTiming};
use crate::config::ClientConfig;
use crate::intent::{Effect, Intent, TimerKey};
use crate::model::PredictionModel;
use crate::route_state::RouteController;
use crate::snapshot::{GLOBE_PROMPT, HealthStatus, ModelOption, PanelSnapshot, Snapshot};
use crate::view::ViewCoordinator;

/// Root state container.
///
/// Owns the selected endpoints, panel settings, both search fields, the
/// route lifecycle and the active view, and is the only thing that mutates
/// them. Hosts feed it [`Intent`]s plus the current time and carry out the
/// returned [`Effect`]s; timers fire when the host calls [`Store::advance`].
#[derive(Debug)]
pub struct Store {
    config: ClientConfig,
    start: Option<Location>,
    end: Option<Location>,
    departure: DepartureTime,
    model: PredictionModel,
    show_detectors: bool,
    fields: [Autocomplete; 2],
    route: RouteController,
    view: ViewCoordinator,
    globe: GlobePointer,
    camera: CameraFollow,
    prompt_visible: bool,
    health: HealthStatus,
    timers: TimerQueue<TimerKey>,
    journal: EventBus,
    metrics: Metrics,
}

impl Store {
    pub fn new(config: ClientConfig) -> Self {
        let min_chars = config.geocoder.min_query_chars;
        let home = MapCamera {
            center: config.map.initial_center,
            zoom: config.map.initial_zoom,
        };
        Self {
            start: None,
            end: None,
            departure: config.defaults.departure_time,
            model: config.defaults.model,
            show_detectors: false,
            fields: [
                Autocomplete::new(Role::Start, min_chars),
                Autocomplete::new(Role::End, min_chars),
            ],
            route: RouteController::default(),
            view: ViewCoordinator::new(),
            globe: GlobePointer::new(config.map.drag_threshold_px),
            camera: CameraFollow::new(home, config.map.follow_zoom, config.timing.fly_to_duration()),
            prompt_visible: true,
            health: HealthStatus::Unknown,
            timers: TimerQueue::new(),
            journal: EventBus::new(),
            metrics: Metrics::new(),
            config,
        }
    }

    /// App mount: arms the landing prompt and probes the route service.
    pub fn start(&mut self, now: Time) -> Vec<Effect> {
        self.show_prompt(now);
        self.journal.emit(now, "start", "session started");
        vec![Effect::CheckHealth]
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn start_location(&self) -> Option<&Location> {
        self.start.as_ref()
    }

    pub fn end_location(&self) -> Option<&Location> {
        self.end.as_ref()
    }

    pub fn location(&self, role: Role) -> Option<&Location> {
        match role {
            Role::Start => self.start.as_ref(),
            Role::End => self.end.as_ref(),
        }
    }

    pub fn field(&self, role: Role) -> &Autocomplete {
        &self.fields[role.index()]
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view.mode()
    }

    pub fn departure_time(&self) -> DepartureTime {
        self.departure
    }

    pub fn model(&self) -> PredictionModel {
        self.model
    }

    pub fn show_detectors(&self) -> bool {
        self.show_detectors
    }

    pub fn route(&self) -> Option<&RouteData> {
        self.route.result()
    }

    pub fn error(&self) -> Option<&str> {
        self.route.error()
    }

    pub fn is_loading(&self) -> bool {
        self.route.is_loading()
    }

    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    pub fn health(&self) -> &HealthStatus {
        &self.health
    }

    pub fn journal(&self) -> &EventBus {
        &self.journal
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }

    /// Earliest pending timer, for hosts that sleep between ticks.
    pub fn next_deadline(&self) -> Option<Time> {
        self.timers.next_deadline()
    }

    pub fn can_calculate(&self) -> bool {
        self.start.is_some() && self.end.is_some() && !self.route.is_loading()
    }

    pub fn can_reset(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    fn timing(&self) -> FieldTiming {
        FieldTiming {
            debounce: self.config.timing.debounce(),
            blur_hide: self.config.timing.blur_hide(),
        }
    }

    pub fn dispatch(&mut self, now: Time, intent: Intent) -> Vec<Effect> {
        tracing::trace!(kind = intent.kind(), "dispatch");
        self.metrics.incr("intents");
        self.journal.emit(now, intent.kind(), "");
        let mut effects = Vec::new();
        match intent {
            Intent::SelectLocation { location, role } => {
                self.select_location(now, location, role, &mut effects);
            }

            Intent::GlobePointerDown { x, y } => {
                if self.on_globe() {
                    self.globe.on_pointer_down([x, y]);
                }
            }
            Intent::GlobePointerMove { x, y } => {
                if self.on_globe() {
                    self.globe.on_pointer_move([x, y]);
                }
            }
            Intent::GlobeClick => {
                if !self.on_globe() {
                    tracing::debug!("globe click while map is active");
                } else if let Some(location) = self.globe.on_click() {
                    self.select_location(now, location, Role::Start, &mut effects);
                }
            }
            Intent::MapClick { lat, lng, modifier } => {
                if self.on_globe() {
                    tracing::debug!("map click while globe is active");
                } else {
                    let (location, role) =
                        MapClick { lat, lng, modifier }.selection(self.start.is_some());
                    self.select_location(now, location, role, &mut effects);
                }
            }

            Intent::InputChanged { role, text } => {
                let timing = self.timing();
                self.fields[role.index()].on_input_change(text, now, &mut self.timers, timing);
            }
            Intent::InputFocused { role } => self.fields[role.index()].on_focus(),
            Intent::InputBlurred { role } => {
                let timing = self.timing();
                self.fields[role.index()].on_blur(now, &mut self.timers, timing);
            }
            Intent::EnterPressed { role } => {
                if let Some(index) = self.fields[role.index()].enter_choice() {
                    self.choose_suggestion(now, role, index, &mut effects);
                }
            }
            Intent::SuggestionChosen { role, index } => {
                self.choose_suggestion(now, role, index, &mut effects);
            }
            Intent::SearchCompleted {
                role,
                generation,
                results,
            } => self.apply_search(now, role, generation, results),

            Intent::SetDepartureTime(raw) => match DepartureTime::parse(&raw) {
                Ok(t) => self.departure = t,
                Err(err) => {
                    tracing::warn!(%err, "keeping previous departure time");
                    self.journal.emit(now, "departure_rejected", raw);
                }
            },
            Intent::SetModel(model) => self.model = model,
            Intent::ToggleDetectors(show) => self.show_detectors = show,

            Intent::CalculateRoute => self.calculate(now, &mut effects),
            Intent::RouteCompleted { ticket, outcome } => self.apply_route(now, ticket, outcome),
            Intent::HealthChecked(outcome) => {
                self.health = HealthStatus::from_check(outcome);
                tracing::info!(health = ?self.health, "route service health");
            }

            Intent::Reset => self.reset(now),
        }
        effects
    }

    /// Fires every timer due at `now`, in deadline order.
    pub fn advance(&mut self, now: Time) -> Vec<Effect> {
        let mut effects = Vec::new();
        for key in self.timers.take_due(now) {
            match key {
                TimerKey::Debounce(role) => {
                    if let Some((generation, query)) = self.fields[role.index()].begin_search() {
                        tracing::debug!(role = role.as_str(), generation, %query, "search");
                        self.metrics.incr("search.issued");
                        effects.push(Effect::Search {
                            role,
                            generation,
                            query,
                        });
                    }
                }
                TimerKey::HideSuggestions(role) => self.fields[role.index()].on_hide_elapsed(),
                TimerKey::ViewTransition => {
                    if self.view.on_transition_elapsed() {
                        self.journal.emit(now, "view", ViewMode::TwoD.as_str());
                        if let Some(start) = &self.start {
                            effects.push(Effect::FlyTo(self.camera.follow(start, now)));
                        }
                    }
                }
                TimerKey::HidePrompt => self.prompt_visible = false,
            }
        }
        self.metrics.set_gauge(
            "timers.pending",
            i64::try_from(self.timers.len()).unwrap_or(i64::MAX),
        );
        effects
    }

    fn on_globe(&self) -> bool {
        self.view.mode() == ViewMode::ThreeD
    }

    fn show_prompt(&mut self, now: Time) {
        self.prompt_visible = true;
        self.timers.schedule(
            TimerKey::HidePrompt,
            now.after(self.config.timing.prompt_visible()),
        );
    }

    fn select_location(
        &mut self,
        now: Time,
        location: Location,
        role: Role,
        effects: &mut Vec<Effect>,
    ) {
        tracing::info!(role = role.as_str(), label = %location.label(), "location selected");
        self.journal.emit(now, "select", format!("{} {}", role.as_str(), location.label()));
        match role {
            Role::Start => {
                if self.view.mode() == ViewMode::TwoD {
                    effects.push(Effect::FlyTo(self.camera.follow(&location, now)));
                }
                self.start = Some(location);
                let delay = self.config.timing.view_transition();
                self.view.on_start_selected(now, &mut self.timers, delay);
            }
            Role::End => self.end = Some(location),
        }
        let slot = match role {
            Role::Start => self.start.as_ref(),
            Role::End => self.end.as_ref(),
        };
        self.fields[role.index()].sync_from(slot);
    }

    fn choose_suggestion(&mut self, now: Time, role: Role, index: usize, effects: &mut Vec<Effect>) {
        if let Some(location) = self.fields[role.index()].choose(index, &mut self.timers) {
            self.select_location(now, location, role, effects);
        }
    }

    fn apply_search(&mut self, now: Time, role: Role, generation: u64, results: Vec<SearchResult>) {
        let count = results.len();
        if self.fields[role.index()].apply_results(generation, results) {
            self.metrics.observe("search.results", i64::try_from(count).unwrap_or(i64::MAX));
        } else {
            self.metrics.incr("search.stale_dropped");
            self.journal.emit(now, "search_stale", format!("{} #{generation}", role.as_str()));
        }
    }

    fn calculate(&mut self, now: Time, effects: &mut Vec<Effect>) {
        if self.route.is_loading() {
            tracing::debug!("route already loading");
            return;
        }
        match self.route.begin(
            self.start.as_ref(),
            self.end.as_ref(),
            self.departure,
            self.config.routing.service_date,
        ) {
            Ok((ticket, request)) => {
                self.metrics.incr("route.issued");
                self.journal.emit(now, "route", format!("ticket #{ticket}"));
                effects.push(Effect::CalculateRoute { ticket, request });
            }
            Err(err) => {
                self.metrics.incr("route.rejected");
                tracing::warn!(%err, "route not requested");
            }
        }
    }

    fn apply_route(&mut self, now: Time, ticket: u64, outcome: Result<RouteData, RouteError>) {
        let failed = outcome.is_err();
        if !self.route.finish(ticket, outcome) {
            self.metrics.incr("route.stale_dropped");
            return;
        }
        if failed {
            self.metrics.incr("route.failed");
        }
        self.journal.emit(now, "route_done", format!("ticket #{ticket} failed={failed}"));
    }

    fn reset(&mut self, now: Time) {
        self.start = None;
        self.end = None;
        self.route.reset();
        self.view.reset(&mut self.timers);
        for field in &mut self.fields {
            field.reset(&mut self.timers);
        }
        self.globe.reset();
        self.camera.reset();
        // The globe remounts with its landing title.
        self.show_prompt(now);
        tracing::info!(metrics = ?self.metrics.snapshot(), "session reset");
    }

    pub fn snapshot(&self, now: Time) -> Snapshot {
        let mode = self.view.mode();
        let panel = PanelSnapshot {
            start_field: self.fields[Role::Start.index()].snapshot(),
            end_field: self.fields[Role::End.index()].snapshot(),
            departure_time: self.departure.hhmm(),
            model: self.model.into(),
            models: PredictionModel::ALL.into_iter().map(ModelOption::from).collect(),
            show_detectors: self.show_detectors,
            loading: self.route.is_loading(),
            error: self.route.error().map(str::to_string),
            route: self.route.summary(),
            can_calculate: self.can_calculate(),
            can_reset: self.can_reset(),
        };
        let map = (mode == ViewMode::TwoD).then(|| {
            build_map_scene(SceneInput {
                camera: self.camera.sample(now),
                start: self.start.as_ref(),
                end: self.end.as_ref(),
                route: self.route.result(),
                show_detectors: self.show_detectors,
            })
        });
        Snapshot {
            view_mode: mode,
            prompt: (mode == ViewMode::ThreeD && self.prompt_visible).then_some(GLOBE_PROMPT),
            start: self.start.clone(),
            end: self.end.clone(),
            panel,
            map,
            health: self.health.clone(),
        }
    }
}
