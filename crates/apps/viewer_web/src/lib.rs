//! Browser shell: exposes the route planner core to the page's JavaScript.
//!
//! The page owns the DOM, the globe and the tile map. It forwards user events
//! here with the current `performance.now()` reading, calls [`tick`] from its
//! animation loop, and redraws from [`snapshot_json`]. Network effects run on
//! the browser's fetch via [`fetch::GlooTransport`].

use std::cell::RefCell;
use std::rc::Rc;

use console_error_panic_hook::set_once;
use foundation::{Role, Time};
use scene::FlyTo;
use session::{ClientConfig, Effect, EffectRunner, Intent, PredictionModel, Store};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub mod fetch;
pub mod logging;

use fetch::GlooTransport;

struct Shell {
    store: Store,
    runner: Rc<EffectRunner<GlooTransport>>,
    camera: Vec<FlyTo>,
    /// Latest host time; responses are applied at this instant.
    clock: Time,
}

thread_local! {
    static STATE: RefCell<Option<Shell>> = const { RefCell::new(None) };
}

fn with_shell<R>(f: impl FnOnce(&mut Shell) -> R) -> Result<R, JsValue> {
    STATE.with(|state| {
        state
            .borrow_mut()
            .as_mut()
            .map(f)
            .ok_or_else(|| JsValue::from_str("viewer not initialised; call init() first"))
    })
}

fn parse_role(role: &str) -> Result<Role, JsValue> {
    Role::parse(role).ok_or_else(|| JsValue::from_str(&format!("unknown field role {role:?}")))
}

fn dispatch(now_ms: f64, intent: Intent) -> Result<(), JsValue> {
    let now = Time::from_millis_f64(now_ms);
    let effects = with_shell(|shell| {
        shell.clock = shell.clock.max(now);
        shell.store.dispatch(now, intent)
    })?;
    run_effects(effects);
    Ok(())
}

/// Camera moves are queued for the page; network work runs concurrently and
/// feeds its outcome back through the store.
fn run_effects(effects: Vec<Effect>) {
    for effect in effects {
        if let Effect::FlyTo(fly) = effect {
            if let Err(err) = with_shell(|shell| shell.camera.push(fly)) {
                tracing::warn!(?err, "dropping camera move");
            }
            continue;
        }
        let runner = match with_shell(|shell| Rc::clone(&shell.runner)) {
            Ok(runner) => runner,
            Err(err) => {
                tracing::warn!(?err, "dropping effect");
                return;
            }
        };
        spawn_local(async move {
            let Some(intent) = runner.run(effect).await else {
                return;
            };
            match with_shell(|shell| shell.store.dispatch(shell.clock, intent)) {
                Ok(follow_up) => run_effects(follow_up),
                Err(err) => tracing::warn!(?err, "response arrived without a session"),
            }
        });
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    logging::setup_logging();
    Ok(())
}

/// Creates the session. `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn init(config_json: &str, now_ms: f64) -> Result<(), JsValue> {
    let config = if config_json.trim().is_empty() {
        ClientConfig::default()
    } else {
        ClientConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    let now = Time::from_millis_f64(now_ms);
    let runner = Rc::new(EffectRunner::new(GlooTransport, &config));
    let mut store = Store::new(config);
    let effects = store.start(now);
    STATE.with(|state| {
        *state.borrow_mut() = Some(Shell {
            store,
            runner,
            camera: Vec::new(),
            clock: now,
        });
    });
    tracing::info!("viewer initialised");
    run_effects(effects);
    Ok(())
}

/// Fires due timers. Returns the next deadline in ms, if any.
#[wasm_bindgen]
pub fn tick(now_ms: f64) -> Result<Option<f64>, JsValue> {
    let now = Time::from_millis_f64(now_ms);
    let (effects, next) = with_shell(|shell| {
        shell.clock = shell.clock.max(now);
        let effects = shell.store.advance(now);
        (effects, shell.store.next_deadline())
    })?;
    run_effects(effects);
    Ok(next.map(|t| t.as_millis() as f64))
}

#[wasm_bindgen]
pub fn input_changed(role: &str, text: String, now_ms: f64) -> Result<(), JsValue> {
    let role = parse_role(role)?;
    dispatch(now_ms, Intent::InputChanged { role, text })
}

#[wasm_bindgen]
pub fn input_focused(role: &str, now_ms: f64) -> Result<(), JsValue> {
    let role = parse_role(role)?;
    dispatch(now_ms, Intent::InputFocused { role })
}

#[wasm_bindgen]
pub fn input_blurred(role: &str, now_ms: f64) -> Result<(), JsValue> {
    let role = parse_role(role)?;
    dispatch(now_ms, Intent::InputBlurred { role })
}

#[wasm_bindgen]
pub fn enter_pressed(role: &str, now_ms: f64) -> Result<(), JsValue> {
    let role = parse_role(role)?;
    dispatch(now_ms, Intent::EnterPressed { role })
}

#[wasm_bindgen]
pub fn suggestion_chosen(role: &str, index: usize, now_ms: f64) -> Result<(), JsValue> {
    let role = parse_role(role)?;
    dispatch(now_ms, Intent::SuggestionChosen { role, index })
}

#[wasm_bindgen]
pub fn globe_pointer_down(x: f64, y: f64, now_ms: f64) -> Result<(), JsValue> {
    dispatch(now_ms, Intent::GlobePointerDown { x, y })
}

#[wasm_bindgen]
pub fn globe_pointer_move(x: f64, y: f64, now_ms: f64) -> Result<(), JsValue> {
    dispatch(now_ms, Intent::GlobePointerMove { x, y })
}

#[wasm_bindgen]
pub fn globe_click(now_ms: f64) -> Result<(), JsValue> {
    dispatch(now_ms, Intent::GlobeClick)
}

#[wasm_bindgen]
pub fn map_click(lat: f64, lng: f64, shift: bool, now_ms: f64) -> Result<(), JsValue> {
    dispatch(now_ms, Intent::MapClick { lat, lng, modifier: shift })
}

#[wasm_bindgen]
pub fn set_departure_time(value: String, now_ms: f64) -> Result<(), JsValue> {
    dispatch(now_ms, Intent::SetDepartureTime(value))
}

#[wasm_bindgen]
pub fn set_model(id: &str, now_ms: f64) -> Result<(), JsValue> {
    let model = PredictionModel::from_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("unknown model {id:?}")))?;
    dispatch(now_ms, Intent::SetModel(model))
}

#[wasm_bindgen]
pub fn toggle_detectors(show: bool, now_ms: f64) -> Result<(), JsValue> {
    dispatch(now_ms, Intent::ToggleDetectors(show))
}

#[wasm_bindgen]
pub fn calculate_route(now_ms: f64) -> Result<(), JsValue> {
    dispatch(now_ms, Intent::CalculateRoute)
}

#[wasm_bindgen]
pub fn reset(now_ms: f64) -> Result<(), JsValue> {
    dispatch(now_ms, Intent::Reset)
}

/// Render state as JSON.
#[wasm_bindgen]
pub fn snapshot_json(now_ms: f64) -> Result<String, JsValue> {
    let now = Time::from_millis_f64(now_ms);
    let snapshot = with_shell(|shell| shell.store.snapshot(now))?;
    serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Pending map fly-to commands as a JSON array, oldest first.
#[wasm_bindgen]
pub fn take_camera_commands() -> Result<String, JsValue> {
    let commands = with_shell(|shell| std::mem::take(&mut shell.camera))?;
    serde_json::to_string(&commands).map_err(|e| JsValue::from_str(&e.to_string()))
}
