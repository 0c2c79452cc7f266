use std::time::Duration;

use foundation::math::{ease_in_out, lerp};
use foundation::{Location, Time};
use serde::Serialize;

/// Taipei city centre, `[lat, lng]`.
pub const DEFAULT_MAP_CENTER: [f64; 2] = [25.0330, 121.5654];
pub const DEFAULT_MAP_ZOOM: f64 = 12.0;
/// Zoom the map settles at after following the start location.
pub const FOLLOW_ZOOM: f64 = 13.0;
pub const FLY_TO_DURATION: Duration = Duration::from_millis(1_500);

/// 2D map viewport.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct MapCamera {
    /// `[lat, lng]`.
    pub center: [f64; 2],
    pub zoom: f64,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self {
            center: DEFAULT_MAP_CENTER,
            zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

/// Instruction for the map renderer to animate to a new viewport.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct FlyTo {
    pub center: [f64; 2],
    pub zoom: f64,
    pub duration_ms: u64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Flight {
    from: MapCamera,
    to: MapCamera,
    started: Time,
    duration: Duration,
}

/// Keeps the 2D map centred on the start location.
///
/// Each time the start location changes while the map is shown, the camera
/// flies to it over a fixed duration at a fixed zoom. Renderers with native
/// fly-to consume the returned [`FlyTo`]; others can poll [`CameraFollow::sample`].
#[derive(Debug, Clone)]
pub struct CameraFollow {
    home: MapCamera,
    zoom: f64,
    duration: Duration,
    resting: MapCamera,
    flight: Option<Flight>,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self::new(MapCamera::default(), FOLLOW_ZOOM, FLY_TO_DURATION)
    }
}

impl CameraFollow {
    pub fn new(home: MapCamera, zoom: f64, duration: Duration) -> Self {
        Self {
            home,
            zoom,
            duration,
            resting: home,
            flight: None,
        }
    }

    /// Starts a flight from wherever the camera currently is to `target`.
    pub fn follow(&mut self, target: &Location, now: Time) -> FlyTo {
        let from = self.sample(now);
        let to = MapCamera {
            center: target.lat_lng(),
            zoom: self.zoom,
        };
        self.flight = Some(Flight {
            from,
            to,
            started: now,
            duration: self.duration,
        });
        self.resting = to;
        tracing::debug!(lat = target.lat, lng = target.lng, "camera follow");
        FlyTo {
            center: to.center,
            zoom: to.zoom,
            duration_ms: u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Camera pose at `now`, eased along the current flight if one is running.
    pub fn sample(&self, now: Time) -> MapCamera {
        let Some(flight) = self.flight else {
            return self.resting;
        };
        let elapsed = now.since(flight.started);
        if elapsed >= flight.duration {
            return flight.to;
        }
        let t = ease_in_out(elapsed.as_secs_f64() / flight.duration.as_secs_f64());
        MapCamera {
            center: [
                lerp(flight.from.center[0], flight.to.center[0], t),
                lerp(flight.from.center[1], flight.to.center[1], t),
            ],
            zoom: lerp(flight.from.zoom, flight.to.zoom, t),
        }
    }

    pub fn is_flying(&self, now: Time) -> bool {
        self.flight
            .is_some_and(|f| now.since(f.started) < f.duration)
    }

    /// Back to the initial viewport, as a freshly mounted map would be.
    pub fn reset(&mut self) {
        self.resting = self.home;
        self.flight = None;
    }
}
