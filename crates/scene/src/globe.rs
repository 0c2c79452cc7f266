use foundation::Location;
use foundation::math::pixel_distance;

/// Movement beyond this many pixels between pointer-down and release is a rotation, not a tap.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Where a tap on the globe lands: the city centre, independent of the hit point.
pub fn globe_landing_location() -> Location {
    Location::named(25.0330, 121.5654, "Taipei City Center")
}

/// Tap-versus-drag discrimination for the 3D scene.
///
/// The globe renderer rotates on drag; a click event still fires on release.
/// This tracks the gesture so that click is swallowed when the pointer
/// travelled further than the threshold at any point.
#[derive(Debug, Clone)]
pub struct GlobePointer {
    threshold_px: f64,
    down_at: Option<[f64; 2]>,
    dragged: bool,
}

impl Default for GlobePointer {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD_PX)
    }
}

impl GlobePointer {
    pub fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px,
            down_at: None,
            dragged: false,
        }
    }

    pub fn on_pointer_down(&mut self, pos_px: [f64; 2]) {
        self.down_at = Some(pos_px);
        self.dragged = false;
    }

    /// Hover moves with no preceding pointer-down are ignored.
    pub fn on_pointer_move(&mut self, pos_px: [f64; 2]) {
        let Some(origin) = self.down_at else {
            return;
        };
        if pixel_distance(origin, pos_px) > self.threshold_px {
            self.dragged = true;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged
    }

    /// Resolves the gesture. Returns the landing location for a genuine tap.
    pub fn on_click(&mut self) -> Option<Location> {
        let dragged = self.dragged;
        self.down_at = None;
        self.dragged = false;
        if dragged {
            tracing::debug!("globe click suppressed after drag");
            None
        } else {
            Some(globe_landing_location())
        }
    }

    pub fn reset(&mut self) {
        self.down_at = None;
        self.dragged = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_emits_landing_location() {
        let mut g = GlobePointer::default();
        g.on_pointer_down([100.0, 100.0]);
        g.on_pointer_move([102.0, 103.0]);
        let loc = g.on_click().unwrap();
        assert_eq!(loc.name.as_deref(), Some("Taipei City Center"));
        assert_eq!((loc.lat, loc.lng), (25.0330, 121.5654));
    }

    #[test]
    fn drag_beyond_threshold_suppresses_click() {
        let mut g = GlobePointer::default();
        g.on_pointer_down([100.0, 100.0]);
        g.on_pointer_move([104.0, 104.0]);
        assert!(g.is_dragging());
        assert!(g.on_click().is_none());
    }

    #[test]
    fn returning_to_origin_is_still_a_drag() {
        let mut g = GlobePointer::default();
        g.on_pointer_down([0.0, 0.0]);
        g.on_pointer_move([40.0, 0.0]);
        g.on_pointer_move([0.0, 0.0]);
        assert!(g.on_click().is_none());
    }

    #[test]
    fn exactly_threshold_is_a_tap() {
        let mut g = GlobePointer::default();
        g.on_pointer_down([0.0, 0.0]);
        g.on_pointer_move([3.0, 4.0]);
        assert!(g.on_click().is_some());
    }

    #[test]
    fn hover_without_press_is_ignored() {
        let mut g = GlobePointer::default();
        g.on_pointer_move([500.0, 500.0]);
        assert!(!g.is_dragging());
        assert!(g.on_click().is_some());
    }

    #[test]
    fn each_press_starts_a_fresh_gesture() {
        let mut g = GlobePointer::default();
        g.on_pointer_down([0.0, 0.0]);
        g.on_pointer_move([50.0, 50.0]);
        assert!(g.on_click().is_none());
        g.on_pointer_down([10.0, 10.0]);
        assert!(g.on_click().is_some());
    }
}
