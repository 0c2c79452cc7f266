use std::time::Duration;

use foundation::{Time, ViewMode};
use runtime::TimerQueue;

use crate::intent::TimerKey;

/// Decides which renderer is on screen.
///
/// The app opens on the globe. The first time a start location is chosen
/// there, a short transition is armed and the flat map takes over when it
/// elapses. Only reset brings the globe back.
#[derive(Debug, Clone, Default)]
pub struct ViewCoordinator {
    mode: ViewMode,
}

impl ViewCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Returns `true` if this selection armed the transition.
    pub fn on_start_selected(
        &mut self,
        now: Time,
        timers: &mut TimerQueue<TimerKey>,
        delay: Duration,
    ) -> bool {
        if self.mode != ViewMode::ThreeD || timers.is_pending(TimerKey::ViewTransition) {
            return false;
        }
        timers.schedule(TimerKey::ViewTransition, now.after(delay));
        true
    }

    /// Returns `true` if the mode changed.
    pub fn on_transition_elapsed(&mut self) -> bool {
        if self.mode == ViewMode::TwoD {
            return false;
        }
        self.mode = ViewMode::TwoD;
        tracing::info!("switched to 2d map");
        true
    }

    pub fn reset(&mut self, timers: &mut TimerQueue<TimerKey>) {
        timers.cancel(TimerKey::ViewTransition);
        self.mode = ViewMode::ThreeD;
    }
}
