use std::time::Duration;

use foundation::{Location, Role, Time};
use geocoding::SearchResult;
use runtime::TimerQueue;
use serde::Serialize;

use crate::intent::TimerKey;

/// Debounce and blur-hide delays for one field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldTiming {
    pub debounce: Duration,
    pub blur_hide: Duration,
}

/// One location field with type-ahead suggestions.
///
/// Keystrokes arm a debounce timer; when it fires, [`Autocomplete::begin_search`]
/// hands out a query tagged with a fresh generation. Results are applied only
/// when they carry the latest generation, so a slow response can never
/// overwrite a newer one, and anything that makes the pending query
/// irrelevant (choosing a suggestion, clearing the text, reset) moves the
/// generation on as well.
#[derive(Debug, Clone)]
pub struct Autocomplete {
    role: Role,
    min_chars: usize,
    text: String,
    suggestions: Vec<SearchResult>,
    visible: bool,
    searching: bool,
    focused: bool,
    generation: u64,
}

impl Autocomplete {
    pub fn new(role: Role, min_chars: usize) -> Self {
        Self {
            role,
            min_chars,
            text: String::new(),
            suggestions: Vec::new(),
            visible: false,
            searching: false,
            focused: false,
            generation: 0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggestions(&self) -> &[SearchResult] {
        &self.suggestions
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn searchable(&self) -> bool {
        self.text.chars().count() >= self.min_chars
    }

    /// Keystroke. Short text clears the dropdown at once; otherwise the
    /// debounce timer is (re)armed.
    pub fn on_input_change(
        &mut self,
        text: String,
        now: Time,
        timers: &mut TimerQueue<TimerKey>,
        timing: FieldTiming,
    ) {
        self.text = text;
        if !self.searchable() {
            timers.cancel(TimerKey::Debounce(self.role));
            self.suggestions.clear();
            self.visible = false;
            self.searching = false;
            self.invalidate();
            return;
        }
        self.searching = true;
        timers.schedule(TimerKey::Debounce(self.role), now.after(timing.debounce));
    }

    /// Debounce elapsed: the query to send and the generation it answers to.
    pub fn begin_search(&mut self) -> Option<(u64, String)> {
        if !self.searchable() {
            self.searching = false;
            return None;
        }
        self.generation += 1;
        self.searching = true;
        Some((self.generation, self.text.clone()))
    }

    /// Returns `false` when the results answer a superseded query.
    pub fn apply_results(&mut self, generation: u64, results: Vec<SearchResult>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                role = self.role.as_str(),
                generation,
                latest = self.generation,
                "dropping stale suggestions"
            );
            return false;
        }
        self.suggestions = results;
        self.visible = true;
        self.searching = false;
        true
    }

    /// Reopens the dropdown if there is something worth showing.
    ///
    /// A hide already scheduled by an earlier blur still fires.
    pub fn on_focus(&mut self) {
        self.focused = true;
        if self.searchable() && !self.suggestions.is_empty() {
            self.visible = true;
        }
    }

    /// Hides the dropdown after a grace period so a click on a suggestion lands first.
    pub fn on_blur(&mut self, now: Time, timers: &mut TimerQueue<TimerKey>, timing: FieldTiming) {
        self.focused = false;
        timers.schedule(TimerKey::HideSuggestions(self.role), now.after(timing.blur_hide));
    }

    pub fn on_hide_elapsed(&mut self) {
        self.visible = false;
    }

    /// The suggestion Enter would choose.
    pub fn enter_choice(&self) -> Option<usize> {
        (!self.suggestions.is_empty()).then_some(0)
    }

    /// Chooses the suggestion at `index`.
    ///
    /// On success the field shows the suggestion's full name, the dropdown
    /// closes and any search still in flight is abandoned. A suggestion with
    /// unreadable coordinates leaves the field untouched.
    pub fn choose(&mut self, index: usize, timers: &mut TimerQueue<TimerKey>) -> Option<Location> {
        let suggestion = self.suggestions.get(index)?;
        let location = match suggestion.to_location() {
            Ok(loc) => loc,
            Err(err) => {
                tracing::warn!(role = self.role.as_str(), %err, "ignoring suggestion");
                return None;
            }
        };
        self.text = suggestion.display_name.clone();
        self.suggestions.clear();
        self.visible = false;
        self.searching = false;
        timers.cancel(TimerKey::Debounce(self.role));
        self.invalidate();
        Some(location)
    }

    /// Mirrors a location chosen elsewhere (map, globe) into the text box.
    pub fn sync_from(&mut self, location: Option<&Location>) {
        let Some(location) = location else {
            return;
        };
        let label = location.label();
        if self.text != label {
            self.text = label;
        }
    }

    pub fn reset(&mut self, timers: &mut TimerQueue<TimerKey>) {
        timers.cancel(TimerKey::Debounce(self.role));
        timers.cancel(TimerKey::HideSuggestions(self.role));
        self.text.clear();
        self.suggestions.clear();
        self.visible = false;
        self.searching = false;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            role: self.role,
            text: self.text.clone(),
            searching: self.searching,
            dropdown_visible: self.visible,
            suggestions: self
                .suggestions
                .iter()
                .map(|s| SuggestionView {
                    primary: s.primary_name().to_string(),
                    display_name: s.display_name.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionView {
    /// Text before the first comma, shown bold.
    pub primary: String,
    pub display_name: String,
}

/// Render state of one field.
///
/// `dropdown_visible` with no suggestions means "searched, nothing found".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSnapshot {
    pub role: Role,
    pub text: String,
    pub searching: bool,
    pub dropdown_visible: bool,
    pub suggestions: Vec<SuggestionView>,
}
