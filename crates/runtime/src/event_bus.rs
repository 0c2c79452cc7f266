use std::collections::VecDeque;

use foundation::Time;

/// One journal line: what the client core handled and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub at: Time,
    pub kind: &'static str,
    pub message: String,
}

/// Bounded, append-only journal of handled intents and effects.
///
/// Oldest entries are evicted once `capacity` is reached so a long-lived
/// browser session does not grow without bound.
#[derive(Debug)]
pub struct EventBus {
    capacity: usize,
    events: VecDeque<Event>,
    evicted: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            evicted: 0,
        }
    }

    pub fn emit(&mut self, at: Time, kind: &'static str, message: impl Into<String>) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.evicted += 1;
        }
        let message = message.into();
        tracing::trace!(at = at.as_millis(), kind, %message, "event");
        self.events.push_back(Event { at, kind, message });
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of entries dropped to respect the capacity.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.back()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use foundation::Time;

    #[test]
    fn records_events_with_timestamp() {
        let mut bus = EventBus::new();
        bus.emit(Time(42), "test", "hello");
        assert_eq!(bus.len(), 1);
        let e = bus.last().unwrap();
        assert_eq!(e.at, Time(42));
        assert_eq!(e.kind, "test");
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Time(0), "k", "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut bus = EventBus::with_capacity(2);
        bus.emit(Time(1), "k", "a");
        bus.emit(Time(2), "k", "b");
        bus.emit(Time(3), "k", "c");
        let msgs: Vec<_> = bus.events().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, vec!["b", "c"]);
        assert_eq!(bus.evicted(), 1);
    }
}
