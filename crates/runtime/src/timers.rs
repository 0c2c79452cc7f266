use std::fmt::Debug;

use foundation::Time;

#[derive(Debug, Clone)]
struct Pending<K> {
    key: K,
    deadline: Time,
    order: u64,
}

/// Cancellable one-shot timers keyed by identity.
///
/// At most one deadline exists per key: scheduling a key that is already
/// pending replaces it, which is what gives debouncing its "latest wins"
/// behaviour. Timers only fire when the host calls [`TimerQueue::take_due`].
///
/// Ordering contract:
/// - Due keys are returned ordered by `(deadline, scheduling_order)`.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    next_order: u64,
    pending: Vec<Pending<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            next_order: 0,
            pending: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + Debug> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `key` to fire at `deadline`.
    ///
    /// Returns `true` if an earlier pending deadline for the same key was replaced.
    pub fn schedule(&mut self, key: K, deadline: Time) -> bool {
        let replaced = self.cancel(key);
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.pending.push(Pending {
            key,
            deadline,
            order,
        });
        tracing::trace!(?key, deadline = deadline.as_millis(), replaced, "timer armed");
        replaced
    }

    /// Returns `true` if the key was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.key != key);
        before != self.pending.len()
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.pending.iter().any(|p| p.key == key)
    }

    pub fn deadline(&self, key: K) -> Option<Time> {
        self.pending
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.deadline)
    }

    /// Earliest pending deadline, so hosts can sleep until it.
    pub fn next_deadline(&self) -> Option<Time> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Removes and returns every key whose deadline is at or before `now`.
    pub fn take_due(&mut self, now: Time) -> Vec<K> {
        let mut due: Vec<Pending<K>> = Vec::new();
        self.pending.retain(|p| {
            if p.deadline <= now {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| {
            a.deadline
                .cmp(&b.deadline)
                .then_with(|| a.order.cmp(&b.order))
        });
        due.into_iter().map(|p| p.key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;
    use foundation::Time;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Key {
        A,
        B,
    }

    #[test]
    fn fires_only_when_due() {
        let mut q = TimerQueue::new();
        q.schedule(Key::A, Time(800));
        assert!(q.take_due(Time(799)).is_empty());
        assert_eq!(q.take_due(Time(800)), vec![Key::A]);
        assert!(q.is_empty());
    }

    #[test]
    fn rescheduling_replaces_pending_deadline() {
        let mut q = TimerQueue::new();
        assert!(!q.schedule(Key::A, Time(800)));
        assert!(q.schedule(Key::A, Time(1_100)));
        assert_eq!(q.len(), 1);
        assert!(q.take_due(Time(900)).is_empty());
        assert_eq!(q.take_due(Time(1_100)), vec![Key::A]);
    }

    #[test]
    fn cancel_reports_whether_pending() {
        let mut q = TimerQueue::new();
        q.schedule(Key::A, Time(10));
        assert!(q.cancel(Key::A));
        assert!(!q.cancel(Key::A));
        assert!(q.take_due(Time(100)).is_empty());
    }

    #[test]
    fn due_keys_are_ordered_by_deadline_then_insertion() {
        let mut q = TimerQueue::new();
        q.schedule(Key::B, Time(50));
        q.schedule(Key::A, Time(20));
        assert_eq!(q.take_due(Time(100)), vec![Key::A, Key::B]);

        q.schedule(Key::B, Time(30));
        q.schedule(Key::A, Time(30));
        assert_eq!(q.take_due(Time(30)), vec![Key::B, Key::A]);
    }

    #[test]
    fn next_deadline_is_the_minimum() {
        let mut q = TimerQueue::new();
        assert_eq!(q.next_deadline(), None);
        q.schedule(Key::A, Time(500));
        q.schedule(Key::B, Time(300));
        assert_eq!(q.next_deadline(), Some(Time(300)));
        assert_eq!(q.deadline(Key::A), Some(Time(500)));
    }
}
