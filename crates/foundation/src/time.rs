use std::time::Duration;

/// Host-supplied timestamp in milliseconds on a monotonic clock.
///
/// Nothing in the client core reads the wall clock; every entry point takes a
/// `Time` so runs can be recorded and replayed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub u64);

impl Time {
    pub const ZERO: Time = Time(0);

    pub fn from_millis(ms: u64) -> Self {
        Time(ms)
    }

    /// Browser hosts hand out fractional milliseconds; negative and NaN clamp to zero.
    pub fn from_millis_f64(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Time(ms as u64)
        } else {
            Time(0)
        }
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn after(self, delay: Duration) -> Self {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        Time(self.0.saturating_add(delay_ms))
    }

    /// Elapsed time since `earlier`, zero if `earlier` is in the future.
    pub fn since(self, earlier: Time) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

#[cfg(test)]
mod tests {
    use super::Time;
    use std::time::Duration;

    #[test]
    fn after_adds_delay() {
        let t = Time::from_millis(1_000);
        assert_eq!(t.after(Duration::from_millis(800)), Time(1_800));
    }

    #[test]
    fn after_saturates() {
        let t = Time(u64::MAX - 1);
        assert_eq!(t.after(Duration::from_secs(5)), Time(u64::MAX));
    }

    #[test]
    fn since_never_goes_negative() {
        assert_eq!(Time(10).since(Time(50)), Duration::ZERO);
        assert_eq!(Time(50).since(Time(10)), Duration::from_millis(40));
    }

    #[test]
    fn fractional_host_time_truncates() {
        assert_eq!(Time::from_millis_f64(1234.9), Time(1234));
        assert_eq!(Time::from_millis_f64(f64::NAN), Time(0));
        assert_eq!(Time::from_millis_f64(-3.0), Time(0));
    }
}
