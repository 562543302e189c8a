//! Rate limiting for periodic telemetry.

/// Opens at most once per `interval_ms`, measured from the last time it
/// opened.
///
/// The gate holds the timestamp of the last emission. Before the first
/// emission that timestamp is the start instant (0 unless built with
/// [`RateGate::starting_at`]), so the first record goes out one full
/// interval after start.
///
/// ```
/// use joystick_core::RateGate;
///
/// let mut gate = RateGate::new(50);
/// assert!(!gate.poll(49));
/// assert!(gate.poll(52));
/// assert!(!gate.poll(53));
/// assert!(gate.poll(102));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateGate {
    interval_ms: u32,
    last_ms: u32,
}

impl RateGate {
    #[must_use]
    pub const fn new(interval_ms: u32) -> Self {
        Self::starting_at(interval_ms, 0)
    }

    /// Gate whose first interval is measured from `start_ms`.
    #[must_use]
    pub const fn starting_at(interval_ms: u32, start_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: start_ms,
        }
    }

    #[must_use]
    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Timestamp of the last emission (or the start instant).
    #[must_use]
    pub const fn last_emission(&self) -> u32 {
        self.last_ms
    }

    /// `true` if an emission at `now_ms` would be allowed. Does not reset.
    #[inline]
    #[must_use]
    pub const fn ready(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_ms) >= self.interval_ms
    }

    /// Decide whether to emit at `now_ms`; on `true` the gate restarts
    /// from `now_ms`.
    #[inline]
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if self.ready(now_ms) {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_emission_after_one_interval() {
        let mut gate = RateGate::new(50);
        assert!(!gate.poll(0));
        assert!(!gate.poll(49));
        assert!(gate.poll(50));
        assert_eq!(gate.last_emission(), 50);
    }

    #[test]
    fn test_resets_on_emission_not_on_schedule() {
        let mut gate = RateGate::new(50);
        assert!(gate.poll(52));
        assert!(!gate.poll(53));
        assert!(!gate.poll(101));
        assert!(gate.poll(102));
    }

    #[test]
    fn test_ready_does_not_consume() {
        let gate = RateGate::new(50);
        assert!(gate.ready(60));
        assert!(gate.ready(60));
        assert_eq!(gate.last_emission(), 0);
    }

    #[test]
    fn test_survives_timer_wrap() {
        let mut gate = RateGate::starting_at(50, u32::MAX - 20);
        assert!(!gate.poll(10));
        assert!(gate.poll(29));
        assert_eq!(gate.last_emission(), 29);
    }
}
