//! Monotonic clock abstraction and the bounded polling primitive.

/// Free-running millisecond clock.
///
/// The counter is allowed to wrap; callers compare instants with
/// `wrapping_sub`.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// A bounded wait ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaitTimeout;

/// Poll until `poll` yields a value or `timeout_ms` pass on `clock`.
///
/// `poll` always runs at least once, so a condition that is already met
/// succeeds even with a zero timeout. This is a busy wait; use it for
/// short hardware handshakes (conversion-ready bits and the like).
///
/// ```
/// use core::cell::Cell;
/// use joystick_core::{poll_until, Clock, WaitTimeout};
///
/// struct Ticking(Cell<u32>);
/// impl Clock for Ticking {
///     fn now_ms(&self) -> u32 {
///         let t = self.0.get();
///         self.0.set(t + 1);
///         t
///     }
/// }
///
/// let clock = Ticking(Cell::new(0));
/// assert_eq!(poll_until(&clock, 100, || None::<u16>), Err(WaitTimeout));
///
/// let mut polls = 0;
/// let ready = poll_until(&clock, 100, || {
///     polls += 1;
///     (polls == 3).then_some(4095u16)
/// });
/// assert_eq!(ready, Ok(4095));
/// ```
pub fn poll_until<C, T, F>(clock: &C, timeout_ms: u32, mut poll: F) -> Result<T, WaitTimeout>
where
    C: Clock + ?Sized,
    F: FnMut() -> Option<T>,
{
    let start = clock.now_ms();
    loop {
        if let Some(value) = poll() {
            return Ok(value);
        }
        if clock.now_ms().wrapping_sub(start) >= timeout_ms {
            return Err(WaitTimeout);
        }
    }
}
