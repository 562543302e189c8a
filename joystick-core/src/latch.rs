//! Pending-edge flags shared between interrupt context and the report loop.

use joystick_proto::{Button, ButtonSet};
use portable_atomic::{AtomicU8, Ordering};

/// One pending flag per [`Button`], packed into a single atomic byte.
///
/// Writers (edge handlers) only ever OR bits in; the report loop takes the
/// whole byte with one swap. An edge that lands after the swap stays in the
/// latch for the next drain, and an edge can never be drained twice.
///
/// Designed to live in a `static` so interrupt handlers can reach it:
///
/// ```
/// use joystick_core::EdgeLatch;
/// use joystick_proto::Button;
///
/// static LATCH: EdgeLatch = EdgeLatch::new();
///
/// LATCH.set(Button::B);
/// LATCH.set(Button::A);
/// LATCH.set(Button::B);
///
/// let fired: Vec<_> = LATCH.drain_pending().iter().collect();
/// assert_eq!(fired, [Button::A, Button::B]);
/// assert!(LATCH.drain_pending().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct EdgeLatch {
    pending: AtomicU8,
}

impl EdgeLatch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: AtomicU8::new(0),
        }
    }

    /// Mark `button` as fired. Safe to call from interrupt context.
    #[inline]
    pub fn set(&self, button: Button) {
        self.pending.fetch_or(button.mask(), Ordering::Release);
    }

    /// Mark every member of `set` as fired.
    #[inline]
    pub fn set_all(&self, set: ButtonSet) {
        if !set.is_empty() {
            self.pending.fetch_or(set.bits(), Ordering::Release);
        }
    }

    /// Take every pending flag, leaving the latch empty.
    #[inline]
    pub fn drain_pending(&self) -> ButtonSet {
        ButtonSet::from_bits(self.pending.swap(0, Ordering::AcqRel))
    }

    /// Snapshot of the pending flags without clearing them.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> ButtonSet {
        ButtonSet::from_bits(self.pending.load(Ordering::Acquire))
    }
}
