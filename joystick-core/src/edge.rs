//! Edge-line watchers.
//!
//! A [`LineWatcher`] owns the input pins behind one edge line. It waits for a
//! rising edge on any of them, then hands the line to a [`DispatchTable`],
//! reading pin levels on demand for shared lines. Watchers are meant to run
//! in interrupt context (or an executor above the report loop) and never do
//! anything but latch.

use crate::dispatch::{DispatchTable, EdgeLine, LevelReader};
use crate::latch::EdgeLatch;
use embassy_futures::select::select;
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;
use heapless::Vec;
use joystick_proto::{Button, ButtonSet};

/// Most pins that share one edge line.
pub const MAX_PINS_PER_LINE: usize = 2;

/// The pins of one edge line and the buttons they belong to.
///
/// Pins are active-high: a pressed button reads high against its pull-down.
pub struct LineWatcher<P> {
    line: EdgeLine,
    pins: Vec<(Button, P), MAX_PINS_PER_LINE>,
}

impl<P: InputPin + Wait> LineWatcher<P> {
    #[must_use]
    pub const fn new(line: EdgeLine) -> Self {
        Self {
            line,
            pins: Vec::new(),
        }
    }

    /// Attach `button`'s pin to this line.
    ///
    /// # Panics
    ///
    /// If the line already holds [`MAX_PINS_PER_LINE`] pins.
    #[must_use]
    pub fn with_pin(mut self, button: Button, pin: P) -> Self {
        if self.pins.push((button, pin)).is_err() {
            panic!("edge line {} has no room for {:?}", self.line.0, button);
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn line(&self) -> EdgeLine {
        self.line
    }

    /// `true` if every attached button is routed to this line in `table`.
    #[must_use]
    pub fn matches(&self, table: &DispatchTable) -> bool {
        self.pins
            .iter()
            .all(|(button, _)| table.line_of(*button) == Some(self.line))
    }

    /// Wait until any pin on the line sees a rising edge.
    ///
    /// A line with no pins never wakes.
    pub async fn wait_for_edge(&mut self) {
        match self.pins.as_mut_slice() {
            [(_, pin)] => {
                let _ = pin.wait_for_rising_edge().await;
            }
            [(_, first), (_, second)] => {
                let _ = select(first.wait_for_rising_edge(), second.wait_for_rising_edge()).await;
            }
            _ => core::future::pending::<()>().await,
        }
    }

    /// Resolve an edge on this line against `table` and latch the result.
    pub fn latch_edge(&mut self, table: &DispatchTable, latch: &EdgeLatch) -> ButtonSet {
        let line = self.line;
        table.on_edge(line, self, latch)
    }

    /// Watch the line forever, calling `observe` with every latched set.
    pub async fn run<F: FnMut(EdgeLine, ButtonSet)>(
        &mut self,
        table: &DispatchTable,
        latch: &EdgeLatch,
        mut observe: F,
    ) -> ! {
        loop {
            self.wait_for_edge().await;
            let fired = self.latch_edge(table, latch);
            observe(self.line, fired);
        }
    }
}

impl<P: InputPin> LevelReader for LineWatcher<P> {
    /// A pin that cannot be read counts as released.
    fn is_active(&mut self, button: Button) -> bool {
        self.pins
            .iter_mut()
            .find(|(b, _)| *b == button)
            .is_some_and(|(_, pin)| pin.is_high().unwrap_or(false))
    }
}
