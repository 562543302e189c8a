//! Edge-line dispatch: which button(s) a hardware edge notification means.
//!
//! Every edge notification arrives tagged with the [`EdgeLine`] it came in
//! on. Most lines belong to exactly one button. Some lines are shared by
//! several buttons; for those the only way to tell who fired is to re-read
//! each candidate pin while the handler runs and treat every pin sitting at
//! the active level as fired.
//!
//! The mapping is a declarative [`DispatchTable`] evaluated the same way for
//! every line, so shared-line behaviour can be tested without hardware.

use crate::latch::EdgeLatch;
use joystick_proto::{Button, ButtonSet};

/// Identity of a physical edge-interrupt line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeLine(pub u8);

/// How a route decides whether its button fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolve {
    /// The button owns the line; any edge on it is this button.
    Unconditional,
    /// The line is shared; the button fired only if its pin reads active now.
    ActiveLevel,
}

/// One candidate button on a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub button: Button,
    pub resolve: Resolve,
}

impl Route {
    /// Route for a button that is alone on its line.
    #[must_use]
    pub const fn owner(button: Button) -> Self {
        Self {
            button,
            resolve: Resolve::Unconditional,
        }
    }

    /// Route for a button that shares its line.
    #[must_use]
    pub const fn shared(button: Button) -> Self {
        Self {
            button,
            resolve: Resolve::ActiveLevel,
        }
    }
}

/// All routes hanging off one line.
#[derive(Clone, Copy, Debug)]
pub struct LineRoutes {
    pub line: EdgeLine,
    pub routes: &'static [Route],
}

/// Reads the instantaneous level of a button's pin.
///
/// Called from interrupt context; implementations must not block.
pub trait LevelReader {
    /// `true` if the button's pin is at its active level right now.
    fn is_active(&mut self, button: Button) -> bool;
}

impl<F: FnMut(Button) -> bool> LevelReader for F {
    #[inline]
    fn is_active(&mut self, button: Button) -> bool {
        self(button)
    }
}

/// Static table from edge line to candidate buttons.
///
/// ```
/// use joystick_core::{DispatchTable, EdgeLatch, EdgeLine, LineRoutes, Route};
/// use joystick_proto::{Button, ButtonSet};
///
/// static TABLE: DispatchTable = DispatchTable::new(&[
///     LineRoutes { line: EdgeLine(3), routes: &[Route::owner(Button::B)] },
///     LineRoutes {
///         line: EdgeLine(10),
///         routes: &[Route::shared(Button::A), Route::shared(Button::E)],
///     },
/// ]);
///
/// let latch = EdgeLatch::new();
/// // Only E's pin is high when line 10 fires.
/// let fired = TABLE.on_edge(EdgeLine(10), &mut |b: Button| b == Button::E, &latch);
/// assert_eq!(fired, ButtonSet::from(Button::E));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DispatchTable {
    lines: &'static [LineRoutes],
}

impl DispatchTable {
    #[must_use]
    pub const fn new(lines: &'static [LineRoutes]) -> Self {
        Self { lines }
    }

    #[must_use]
    pub const fn lines(&self) -> &'static [LineRoutes] {
        self.lines
    }

    /// Routes for `line`; empty if the line is not in the table.
    #[must_use]
    pub fn routes(&self, line: EdgeLine) -> &'static [Route] {
        self.lines
            .iter()
            .find(|entry| entry.line == line)
            .map(|entry| entry.routes)
            .unwrap_or(&[])
    }

    /// Work out which buttons an edge on `line` stands for.
    ///
    /// Every candidate is evaluated; several buttons on one shared line can
    /// fire together. A shared line where no pin reads active yields an
    /// empty set.
    pub fn resolve<L: LevelReader + ?Sized>(&self, line: EdgeLine, levels: &mut L) -> ButtonSet {
        let mut fired = ButtonSet::EMPTY;
        for route in self.routes(line) {
            let hit = match route.resolve {
                Resolve::Unconditional => true,
                Resolve::ActiveLevel => levels.is_active(route.button),
            };
            if hit {
                fired.insert(route.button);
            }
        }
        fired
    }

    /// Edge notification entry point; call from interrupt context.
    ///
    /// Resolves `line` and latches whatever fired. Never clears a flag,
    /// never blocks. Returns the set that was latched.
    #[inline]
    pub fn on_edge<L: LevelReader + ?Sized>(
        &self,
        line: EdgeLine,
        levels: &mut L,
        latch: &EdgeLatch,
    ) -> ButtonSet {
        let fired = self.resolve(line, levels);
        latch.set_all(fired);
        fired
    }

    /// Line that `button` is wired to.
    #[must_use]
    pub fn line_of(&self, button: Button) -> Option<EdgeLine> {
        self.lines
            .iter()
            .find(|entry| entry.routes.iter().any(|r| r.button == button))
            .map(|entry| entry.line)
    }

    /// `true` if every button appears on exactly one line, exactly once, and
    /// no line appears twice. Lines with more than one route must resolve
    /// every route by level.
    #[must_use]
    pub fn covers_each_button_once(&self) -> bool {
        let mut seen = ButtonSet::EMPTY;
        for (i, entry) in self.lines.iter().enumerate() {
            if self.lines[..i].iter().any(|e| e.line == entry.line) {
                return false;
            }
            let shared = entry.routes.len() > 1;
            for route in entry.routes {
                if seen.contains(route.button) {
                    return false;
                }
                if shared && route.resolve != Resolve::ActiveLevel {
                    return false;
                }
                seen.insert(route.button);
            }
        }
        seen.len() == Button::ALL.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BOARD: DispatchTable = DispatchTable::new(&[
        LineRoutes {
            line: EdgeLine(3),
            routes: &[Route::owner(Button::B)],
        },
        LineRoutes {
            line: EdgeLine(4),
            routes: &[Route::owner(Button::C)],
        },
        LineRoutes {
            line: EdgeLine(5),
            routes: &[Route::owner(Button::D)],
        },
        LineRoutes {
            line: EdgeLine(8),
            routes: &[Route::owner(Button::F)],
        },
        LineRoutes {
            line: EdgeLine(9),
            routes: &[Route::owner(Button::Joystick)],
        },
        LineRoutes {
            line: EdgeLine(10),
            routes: &[Route::shared(Button::A), Route::shared(Button::E)],
        },
    ]);

    fn nothing_active(_: Button) -> bool {
        false
    }

    #[test]
    fn test_owned_line_fires_without_reading_level() {
        let latch = EdgeLatch::new();
        let mut reads = 0;
        let fired = BOARD.on_edge(
            EdgeLine(4),
            &mut |_: Button| {
                reads += 1;
                false
            },
            &latch,
        );
        assert_eq!(fired, ButtonSet::from(Button::C));
        assert_eq!(reads, 0);
        assert_eq!(latch.pending(), ButtonSet::from(Button::C));
    }

    #[test]
    fn test_shared_line_picks_active_pin() {
        let latch = EdgeLatch::new();
        let fired = BOARD.on_edge(EdgeLine(10), &mut |b: Button| b == Button::A, &latch);
        assert_eq!(fired, ButtonSet::from(Button::A));
        assert_eq!(latch.drain_pending(), ButtonSet::from(Button::A));
    }

    #[test]
    fn test_shared_line_records_both_when_both_active() {
        let latch = EdgeLatch::new();
        let fired = BOARD.on_edge(EdgeLine(10), &mut |_: Button| true, &latch);
        assert_eq!(fired, ButtonSet::from(Button::A) | Button::E);
        assert_eq!(latch.drain_pending().len(), 2);
    }

    #[test]
    fn test_shared_line_glitch_is_lost() {
        let latch = EdgeLatch::new();
        let fired = BOARD.on_edge(EdgeLine(10), &mut nothing_active, &latch);
        assert!(fired.is_empty());
        assert!(latch.pending().is_empty());
    }

    #[test]
    fn test_unknown_line_is_ignored() {
        let latch = EdgeLatch::new();
        let fired = BOARD.on_edge(EdgeLine(42), &mut |_: Button| true, &latch);
        assert!(fired.is_empty());
        assert!(latch.pending().is_empty());
    }

    #[test]
    fn test_on_edge_never_clears() {
        let latch = EdgeLatch::new();
        latch.set(Button::E);
        BOARD.on_edge(EdgeLine(10), &mut |b: Button| b == Button::A, &latch);
        assert_eq!(latch.pending(), ButtonSet::from(Button::A) | Button::E);
    }

    #[test]
    fn test_line_of() {
        assert_eq!(BOARD.line_of(Button::A), Some(EdgeLine(10)));
        assert_eq!(BOARD.line_of(Button::E), Some(EdgeLine(10)));
        assert_eq!(BOARD.line_of(Button::Joystick), Some(EdgeLine(9)));
    }

    #[test]
    fn test_table_validation() {
        assert!(BOARD.covers_each_button_once());

        static MISSING: DispatchTable = DispatchTable::new(&[LineRoutes {
            line: EdgeLine(1),
            routes: &[Route::owner(Button::A)],
        }]);
        assert!(!MISSING.covers_each_button_once());

        static SHARED_OWNER: DispatchTable = DispatchTable::new(&[
            LineRoutes {
                line: EdgeLine(1),
                routes: &[
                    Route::owner(Button::A),
                    Route::shared(Button::B),
                    Route::shared(Button::C),
                    Route::shared(Button::D),
                    Route::shared(Button::E),
                    Route::shared(Button::F),
                    Route::shared(Button::Joystick),
                ],
            },
        ]);
        assert!(!SHARED_OWNER.covers_each_button_once());
    }
}
