//! Platform-agnostic edge latching and sample-and-report scheduling.
//!
//! This crate holds everything about the joystick reporter that does not
//! touch a specific chip. It builds for `no_std` targets and on the host for
//! testing.
//!
//! # Overview
//!
//! - [`latch`]: pending-edge flags shared with interrupt context ([`EdgeLatch`])
//! - [`dispatch`]: edge line to button resolution ([`DispatchTable`])
//! - [`edge`]: pins behind one edge line ([`LineWatcher`])
//! - [`gate`]: telemetry rate limiting ([`RateGate`])
//! - [`wait`]: clock trait and bounded polling ([`Clock`], [`poll_until`])
//! - [`input`]: axis source trait ([`AxisSource`])
//! - [`output`]: record sink trait ([`RecordSink`])
//! - [`scheduler`]: the report loop ([`ReportScheduler`])
//!
//! # Data Flow
//!
//! ```text
//! LineWatcher --on_edge--> EdgeLatch --drain_pending---+
//!                                                      +--> ReportScheduler --> RecordSink
//! ADC ---------------------read------------------------+
//! ```
//!
//! Interrupt handlers only ever set latch bits. The scheduler is the only
//! code that transmits, so records never interleave.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`embedded-io`**: Forwarded to `joystick-proto`

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod dispatch;
pub mod edge;
pub mod gate;
pub mod input;
pub mod latch;
pub mod output;
pub mod scheduler;
pub mod wait;

pub use config::ReporterConfig;
pub use dispatch::{DispatchTable, EdgeLine, LevelReader, LineRoutes, Resolve, Route};
pub use edge::{LineWatcher, MAX_PINS_PER_LINE};
pub use gate::RateGate;
pub use input::{convert_single_shot, Axis, AxisSource, SampleError, SingleShot};
pub use latch::EdgeLatch;
pub use output::{RecordSink, TransmitError};
pub use scheduler::{Iteration, ReportScheduler, ReportStats};
pub use wait::{poll_until, Clock, WaitTimeout};

pub use joystick_proto::{Button, ButtonSet, JoystickSample, Record, TelemetryRecord};
