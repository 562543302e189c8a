//! ReportScheduler: the sample-and-report loop.

use crate::config::ReporterConfig;
use crate::gate::RateGate;
use crate::input::{Axis, AxisSource};
use crate::latch::EdgeLatch;
use crate::output::RecordSink;
use crate::wait::Clock;
use embedded_hal_async::delay::DelayNs;
use joystick_proto::{ButtonSet, JoystickSample, Serialize, TelemetryRecord, MAX_RECORD_SIZE};

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Iteration {
    /// Sample used this iteration (stale axes carry the previous value).
    pub sample: JoystickSample,
    /// X acquisition failed.
    pub stale_x: bool,
    /// Y acquisition failed.
    pub stale_y: bool,
    /// The rate gate opened and a telemetry record was attempted.
    pub telemetry: bool,
    /// Buttons drained from the latch and attempted, in send order.
    pub events: ButtonSet,
    /// Records that failed to transmit and were dropped.
    pub dropped: u8,
}

/// Running totals since start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportStats {
    pub iterations: u32,
    pub telemetry_sent: u32,
    pub events_sent: u32,
    pub dropped: u32,
    pub stale_samples: u32,
}

/// Cooperative loop that samples the joystick, rate-limits telemetry, and
/// reports latched button edges over a single sink.
///
/// The scheduler is the only user of the sink, so records never interleave.
/// Edge handlers never transmit; they only touch the shared [`EdgeLatch`].
///
/// # Error Handling
///
/// Nothing here is fatal. A timed-out axis keeps its previous value; a
/// record the sink could not send is dropped, not retried.
pub struct ReportScheduler<'l, A, S, C, D> {
    axes: A,
    sink: S,
    clock: C,
    delay: D,
    latch: &'l EdgeLatch,
    gate: RateGate,
    config: ReporterConfig,
    last_sample: JoystickSample,
    stats: ReportStats,
}

impl<'l, A, S, C, D> ReportScheduler<'l, A, S, C, D>
where
    A: AxisSource,
    S: RecordSink,
    C: Clock,
    D: DelayNs,
{
    /// Create a scheduler with [`ReporterConfig::DEFAULT`].
    pub fn new(axes: A, sink: S, clock: C, delay: D, latch: &'l EdgeLatch) -> Self {
        Self::with_config(axes, sink, clock, delay, latch, ReporterConfig::DEFAULT)
    }

    /// Create a scheduler with custom timing.
    ///
    /// The first telemetry interval is measured from time 0 on `clock`
    /// (boot), not from construction.
    pub fn with_config(
        axes: A,
        sink: S,
        clock: C,
        delay: D,
        latch: &'l EdgeLatch,
        config: ReporterConfig,
    ) -> Self {
        let gate = RateGate::new(config.telemetry_interval_ms);
        Self {
            axes,
            sink,
            clock,
            delay,
            latch,
            gate,
            config,
            last_sample: JoystickSample::default(),
            stats: ReportStats::default(),
        }
    }

    /// Run forever, calling `observe` after every iteration.
    ///
    /// This method never returns.
    pub async fn run<F: FnMut(&Iteration)>(&mut self, mut observe: F) -> ! {
        loop {
            let iteration = self.tick().await;
            observe(&iteration);
        }
    }

    /// One full iteration: [`step`](Self::step) followed by the loop delay.
    pub async fn tick(&mut self) -> Iteration {
        let iteration = self.step().await;
        self.delay.delay_ms(self.config.loop_delay_ms).await;
        iteration
    }

    /// One iteration without the trailing delay.
    ///
    /// Order: sample X then Y, maybe send telemetry, drain the latch and
    /// send one event record per fired button in priority order.
    pub async fn step(&mut self) -> Iteration {
        let mut iteration = Iteration::default();

        let (x, stale_x) = self.acquire(Axis::X, self.last_sample.x);
        let (y, stale_y) = self.acquire(Axis::Y, self.last_sample.y);
        self.last_sample = JoystickSample::new(x, y);
        iteration.sample = self.last_sample;
        iteration.stale_x = stale_x;
        iteration.stale_y = stale_y;

        let now = self.clock.now_ms();
        if self.gate.poll(now) {
            iteration.telemetry = true;
            let record = TelemetryRecord::new(self.last_sample);
            if self.send(&record).await {
                self.stats.telemetry_sent = self.stats.telemetry_sent.wrapping_add(1);
            } else {
                iteration.dropped += 1;
            }
        }

        iteration.events = self.latch.drain_pending();
        for button in iteration.events {
            if self.send(&button).await {
                self.stats.events_sent = self.stats.events_sent.wrapping_add(1);
            } else {
                iteration.dropped += 1;
            }
        }

        self.stats.iterations = self.stats.iterations.wrapping_add(1);
        self.stats.dropped = self.stats.dropped.wrapping_add(u32::from(iteration.dropped));
        iteration
    }

    /// Read one axis, falling back to `previous` on failure.
    fn acquire(&mut self, axis: Axis, previous: u16) -> (u16, bool) {
        match self.axes.read(axis) {
            Ok(value) => (value, false),
            Err(_) => {
                self.stats.stale_samples = self.stats.stale_samples.wrapping_add(1);
                (previous, true)
            }
        }
    }

    /// Serialize and transmit one record; `false` if it was dropped.
    async fn send<R: Serialize>(&mut self, record: &R) -> bool {
        let mut buf = [0u8; MAX_RECORD_SIZE];
        match record.serialize(&mut buf) {
            Ok(len) => self.sink.transmit(&buf[..len]).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Running totals.
    pub fn stats(&self) -> ReportStats {
        self.stats
    }

    /// Most recent sample (including substituted stale axes).
    pub fn last_sample(&self) -> JoystickSample {
        self.last_sample
    }

    /// The latch this scheduler drains.
    pub fn latch(&self) -> &'l EdgeLatch {
        self.latch
    }

    /// Get a reference to the record sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the record sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Decompose the scheduler into its axis source and record sink.
    pub fn into_parts(self) -> (A, S) {
        (self.axes, self.sink)
    }
}
