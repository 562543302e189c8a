//! Report loop timing.

/// Compile-time tunables for [`ReportScheduler`](crate::ReportScheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReporterConfig {
    /// Minimum spacing between telemetry records.
    pub telemetry_interval_ms: u32,
    /// Fixed pause at the end of every loop iteration.
    pub loop_delay_ms: u32,
}

impl ReporterConfig {
    /// 50 ms telemetry spacing (20 Hz), 10 ms loop pause.
    pub const DEFAULT: Self = Self {
        telemetry_interval_ms: 50,
        loop_delay_ms: 10,
    };
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
