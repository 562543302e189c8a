//! Analog axis source trait, error types, and single-shot conversion.

use crate::wait::{poll_until, Clock};

/// One joystick axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

/// Error type for axis acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// Conversion did not finish within the driver's bounded wait.
    Timeout,
    /// Converter flagged the result as invalid.
    Conversion,
}

impl From<crate::wait::WaitTimeout> for SampleError {
    fn from(_: crate::wait::WaitTimeout) -> Self {
        SampleError::Timeout
    }
}

/// Blocking source of raw axis samples.
///
/// Each call runs one complete conversion (start, wait for ready, read,
/// stop) and leaves the converter idle afterwards. The wait must be bounded;
/// on expiry return [`SampleError::Timeout`]. On any error the caller
/// carries on with its previous value.
pub trait AxisSource {
    /// Acquire one sample for `axis`.
    fn read(&mut self, axis: Axis) -> Result<u16, SampleError>;
}

/// Register-level access to a single-shot analog converter.
pub trait SingleShot {
    /// `true` while no conversion is in flight.
    fn is_idle(&mut self) -> bool;
    /// Select `channel` and start one conversion.
    fn start(&mut self, channel: u8);
    /// Result of the last finished conversion.
    fn result(&mut self) -> Result<u16, SampleError>;
}

/// Run one conversion on `channel`, bounding each wait by `timeout_ms`.
///
/// A conversion abandoned by an earlier timeout may still be running, so
/// the converter must go idle before the channel is switched. Its result is
/// never returned for the new channel.
pub fn convert_single_shot<C, S>(
    clock: &C,
    timeout_ms: u32,
    adc: &mut S,
    channel: u8,
) -> Result<u16, SampleError>
where
    C: Clock + ?Sized,
    S: SingleShot + ?Sized,
{
    poll_until(clock, timeout_ms, || adc.is_idle().then_some(()))?;
    adc.start(channel);
    poll_until(clock, timeout_ms, || adc.is_idle().then_some(()))?;
    adc.result()
}
