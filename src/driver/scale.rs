//! Duty-cycle scale at the native boundary.
//!
//! The crate speaks duty cycles in `[0, 1]`. `libdmapwm` takes and reports
//! them in percent (`0..=100`), so `NativeEngine` converts on the way in
//! and out.

#![cfg_attr(not(feature = "native"), allow(dead_code))]

use crate::internal::constants::code;

/// Scale factor between a unit duty cycle and the driver's percent
const PERCENT: f32 = 100.0;

/// Convert a unit duty cycle to the driver's percent.
///
/// Values outside `[0, 1]`, NaN included, yield `EINVDUTY` so they never
/// reach the driver.
pub(crate) fn to_percent(duty: f32) -> core::result::Result<f32, i32> {
    if (0.0..=1.0).contains(&duty) {
        Ok(duty * PERCENT)
    } else {
        Err(code::EINVDUTY)
    }
}

/// Convert a `get_duty_cycle_pwm` return to a unit duty cycle.
///
/// Negative returns are sentinels and pass through unchanged.
pub(crate) fn from_percent(raw: f32) -> f32 {
    if raw < 0.0 { raw } else { raw / PERCENT }
}
