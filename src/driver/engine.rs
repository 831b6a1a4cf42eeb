//! Boundary to the native DMA PWM engine.
//!
//! The engine owns the DMA controller, the memory-mapped PWM/clock/GPIO
//! registers and the control block memory. This crate never touches any of
//! that directly: every interaction goes through [`DmaEngine`], whose methods
//! mirror the C primitives one to one and return their raw sentinels.
//!
//! Raw returns are decoded by [`crate::error`] inside the registry, so no
//! sentinel ever reaches a caller of [`crate::ChannelRegistry`] or
//! [`crate::PwmChannel`].
//!
//! All calls are synchronous and blocking. They are not reentrant for the
//! same channel; the registry serializes them.

/// Identifier of one allocated hardware channel.
///
/// Non-negative and unique among currently allocated channels. Once released
/// the value is meaningless and must not be used again by its former owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId(i32);

impl ChannelId {
    /// Wrap a raw id, rejecting negative values
    #[must_use]
    pub const fn new(raw: i32) -> Option<Self> {
        if raw < 0 { None } else { Some(Self(raw)) }
    }

    /// Caller guarantees `raw >= 0`.
    pub(crate) const fn from_raw_unchecked(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw value passed to the engine
    #[inline(always)]
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Register state of one channel, for debugging.
///
/// Layout matches `struct reg_pwm` of the native driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct RegisterSnapshot {
    /// PWM control
    pub pwm_ctl_ctl: u32,
    /// PWM status
    pub pwm_ctl_sta: u32,
    /// PWM DMA configuration
    pub pwm_ctl_dmac: u32,
    /// PWM clock control
    pub pwm_clk_pwmctl: u32,
    /// PWM clock divisor
    pub pwm_clk_pwmdiv: u32,
    /// DMA control and status
    pub dma_cs: u32,
    /// DMA debug
    pub dma_debug: u32,
}

/// Primitive operations of the native DMA PWM engine.
///
/// Integer methods return `0` on success (or the new id for
/// [`request`](DmaEngine::request)) and a negative code on failure. Float
/// methods return a non-negative value on success and a negative code on
/// failure.
///
/// Implementations:
/// - [`NativeEngine`](crate::driver::native::NativeEngine) with the `native`
///   feature, binding `libdmapwm`
/// - a mock engine in the crate's own tests
pub trait DmaEngine {
    /// Set pages per channel and the global pulse width (`config_pwm`)
    fn configure(&mut self, pages: i32, pulse_width_us: f32) -> f32;

    /// Allocate one channel (`request_pwm`)
    fn request(&mut self) -> i32;

    /// Bind GPIO pins and timing to a channel (`set_pwm`)
    ///
    /// The pin count is `pins.len()`.
    fn assign_signal(&mut self, channel: i32, pins: &[u8], freq_hz: f32, duty: f32) -> i32;

    /// Start output on a channel (`enable_pwm`)
    fn enable(&mut self, channel: i32) -> i32;

    /// Stop output on a channel (`disable_pwm`)
    fn disable(&mut self, channel: i32) -> i32;

    /// Return a channel to the hardware pool (`free_pwm`)
    fn release(&mut self, channel: i32) -> i32;

    /// Achieved duty cycle of a channel (`get_duty_cycle_pwm`)
    fn duty_cycle(&mut self, channel: i32) -> f32;

    /// Achieved frequency of a channel (`get_freq_pwm`)
    fn frequency(&mut self, channel: i32) -> f32;

    /// Achieved global pulse width in microseconds (`get_pulse_width`)
    fn pulse_width(&mut self) -> f32;

    /// Register snapshot of a channel (`get_reg_pwm`)
    fn registers(&mut self, channel: i32) -> RegisterSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_id_rejects_negative() {
        assert_eq!(ChannelId::new(-1), None);
        assert_eq!(ChannelId::new(0).map(ChannelId::get), Some(0));
        assert_eq!(ChannelId::new(6).map(ChannelId::get), Some(6));
    }

    #[test]
    fn register_snapshot_matches_c_layout() {
        assert_eq!(core::mem::size_of::<RegisterSnapshot>(), 7 * 4);
        assert_eq!(core::mem::align_of::<RegisterSnapshot>(), 4);
    }
}
