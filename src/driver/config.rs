//! Configuration types for the DMA PWM engine and channel signals

use crate::internal::constants::{
    DEFAULT_PAGES, DEFAULT_PULSE_WIDTH_US, LED_PULSE_WIDTH_US, MAX_PULSE_WIDTH_US,
    MIN_PULSE_WIDTH_US, MOTOR_PULSE_WIDTH_US, SERVO_PULSE_WIDTH_US,
};

/// Pulse-width presets known to suit common loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseWidth {
    /// 5 us, general purpose
    #[default]
    Default,
    /// 0.4 us, motor drivers
    Motor,
    /// 50 us, hobby servos
    Servo,
    /// 5000 us, LED dimming
    Led,
}

impl PulseWidth {
    /// Pulse width in microseconds
    #[must_use]
    pub const fn as_us(self) -> f32 {
        match self {
            PulseWidth::Default => DEFAULT_PULSE_WIDTH_US,
            PulseWidth::Motor => MOTOR_PULSE_WIDTH_US,
            PulseWidth::Servo => SERVO_PULSE_WIDTH_US,
            PulseWidth::Led => LED_PULSE_WIDTH_US,
        }
    }
}

/// Process-wide engine parameters.
///
/// Applied once through [`ChannelRegistry::configure`](crate::ChannelRegistry::configure)
/// before the first channel is requested. The driver rejects reconfiguration
/// while any channel is allocated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    /// Memory pages reserved per channel for control block storage
    pub pages: u32,
    /// Baseline pulse width in microseconds
    pub pulse_width_us: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Default configuration: 16 pages, 5 us pulse width
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pages: DEFAULT_PAGES,
            pulse_width_us: DEFAULT_PULSE_WIDTH_US,
        }
    }

    /// Defaults with the motor pulse width
    #[must_use]
    pub const fn motor() -> Self {
        Self::new().with_pulse_width(PulseWidth::Motor)
    }

    /// Defaults with the servo pulse width
    #[must_use]
    pub const fn servo() -> Self {
        Self::new().with_pulse_width(PulseWidth::Servo)
    }

    /// Defaults with the LED pulse width
    #[must_use]
    pub const fn led() -> Self {
        Self::new().with_pulse_width(PulseWidth::Led)
    }

    /// Set pages per channel
    #[must_use]
    pub const fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    /// Set the pulse width in microseconds
    #[must_use]
    pub const fn with_pulse_width_us(mut self, pulse_width_us: f32) -> Self {
        self.pulse_width_us = pulse_width_us;
        self
    }

    /// Set the pulse width from a preset
    #[must_use]
    pub const fn with_pulse_width(mut self, preset: PulseWidth) -> Self {
        self.pulse_width_us = preset.as_us();
        self
    }

    /// Whether the pulse width lies inside the range the clock divisor can
    /// realize. The driver remains the authority on the accepted range.
    #[must_use]
    pub fn pulse_width_in_range(&self) -> bool {
        (MIN_PULSE_WIDTH_US..=MAX_PULSE_WIDTH_US).contains(&self.pulse_width_us)
    }

    /// Page count as passed to the driver
    pub(crate) fn pages_raw(&self) -> i32 {
        i32::try_from(self.pages).unwrap_or(i32::MAX)
    }
}

/// Signal parameters last assigned to a channel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalConfig {
    /// Requested frequency in Hz
    pub frequency_hz: f32,
    /// Requested duty cycle in `[0, 1]`
    pub duty_cycle: f32,
}

impl SignalConfig {
    /// Create a signal configuration
    #[must_use]
    pub const fn new(frequency_hz: f32, duty_cycle: f32) -> Self {
        Self {
            frequency_hz,
            duty_cycle,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
