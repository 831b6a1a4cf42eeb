//! Centralized Constants
//!
//! Single source of truth for the numbers shared with the native DMA PWM
//! driver: defaults, accepted ranges and the sentinel error codes.
//!
//! # Organization
//!
//! - **Engine defaults**: page count and pulse-width presets
//! - **Hardware limits**: channel pool size, GPIO range, pulse-width bounds
//! - **Sentinel codes**: negative return values of every driver primitive

// =============================================================================
// Engine Defaults
// =============================================================================

/// Number of memory pages reserved for each control block sequence
pub const DEFAULT_PAGES: u32 = 16;

/// Default PWM pulse width in microseconds
pub const DEFAULT_PULSE_WIDTH_US: f32 = 5.0;

/// Pulse width suited to motor drivers, in microseconds
pub const MOTOR_PULSE_WIDTH_US: f32 = 0.4;

/// Pulse width suited to hobby servos, in microseconds
pub const SERVO_PULSE_WIDTH_US: f32 = 50.0;

/// Pulse width suited to LED dimming, in microseconds
pub const LED_PULSE_WIDTH_US: f32 = 5000.0;

// =============================================================================
// Hardware Limits
// =============================================================================

/// Number of DMA channels the driver can hand out
pub const NUM_DMA_CHANNELS: usize = 7;

/// Highest GPIO number usable for PWM output (GPIO bank 0).
///
/// Matches the `set_pwm` check of the driver revision bundled with its test
/// program, which the host mock models. The later revision also accepts the
/// internal GPIOs `32..=53`; pin numbers are not pre-checked here, so the
/// linked library's own bound applies.
pub const MAX_GPIO: u8 = 31;

/// Maximum number of GPIO pins driven by one channel
pub const MAX_GPIO_PINS: usize = MAX_GPIO as usize + 1;

/// Smallest pulse width the clock divisor can realize, in microseconds
pub const MIN_PULSE_WIDTH_US: f32 = 0.4;

/// Largest pulse width the clock divisor can realize, in microseconds
pub const MAX_PULSE_WIDTH_US: f32 = 35_175_782_146.0;

// =============================================================================
// Sentinel Error Codes
// =============================================================================

/// Negative sentinel codes returned by the driver primitives.
///
/// Integer primitives return `0` on success (or a channel id for
/// `request_pwm`), float primitives return a non-negative value.
pub mod code {
    /// At least one channel has been requested
    pub const ECHNLREQ: i32 = -1;
    /// Invalid pulse width
    pub const EINVPW: i32 = -2;
    /// No free DMA channels available to be requested
    pub const ENOFREECHNL: i32 = -3;
    /// Invalid or non-requested channel
    pub const EINVCHNL: i32 = -4;
    /// Invalid duty cycle
    pub const EINVDUTY: i32 = -5;
    /// Invalid GPIO pin
    pub const EINVGPIO: i32 = -6;
    /// Desired frequency cannot be met
    pub const EFREQNOTMET: i32 = -7;
    /// PWM signal on requested channel has not been set
    pub const EPWMNOTSET: i32 = -8;
    /// Could not get board revision
    pub const ENOPIVER: i32 = -9;
    /// Peripheral memory mapping failed
    pub const EMAPFAIL: i32 = -10;
    /// Signal handler failed to set up
    pub const ESIGHDNFAIL: i32 = -11;
}
