//! Error types for the DMA PWM channel layer
//!
//! Errors are organized by origin:
//! - [`ErrorKind`]: failures reported by the native driver through its
//!   negative sentinel return codes
//! - [`StateError`]: lifecycle violations caught before the driver is called
//!
//! The unified [`Error`] enum wraps both and is returned by the registry and
//! the channel handle.
//!
//! Sentinel codes are interpreted in exactly one place: the `decode*`
//! functions at the bottom of this module. Nothing above the engine boundary
//! ever sees a raw code.

use crate::driver::engine::ChannelId;
use crate::internal::constants::code;

// =============================================================================
// Driver Errors
// =============================================================================

/// Errors signaled by the native driver.
///
/// Each variant corresponds to one documented sentinel code. A negative code
/// outside the documented range is kept verbatim in
/// [`ErrorKind::UnknownDriverError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Reconfiguration attempted while a channel is requested (-1)
    ChannelAlreadyRequested,
    /// Pulse width out of the accepted range (-2)
    InvalidPulseWidth,
    /// Hardware channel pool exhausted (-3)
    NoFreeChannels,
    /// Operation referenced an unallocated or unknown channel (-4)
    InvalidChannel,
    /// Duty cycle outside `[0, 1]` (-5)
    InvalidDutyCycle,
    /// Pin number not usable for PWM (-6)
    InvalidGpioPin,
    /// Requested frequency outside the achievable range (-7)
    FrequencyNotAchievable,
    /// Enable attempted before a signal was assigned (-8)
    PwmNotSet,
    /// Host board could not be identified (-9)
    BoardRevisionUnknown,
    /// Memory-mapping of peripheral registers failed (-10)
    PeripheralMapFailed,
    /// Process signal handler installation failed (-11)
    SignalHandlerSetupFailed,
    /// Negative code outside the documented table
    UnknownDriverError(i32),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ErrorKind::UnknownDriverError(code) => write!(f, "unknown driver error {code}"),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl ErrorKind {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ChannelAlreadyRequested => "at least one channel has been requested",
            ErrorKind::InvalidPulseWidth => "invalid pulse width",
            ErrorKind::NoFreeChannels => "no free DMA channels available",
            ErrorKind::InvalidChannel => "invalid or non-requested channel",
            ErrorKind::InvalidDutyCycle => "invalid duty cycle",
            ErrorKind::InvalidGpioPin => "invalid GPIO pin",
            ErrorKind::FrequencyNotAchievable => "desired frequency cannot be met",
            ErrorKind::PwmNotSet => "PWM signal has not been set",
            ErrorKind::BoardRevisionUnknown => "could not get board revision",
            ErrorKind::PeripheralMapFailed => "peripheral memory mapping failed",
            ErrorKind::SignalHandlerSetupFailed => "signal handler failed to set up",
            ErrorKind::UnknownDriverError(_) => "unknown driver error",
        }
    }

    /// The sentinel code this error is signaled with
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            ErrorKind::ChannelAlreadyRequested => code::ECHNLREQ,
            ErrorKind::InvalidPulseWidth => code::EINVPW,
            ErrorKind::NoFreeChannels => code::ENOFREECHNL,
            ErrorKind::InvalidChannel => code::EINVCHNL,
            ErrorKind::InvalidDutyCycle => code::EINVDUTY,
            ErrorKind::InvalidGpioPin => code::EINVGPIO,
            ErrorKind::FrequencyNotAchievable => code::EFREQNOTMET,
            ErrorKind::PwmNotSet => code::EPWMNOTSET,
            ErrorKind::BoardRevisionUnknown => code::ENOPIVER,
            ErrorKind::PeripheralMapFailed => code::EMAPFAIL,
            ErrorKind::SignalHandlerSetupFailed => code::ESIGHDNFAIL,
            ErrorKind::UnknownDriverError(code) => *code,
        }
    }

    /// Look up the error for a negative sentinel code.
    ///
    /// Returns `None` for non-negative values, which are never errors.
    #[must_use]
    pub const fn from_code(raw: i32) -> Option<Self> {
        let kind = match raw {
            0..=i32::MAX => return None,
            code::ECHNLREQ => ErrorKind::ChannelAlreadyRequested,
            code::EINVPW => ErrorKind::InvalidPulseWidth,
            code::ENOFREECHNL => ErrorKind::NoFreeChannels,
            code::EINVCHNL => ErrorKind::InvalidChannel,
            code::EINVDUTY => ErrorKind::InvalidDutyCycle,
            code::EINVGPIO => ErrorKind::InvalidGpioPin,
            code::EFREQNOTMET => ErrorKind::FrequencyNotAchievable,
            code::EPWMNOTSET => ErrorKind::PwmNotSet,
            code::ENOPIVER => ErrorKind::BoardRevisionUnknown,
            code::EMAPFAIL => ErrorKind::PeripheralMapFailed,
            code::ESIGHDNFAIL => ErrorKind::SignalHandlerSetupFailed,
            other => ErrorKind::UnknownDriverError(other),
        };
        Some(kind)
    }
}

// =============================================================================
// Lifecycle Errors
// =============================================================================

/// Lifecycle violations detected without calling the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
    /// A channel was requested before the engine was configured
    NotConfigured,
    /// The handle already owns a channel
    AlreadyAllocated,
    /// Explicit release of a channel that is still enabled
    ChannelEnabled,
    /// The handle has been torn down and cannot be reused
    Released,
    /// The driver returned an id that is already registered to another owner
    DuplicateChannel,
    /// The registry has no room left to track another id
    RegistryFull,
}

impl core::fmt::Display for StateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StateError::NotConfigured => "engine not configured",
            StateError::AlreadyAllocated => "channel already allocated",
            StateError::ChannelEnabled => "channel still enabled",
            StateError::Released => "channel handle released",
            StateError::DuplicateChannel => "driver returned a channel already in use",
            StateError::RegistryFull => "channel registry full",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps driver and lifecycle errors for unified error handling.
///
/// ```ignore
/// match channel.enable() {
///     Err(Error::Driver(ErrorKind::PwmNotSet)) => { /* assign a signal first */ }
///     Err(Error::State(StateError::Released)) => { /* handle is gone */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Error reported by the native driver
    Driver(ErrorKind),
    /// Lifecycle violation
    State(StateError),
}

impl Error {
    /// The driver error, if this is one
    #[must_use]
    pub const fn driver_kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Driver(kind) => Some(*kind),
            Error::State(_) => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Driver(e) => write!(f, "driver: {e}"),
            Error::State(e) => write!(f, "state: {}", e.as_str()),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(e: ErrorKind) -> Self {
        Error::Driver(e)
    }
}

impl From<StateError> for Error {
    fn from(e: StateError) -> Self {
        Error::State(e)
    }
}

impl core::error::Error for Error {}

/// Result type alias for registry and channel operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for decoded driver returns
pub type DriverResult<T> = core::result::Result<T, ErrorKind>;

// =============================================================================
// Sentinel Decoding
// =============================================================================

/// Decode the return value of an integer driver primitive.
///
/// `0` is success. Positive values never signal an error and are accepted.
#[inline]
pub const fn decode(raw: i32) -> DriverResult<()> {
    match ErrorKind::from_code(raw) {
        Some(kind) => Err(kind),
        None => Ok(()),
    }
}

/// Decode the return value of `request_pwm`, which is a channel id on success.
#[inline]
pub const fn decode_id(raw: i32) -> DriverResult<ChannelId> {
    match ErrorKind::from_code(raw) {
        Some(kind) => Err(kind),
        None => Ok(ChannelId::from_raw_unchecked(raw)),
    }
}

/// Decode the return value of a float driver primitive.
///
/// Non-negative values pass through. Negative values carry an integer code
/// (the driver casts its `int` error into the `float` return), so they are
/// rounded to the nearest integer before lookup.
pub fn decode_float(raw: f32) -> DriverResult<f32> {
    if raw.is_nan() {
        return Err(ErrorKind::UnknownDriverError(i32::MIN));
    }
    if raw >= 0.0 {
        return Ok(raw);
    }
    let code = -((-raw + 0.5) as i32);
    Err(ErrorKind::from_code(code).unwrap_or(ErrorKind::UnknownDriverError(code)))
}

// =============================================================================
// Unit Tests
// =============================================================================
