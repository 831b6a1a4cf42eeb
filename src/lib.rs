//! DMA PWM Channel Lifecycle
//!
//! A `no_std`, `no_alloc` layer over a native DMA PWM driver (`libdmapwm`)
//! that hands out its scarce hardware channels safely.
//!
//! The driver programs DMA control blocks that toggle GPIO pins and computes
//! the achievable timing. This crate does none of that. It owns the protocol
//! around it:
//!
//! 1. **Errors** ([`error`]): the driver's negative sentinel returns decoded
//!    into [`ErrorKind`], plus [`StateError`] for misuse caught locally
//! 2. **Registry** ([`ChannelRegistry`]): the process-wide set of allocated
//!    channel ids, serialized by a critical section
//! 3. **Channel** ([`PwmChannel`]): a state machine owning one channel that is
//!    always disabled and released when dropped, including on error paths
//!
//! # Features
//!
//! - `native`: Link `libdmapwm` and provide [`NativeEngine`]
//! - `log`: Emit lifecycle and teardown records through the `log` facade
//! - `defmt`: Enable defmt formatting for error and state types
//! - `std-critical-section`: Use the `std` critical-section implementation
//!
//! # Example
//!
//! ```ignore
//! use dma_pwm::{ChannelRegistry, EngineConfig, NativeEngine};
//!
//! static REGISTRY: ChannelRegistry<NativeEngine> = ChannelRegistry::new(NativeEngine::new());
//!
//! fn main() -> dma_pwm::Result<()> {
//!     REGISTRY.configure(EngineConfig::servo())?;
//!
//!     let mut servo = REGISTRY.acquire()?;
//!     servo.assign_signal(&[18], 50.0, 0.075)?;
//!     servo.enable()?;
//!
//!     // Any early return from here on still disables and frees the channel.
//!     servo.set_duty(0.1)?;
//!     Ok(())
//! }
//! ```
//!
//! # Channel Lifecycle
//!
//! ```text
//! Unallocated -> Allocated -> SignalAssigned -> Enabled <-> Disabled -> Released
//!                                                  (failed teardown) -> Leaked
//! ```
//!
//! See [`ChannelState`] for what each state permits.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod channel;
pub mod driver;
pub mod error;
pub mod integration;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub(crate) mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use channel::{ChannelState, PwmChannel};
pub use driver::config::{EngineConfig, PulseWidth, SignalConfig};
pub use driver::engine::{ChannelId, DmaEngine, RegisterSnapshot};
pub use error::{
    DriverResult, Error, ErrorKind, Result, StateError, decode, decode_float, decode_id,
};
pub use sync::ChannelRegistry;

#[cfg(feature = "native")]
#[cfg_attr(docsrs, doc(cfg(feature = "native")))]
pub use driver::native::NativeEngine;

/// Defaults and limits shared with the native driver.
pub mod constants {
    pub use crate::internal::constants::{
        DEFAULT_PAGES, DEFAULT_PULSE_WIDTH_US, LED_PULSE_WIDTH_US, MAX_GPIO, MAX_GPIO_PINS,
        MAX_PULSE_WIDTH_US, MIN_PULSE_WIDTH_US, MOTOR_PULSE_WIDTH_US, NUM_DMA_CHANNELS,
        SERVO_PULSE_WIDTH_US, code,
    };
}
