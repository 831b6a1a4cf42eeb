//! Driver boundary and configuration.
//!
//! - [`config`] - Engine and signal configuration types
//! - [`engine`] - The [`DmaEngine`] trait every backend implements
//! - `native` - FFI backend for `libdmapwm` (feature `native`)
//!
//! # Example
//!
//! ```ignore
//! use dma_pwm::driver::{EngineConfig, PulseWidth};
//!
//! let config = EngineConfig::new()
//!     .with_pages(16)
//!     .with_pulse_width(PulseWidth::Servo);
//! ```

// Submodules
pub mod config;
pub mod engine;

// Percent scale of the native driver
mod scale;

#[cfg(feature = "native")]
#[cfg_attr(docsrs, doc(cfg(feature = "native")))]
pub mod native;

// Re-exports for convenience
pub use config::{EngineConfig, PulseWidth, SignalConfig};
pub use engine::{ChannelId, DmaEngine, RegisterSnapshot};

#[cfg(feature = "native")]
pub use native::NativeEngine;
