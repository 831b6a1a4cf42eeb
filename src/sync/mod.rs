//! Synchronization and Shared State
//!
//! - **Registry** (`registry`): [`ChannelRegistry`], the process-wide set of
//!   allocated channels and the engine behind one `critical_section::Mutex`
//!
//! # Example
//!
//! ```ignore
//! use dma_pwm::{ChannelRegistry, EngineConfig, NativeEngine};
//!
//! static REGISTRY: ChannelRegistry<NativeEngine> = ChannelRegistry::new(NativeEngine::new());
//!
//! fn main() -> dma_pwm::Result<()> {
//!     REGISTRY.configure(EngineConfig::new())?;
//!     let id = REGISTRY.request_channel()?;
//!     REGISTRY.release_channel(id)
//! }
//! ```

pub(crate) mod registry;

pub use registry::ChannelRegistry;
