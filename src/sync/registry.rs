//! Process-wide channel registry.
//!
//! [`ChannelRegistry`] owns the engine and the set of allocated ids behind a
//! `critical_section::Mutex`. Every operation, including the forward to the
//! engine, runs inside a single critical section, so two owners can never be
//! handed the same channel and a release can never race an allocation or a
//! query on the same id.
//!
//! # Example
//!
//! ```ignore
//! use dma_pwm::{ChannelRegistry, EngineConfig, NativeEngine};
//!
//! static REGISTRY: ChannelRegistry<NativeEngine> = ChannelRegistry::new(NativeEngine::new());
//!
//! REGISTRY.configure(EngineConfig::servo())?;
//! let mut channel = REGISTRY.acquire()?;
//! channel.assign_signal(&[18], 50.0, 0.075)?;
//! channel.enable()?;
//! // disabled and released when `channel` goes out of scope
//! ```

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

#[cfg(feature = "log")]
use log::{debug, warn};

use crate::channel::PwmChannel;
use crate::driver::config::EngineConfig;
use crate::driver::engine::{ChannelId, DmaEngine, RegisterSnapshot};
use crate::error::{ErrorKind, Result, StateError, decode, decode_float, decode_id};
use crate::internal::constants::NUM_DMA_CHANNELS;

struct RegistryState<E, const N: usize> {
    engine: E,
    allocated: Vec<ChannelId, N>,
    config: Option<EngineConfig>,
}

impl<E, const N: usize> RegistryState<E, N> {
    fn owned(&self, id: ChannelId) -> Result<()> {
        if self.allocated.contains(&id) {
            Ok(())
        } else {
            Err(ErrorKind::InvalidChannel.into())
        }
    }
}

/// Registry of the channels currently allocated in this process.
///
/// An id is present if and only if some [`PwmChannel`] owns it. Ids are
/// inserted only after the engine allocated them and removed only after the
/// engine released them; a failed release leaves the id registered.
///
/// # Type Parameters
/// * `E` - Engine backend
/// * `N` - Maximum number of simultaneously tracked channels
///
/// The lock is whatever `critical-section` implementation the application
/// links in (the `std` one on hosted Linux builds).
pub struct ChannelRegistry<E, const N: usize = NUM_DMA_CHANNELS> {
    inner: Mutex<RefCell<RegistryState<E, N>>>,
}

impl<E: DmaEngine, const N: usize> ChannelRegistry<E, N> {
    /// Create a registry around an engine (const, suitable for static initialization).
    pub const fn new(engine: E) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(RegistryState {
                engine,
                allocated: Vec::new(),
                config: None,
            })),
        }
    }

    #[inline]
    fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut RegistryState<E, N>) -> R,
    {
        critical_section::with(|cs| {
            let mut state = self.inner.borrow_ref_mut(cs);
            f(&mut state)
        })
    }

    // =========================================================================
    // Global Operations
    // =========================================================================

    /// Apply the engine configuration.
    ///
    /// Fails with [`ErrorKind::ChannelAlreadyRequested`] while any channel is
    /// registered, without calling the engine.
    pub fn configure(&self, config: EngineConfig) -> Result<()> {
        self.with(|state| {
            if !state.allocated.is_empty() {
                return Err(ErrorKind::ChannelAlreadyRequested.into());
            }
            decode_float(
                state
                    .engine
                    .configure(config.pages_raw(), config.pulse_width_us),
            )?;
            state.config = Some(config);

            #[cfg(feature = "log")]
            debug!(
                "engine configured: {} pages, {} us pulse width",
                config.pages, config.pulse_width_us
            );

            Ok(())
        })
    }

    /// Allocate a channel and register its id.
    ///
    /// Nothing is registered on failure.
    pub fn request_channel(&self) -> Result<ChannelId> {
        self.with(|state| {
            if state.config.is_none() {
                return Err(StateError::NotConfigured.into());
            }
            let id = decode_id(state.engine.request())?;
            if state.allocated.contains(&id) {
                // Another owner holds this id; handing it back would free theirs.
                return Err(StateError::DuplicateChannel.into());
            }
            if state.allocated.push(id).is_err() {
                // Untracked from here on; a failed hand-back leaks it driver-side.
                if let Err(_e) = decode(state.engine.release(id.get())) {
                    #[cfg(feature = "log")]
                    warn!("channel {id} untracked and not returned to the driver: {_e}");
                }
                return Err(StateError::RegistryFull.into());
            }

            #[cfg(feature = "log")]
            debug!("channel {id} requested");

            Ok(id)
        })
    }

    /// Release a channel back to the engine and unregister it.
    ///
    /// On failure the id stays registered: the hardware still considers it
    /// allocated, or its state is unknown. There is no automatic retry.
    pub fn release_channel(&self, id: ChannelId) -> Result<()> {
        self.with(|state| {
            state.owned(id)?;
            if let Err(e) = decode(state.engine.release(id.get())) {
                #[cfg(feature = "log")]
                warn!("channel {id} release failed: {e}");
                return Err(e.into());
            }
            state.allocated.retain(|&held| held != id);

            #[cfg(feature = "log")]
            debug!("channel {id} released");

            Ok(())
        })
    }

    /// Achieved global pulse width in microseconds
    pub fn pulse_width(&self) -> Result<f32> {
        self.with(|state| Ok(decode_float(state.engine.pulse_width())?))
    }

    // =========================================================================
    // Per-Channel Forwards
    // =========================================================================

    pub(crate) fn assign_signal(
        &self,
        id: ChannelId,
        pins: &[u8],
        frequency_hz: f32,
        duty_cycle: f32,
    ) -> Result<()> {
        self.with(|state| {
            state.owned(id)?;
            decode(
                state
                    .engine
                    .assign_signal(id.get(), pins, frequency_hz, duty_cycle),
            )?;
            Ok(())
        })
    }

    pub(crate) fn enable(&self, id: ChannelId) -> Result<()> {
        self.with(|state| {
            state.owned(id)?;
            decode(state.engine.enable(id.get()))?;
            Ok(())
        })
    }

    pub(crate) fn disable(&self, id: ChannelId) -> Result<()> {
        self.with(|state| {
            state.owned(id)?;
            decode(state.engine.disable(id.get()))?;
            Ok(())
        })
    }

    pub(crate) fn duty_cycle(&self, id: ChannelId) -> Result<f32> {
        self.with(|state| {
            state.owned(id)?;
            Ok(decode_float(state.engine.duty_cycle(id.get()))?)
        })
    }

    pub(crate) fn frequency(&self, id: ChannelId) -> Result<f32> {
        self.with(|state| {
            state.owned(id)?;
            Ok(decode_float(state.engine.frequency(id.get()))?)
        })
    }

    pub(crate) fn registers(&self, id: ChannelId) -> Result<RegisterSnapshot> {
        self.with(|state| {
            state.owned(id)?;
            Ok(state.engine.registers(id.get()))
        })
    }

    // =========================================================================
    // Scoped Acquisition
    // =========================================================================

    /// Allocate a channel wrapped in an owning handle.
    ///
    /// The handle disables and releases the channel when dropped.
    pub fn acquire(&self) -> Result<PwmChannel<'_, E, N>> {
        let mut channel = PwmChannel::new(self);
        channel.allocate()?;
        Ok(channel)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Whether `id` is currently registered
    pub fn is_allocated(&self, id: ChannelId) -> bool {
        self.with(|state| state.allocated.contains(&id))
    }

    /// Number of registered channels
    pub fn allocated_count(&self) -> usize {
        self.with(|state| state.allocated.len())
    }

    /// Copy of the registered ids, in allocation order
    pub fn allocated(&self) -> Vec<ChannelId, N> {
        self.with(|state| state.allocated.clone())
    }

    /// Last successfully applied configuration
    pub fn config(&self) -> Option<EngineConfig> {
        self.with(|state| state.config)
    }

    /// Maximum number of tracked channels
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Run a closure with exclusive access to the engine.
    ///
    /// Intended for out-of-band recovery and diagnostics. The registered id
    /// set is not touched.
    ///
    /// # Panics
    ///
    /// Panics if `f` calls back into this registry, directly or by dropping a
    /// [`PwmChannel`] bound to it: the registry state is already borrowed.
    pub fn with_engine<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut E) -> R,
    {
        self.with(|state| f(&mut state.engine))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
