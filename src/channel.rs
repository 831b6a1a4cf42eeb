//! Owning handle for one DMA PWM channel.
//!
//! A [`PwmChannel`] walks the lifecycle
//!
//! ```text
//! Unallocated -> Allocated -> SignalAssigned -> Enabled <-> Disabled -> Released
//! ```
//!
//! and guarantees on drop that the channel is disabled (best effort) and
//! released back to the [`ChannelRegistry`]. If that release fails the
//! channel ends in [`ChannelState::Leaked`] and its id stays registered.

use heapless::Vec;

#[cfg(feature = "log")]
use log::{debug, warn};

use crate::driver::config::SignalConfig;
use crate::driver::engine::{ChannelId, DmaEngine, RegisterSnapshot};
use crate::error::{ErrorKind, Result, StateError};
use crate::internal::constants::{MAX_GPIO_PINS, NUM_DMA_CHANNELS};
use crate::sync::registry::ChannelRegistry;

/// Lifecycle state of a [`PwmChannel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelState {
    /// No channel held yet
    #[default]
    Unallocated,
    /// Channel held, no signal assigned
    Allocated,
    /// Pins and timing assigned, output off
    SignalAssigned,
    /// Output running
    Enabled,
    /// Output stopped after running; the signal is retained
    Disabled,
    /// Channel returned to the pool (terminal)
    Released,
    /// Teardown could not release the channel; its id stays registered (terminal)
    Leaked,
}

impl ChannelState {
    /// Whether no further operation is possible
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, ChannelState::Released | ChannelState::Leaked)
    }
}

/// Handle owning exactly one hardware channel for its lifetime.
///
/// Not `Clone`: ownership of an id moves only through release back to the
/// registry.
pub struct PwmChannel<'r, E: DmaEngine, const N: usize = NUM_DMA_CHANNELS> {
    registry: &'r ChannelRegistry<E, N>,
    id: Option<ChannelId>,
    pins: Vec<u8, MAX_GPIO_PINS>,
    signal: Option<SignalConfig>,
    state: ChannelState,
}

impl<'r, E: DmaEngine, const N: usize> PwmChannel<'r, E, N> {
    /// Create an empty handle bound to a registry
    pub fn new(registry: &'r ChannelRegistry<E, N>) -> Self {
        Self {
            registry,
            id: None,
            pins: Vec::new(),
            signal: None,
            state: ChannelState::Unallocated,
        }
    }

    fn held(&self) -> Result<ChannelId> {
        match self.id {
            Some(id) if !self.state.is_terminal() => Ok(id),
            _ => Err(ErrorKind::InvalidChannel.into()),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Request a channel from the registry
    pub fn allocate(&mut self) -> Result<ChannelId> {
        match self.state {
            ChannelState::Unallocated => {}
            ChannelState::Released | ChannelState::Leaked => {
                return Err(StateError::Released.into());
            }
            _ => return Err(StateError::AlreadyAllocated.into()),
        }
        let id = self.registry.request_channel()?;
        self.id = Some(id);
        self.state = ChannelState::Allocated;
        Ok(id)
    }

    /// Bind GPIO pins, frequency and duty cycle to the channel.
    ///
    /// On an enabled channel the running signal is updated in place. Nothing
    /// changes on failure.
    pub fn assign_signal(&mut self, pins: &[u8], frequency_hz: f32, duty_cycle: f32) -> Result<()> {
        let id = self.held()?;
        if pins.is_empty() {
            return Err(ErrorKind::InvalidGpioPin.into());
        }
        let stored = Vec::from_slice(pins).map_err(|()| ErrorKind::InvalidGpioPin)?;

        self.registry
            .assign_signal(id, pins, frequency_hz, duty_cycle)?;

        self.pins = stored;
        self.signal = Some(SignalConfig::new(frequency_hz, duty_cycle));
        if self.state == ChannelState::Allocated {
            self.state = ChannelState::SignalAssigned;
        }

        #[cfg(feature = "log")]
        debug!(
            "channel {} signal: {} Hz, duty {} on {} pin(s)",
            id,
            frequency_hz,
            duty_cycle,
            self.pins.len()
        );

        Ok(())
    }

    /// Change the duty cycle, keeping the assigned pins and frequency
    pub fn set_duty(&mut self, duty_cycle: f32) -> Result<()> {
        let Some(signal) = self.signal else {
            self.held()?;
            return Err(ErrorKind::PwmNotSet.into());
        };
        let pins = self.pins.clone();
        self.assign_signal(&pins, signal.frequency_hz, duty_cycle)
    }

    /// Start output
    pub fn enable(&mut self) -> Result<()> {
        let id = self.held()?;
        if self.signal.is_none() {
            return Err(ErrorKind::PwmNotSet.into());
        }
        self.registry.enable(id)?;
        self.state = ChannelState::Enabled;

        #[cfg(feature = "log")]
        debug!("channel {id} enabled");

        Ok(())
    }

    /// Stop output.
    ///
    /// On a channel that is not enabled this is forwarded to the driver and
    /// the state is unchanged.
    pub fn disable(&mut self) -> Result<()> {
        let id = self.held()?;
        self.registry.disable(id)?;
        if self.state == ChannelState::Enabled {
            self.state = ChannelState::Disabled;
        }

        #[cfg(feature = "log")]
        debug!("channel {id} disabled");

        Ok(())
    }

    /// Return the channel to the pool.
    ///
    /// An enabled channel must be disabled first. On failure the state is
    /// unchanged and the id stays registered.
    pub fn release(&mut self) -> Result<()> {
        if self.state == ChannelState::Enabled {
            return Err(StateError::ChannelEnabled.into());
        }
        let id = self.held()?;
        self.registry.release_channel(id)?;
        self.finish_released();
        Ok(())
    }

    /// Disable (best effort) and release the channel.
    ///
    /// Runs automatically on drop. A disable failure is ignored. A release
    /// failure leaves the handle [`Leaked`](ChannelState::Leaked) and is
    /// returned; it is not retried. Calling this again on a released or
    /// leaked handle does nothing.
    pub fn teardown(&mut self) -> Result<()> {
        if self.state.is_terminal() {
            return Ok(());
        }
        let Some(id) = self.id else {
            self.state = ChannelState::Released;
            return Ok(());
        };

        if let Err(_e) = self.registry.disable(id) {
            #[cfg(feature = "log")]
            warn!("channel {id} teardown: disable failed ({_e}), continuing");
        }

        match self.registry.release_channel(id) {
            Ok(()) => {
                self.finish_released();
                Ok(())
            }
            Err(e) => {
                self.state = ChannelState::Leaked;

                #[cfg(feature = "log")]
                warn!("channel {id} teardown: release failed ({e}), channel leaked");

                Err(e)
            }
        }
    }

    fn finish_released(&mut self) {
        self.id = None;
        self.pins.clear();
        self.signal = None;
        self.state = ChannelState::Released;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Duty cycle achieved by the driver
    pub fn duty_cycle(&self) -> Result<f32> {
        self.registry.duty_cycle(self.held()?)
    }

    /// Frequency achieved by the driver, in Hz
    pub fn frequency(&self) -> Result<f32> {
        self.registry.frequency(self.held()?)
    }

    /// Register snapshot for debugging
    pub fn registers(&self) -> Result<RegisterSnapshot> {
        self.registry.registers(self.held()?)
    }

    /// Channel id; for a leaked handle, the id that remains registered
    pub fn id(&self) -> Option<ChannelId> {
        self.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Pins of the last assigned signal
    pub fn pins(&self) -> &[u8] {
        &self.pins
    }

    /// Last assigned frequency and duty cycle (as requested, not as achieved)
    pub fn signal(&self) -> Option<SignalConfig> {
        self.signal
    }

    /// Whether output is running
    pub fn is_enabled(&self) -> bool {
        self.state == ChannelState::Enabled
    }
}

impl<E: DmaEngine, const N: usize> Drop for PwmChannel<'_, E, N> {
    fn drop(&mut self) {
        // Outcome already logged; drop cannot report it.
        let _ = self.teardown();
    }
}

impl<E: DmaEngine, const N: usize> core::fmt::Debug for PwmChannel<'_, E, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PwmChannel")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("pins", &self.pins.as_slice())
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
