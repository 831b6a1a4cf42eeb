//! Testing utilities and mock implementations
//!
//! [`MockEngine`] simulates the native DMA PWM driver closely enough to
//! exercise the registry and channel state machine on the host: the channel
//! pool, configuration lockout, the parameter checks of `set_pwm` and the
//! sentinel codes they produce.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

extern crate std;

use std::vec::Vec;

use crate::driver::engine::{DmaEngine, RegisterSnapshot};
use crate::internal::constants::{
    DEFAULT_PAGES, DEFAULT_PULSE_WIDTH_US, MAX_GPIO, MAX_PULSE_WIDTH_US, MIN_PULSE_WIDTH_US,
    NUM_DMA_CHANNELS, code,
};

/// Out-of-memory code `set_pwm` passes through from the allocator
pub const ENOMEM: i32 = -12;

/// Control blocks per page of control block memory
const CBS_PER_PAGE: u32 = 4096;

/// Engine primitive invoked on the mock, in call order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Configure { pages: i32, pulse_width_us: f32 },
    Request,
    AssignSignal(i32),
    Enable(i32),
    Disable(i32),
    Release(i32),
    DutyCycle(i32),
    Frequency(i32),
    PulseWidth,
    Registers(i32),
}

#[derive(Debug, Clone, Copy, Default)]
struct MockChannel {
    requested: bool,
    enabled: bool,
    /// Achieved (frequency, duty) of the built control block sequence
    signal: Option<(f32, f32)>,
}

// =============================================================================
// Mock Engine
// =============================================================================

/// Host-side stand-in for `libdmapwm`
///
/// # Example
///
/// ```ignore
/// let mut engine = MockEngine::new();
/// engine.fail_next_request(-10);
/// assert_eq!(engine.request(), -10);
/// assert_eq!(engine.request(), 0);
/// ```
#[derive(Debug)]
pub struct MockEngine {
    /// Every primitive invoked, in order
    pub calls: Vec<Call>,
    channels: [MockChannel; NUM_DMA_CHANNELS],
    pages: i32,
    pulse_width_us: f32,
    next_request: Option<i32>,
    next_disable: Option<i32>,
    next_release: Option<i32>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            channels: [MockChannel::default(); NUM_DMA_CHANNELS],
            pages: DEFAULT_PAGES as i32,
            pulse_width_us: DEFAULT_PULSE_WIDTH_US,
            next_request: None,
            next_disable: None,
            next_release: None,
        }
    }

    // =========================================================================
    // Fault Injection
    // =========================================================================

    /// Make the next `request` return `code` without allocating
    pub fn fail_next_request(&mut self, code: i32) {
        self.next_request = Some(code);
    }

    /// Make the next `request` return an id that is already handed out
    pub fn duplicate_next_request(&mut self, channel: i32) {
        self.next_request = Some(channel);
    }

    /// Make the next `disable` return `code` without touching the channel
    pub fn fail_next_disable(&mut self, code: i32) {
        self.next_disable = Some(code);
    }

    /// Make the next `release` return `code` without touching the channel
    pub fn fail_next_release(&mut self, code: i32) {
        self.next_release = Some(code);
    }

    /// Forget a channel, as if the driver had lost track of it
    pub fn invalidate(&mut self, channel: i32) {
        if let Some(ch) = self.slot_mut(channel) {
            *ch = MockChannel::default();
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn is_requested(&self, channel: i32) -> bool {
        self.slot(channel).is_some_and(|ch| ch.requested)
    }

    pub fn is_enabled(&self, channel: i32) -> bool {
        self.slot(channel).is_some_and(|ch| ch.enabled)
    }

    pub fn requested_count(&self) -> usize {
        self.channels.iter().filter(|ch| ch.requested).count()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn slot(&self, channel: i32) -> Option<&MockChannel> {
        usize::try_from(channel)
            .ok()
            .and_then(|i| self.channels.get(i))
    }

    fn slot_mut(&mut self, channel: i32) -> Option<&mut MockChannel> {
        usize::try_from(channel)
            .ok()
            .and_then(|i| self.channels.get_mut(i))
    }

    /// Requested channel or `EINVCHNL`
    fn check(&mut self, channel: i32) -> Result<&mut MockChannel, i32> {
        match self.slot_mut(channel) {
            Some(ch) if ch.requested => Ok(ch),
            _ => Err(code::EINVCHNL),
        }
    }

    /// Number of control blocks per half period, or the failure code
    fn control_blocks(&self, freq_hz: f32) -> Result<u32, i32> {
        if !freq_hz.is_finite() || freq_hz <= 0.0 {
            return Err(code::EFREQNOTMET);
        }
        let t_sub_us = (1e6 / f64::from(freq_hz)) as u32;
        let cbs = (f64::from(t_sub_us) / f64::from(self.pulse_width_us)) as u32 / 2;
        if cbs == 0 {
            return Err(code::EFREQNOTMET);
        }
        if cbs / CBS_PER_PAGE + 1 > self.pages as u32 {
            return Err(ENOMEM);
        }
        Ok(cbs)
    }
}

impl DmaEngine for MockEngine {
    fn configure(&mut self, pages: i32, pulse_width_us: f32) -> f32 {
        self.calls.push(Call::Configure {
            pages,
            pulse_width_us,
        });
        if self.requested_count() > 0 {
            return code::ECHNLREQ as f32;
        }
        if !(MIN_PULSE_WIDTH_US..=MAX_PULSE_WIDTH_US).contains(&pulse_width_us) || pages <= 0 {
            return code::EINVPW as f32;
        }
        self.pages = pages;
        self.pulse_width_us = pulse_width_us;
        pulse_width_us
    }

    fn request(&mut self) -> i32 {
        self.calls.push(Call::Request);
        if let Some(forced) = self.next_request.take() {
            return forced;
        }
        match self.channels.iter().position(|ch| !ch.requested) {
            Some(i) => {
                self.channels[i].requested = true;
                i as i32
            }
            None => code::ENOFREECHNL,
        }
    }

    fn assign_signal(&mut self, channel: i32, pins: &[u8], freq_hz: f32, duty: f32) -> i32 {
        self.calls.push(Call::AssignSignal(channel));
        if let Err(e) = self.check(channel) {
            return e;
        }
        if !(0.0..=1.0).contains(&duty) {
            return code::EINVDUTY;
        }
        if pins.iter().any(|&pin| pin > MAX_GPIO) {
            return code::EINVGPIO;
        }
        let cbs = match self.control_blocks(freq_hz) {
            Ok(cbs) => cbs,
            Err(e) => return e,
        };
        let achieved = (1e6 / (f64::from(cbs) * f64::from(self.pulse_width_us)) / 2.0) as f32;
        if let Ok(ch) = self.check(channel) {
            ch.signal = Some((achieved, duty));
        }
        0
    }

    fn enable(&mut self, channel: i32) -> i32 {
        self.calls.push(Call::Enable(channel));
        match self.check(channel) {
            Ok(ch) if ch.signal.is_none() => code::EPWMNOTSET,
            Ok(ch) => {
                ch.enabled = true;
                0
            }
            Err(e) => e,
        }
    }

    fn disable(&mut self, channel: i32) -> i32 {
        self.calls.push(Call::Disable(channel));
        if let Some(forced) = self.next_disable.take() {
            return forced;
        }
        match self.check(channel) {
            Ok(ch) => {
                ch.enabled = false;
                0
            }
            Err(e) => e,
        }
    }

    fn release(&mut self, channel: i32) -> i32 {
        self.calls.push(Call::Release(channel));
        if let Some(forced) = self.next_release.take() {
            return forced;
        }
        match self.check(channel) {
            Ok(ch) => {
                *ch = MockChannel::default();
                0
            }
            Err(e) => e,
        }
    }

    fn duty_cycle(&mut self, channel: i32) -> f32 {
        self.calls.push(Call::DutyCycle(channel));
        match self.check(channel) {
            Ok(ch) => ch.signal.map_or(code::EPWMNOTSET as f32, |(_, duty)| duty),
            Err(e) => e as f32,
        }
    }

    fn frequency(&mut self, channel: i32) -> f32 {
        self.calls.push(Call::Frequency(channel));
        match self.check(channel) {
            Ok(ch) => ch.signal.map_or(code::EPWMNOTSET as f32, |(freq, _)| freq),
            Err(e) => e as f32,
        }
    }

    fn pulse_width(&mut self) -> f32 {
        self.calls.push(Call::PulseWidth);
        self.pulse_width_us
    }

    fn registers(&mut self, channel: i32) -> RegisterSnapshot {
        self.calls.push(Call::Registers(channel));
        let enabled = self.is_enabled(channel);
        RegisterSnapshot {
            dma_cs: u32::from(enabled),
            ..RegisterSnapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_hands_out_lowest_free_channel() {
        let mut engine = MockEngine::new();
        assert_eq!(engine.request(), 0);
        assert_eq!(engine.request(), 1);
        assert_eq!(engine.release(0), 0);
        assert_eq!(engine.request(), 0);
    }

    #[test]
    fn mock_exhausts_after_seven_channels() {
        let mut engine = MockEngine::new();
        for i in 0..NUM_DMA_CHANNELS as i32 {
            assert_eq!(engine.request(), i);
        }
        assert_eq!(engine.request(), code::ENOFREECHNL);
    }

    #[test]
    fn mock_servo_timing_is_exact() {
        let mut engine = MockEngine::new();
        assert_eq!(engine.configure(16, 50.0), 50.0);
        let ch = engine.request();
        assert_eq!(engine.assign_signal(ch, &[18], 50.0, 0.075), 0);
        assert_eq!(engine.frequency(ch), 50.0);
        assert_eq!(engine.duty_cycle(ch), 0.075);
    }

    #[test]
    fn mock_reports_page_exhaustion() {
        let mut engine = MockEngine::new();
        let ch = engine.request();
        // 1 Hz at 5 us needs 100_000 control blocks, more than 16 pages hold
        assert_eq!(engine.assign_signal(ch, &[18], 1.0, 0.5), ENOMEM);
    }

    #[test]
    fn mock_forced_failures_are_one_shot() {
        let mut engine = MockEngine::new();
        let ch = engine.request();
        engine.fail_next_release(code::EINVCHNL);

        assert_eq!(engine.release(ch), code::EINVCHNL);
        assert!(engine.is_requested(ch));
        assert_eq!(engine.release(ch), 0);
    }
}
