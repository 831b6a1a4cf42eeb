//! FFI binding to the native `libdmapwm` driver.
//!
//! Available with the `native` feature. The library is linked by name
//! (`-ldmapwm`); `build.rs` adds its install directory to the search path.
//!
//! Duty cycles cross the boundary in percent, the driver's scale; see
//! `driver::scale`.
//!
//! The C driver keeps all of its state in process globals, so
//! [`NativeEngine`] is a zero-sized handle. Construct exactly one, normally
//! as the engine of a `static` [`ChannelRegistry`](crate::ChannelRegistry).

use core::ffi::{c_float, c_int};

use super::engine::{DmaEngine, RegisterSnapshot};
use super::scale;
use crate::internal::constants::{MAX_GPIO_PINS, code};

mod sys {
    use core::ffi::{c_float, c_int};

    use super::RegisterSnapshot;

    #[link(name = "dmapwm")]
    unsafe extern "C" {
        pub fn config_pwm(pages: c_int, pulse_width: c_float) -> c_float;
        pub fn request_pwm() -> c_int;
        pub fn set_pwm(
            channel: c_int,
            gpio: *mut c_int,
            num_gpio: usize,
            freq: c_float,
            duty_cycle: c_float,
        ) -> c_int;
        pub fn enable_pwm(channel: c_int) -> c_int;
        pub fn disable_pwm(channel: c_int) -> c_int;
        pub fn free_pwm(channel: c_int) -> c_int;
        pub fn get_duty_cycle_pwm(channel: c_int) -> c_float;
        pub fn get_freq_pwm(channel: c_int) -> c_float;
        pub fn get_pulse_width() -> c_float;
        pub fn get_reg_pwm(channel: c_int) -> RegisterSnapshot;
    }
}

/// Engine backed by the process-global state of `libdmapwm`
#[derive(Debug, Default)]
pub struct NativeEngine {
    _private: (),
}

impl NativeEngine {
    /// Create the handle (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl DmaEngine for NativeEngine {
    fn configure(&mut self, pages: i32, pulse_width_us: f32) -> f32 {
        // SAFETY: plain value arguments; the driver validates both.
        unsafe { sys::config_pwm(pages as c_int, pulse_width_us as c_float) }
    }

    fn request(&mut self) -> i32 {
        // SAFETY: no arguments; the driver initializes itself on first use.
        unsafe { sys::request_pwm() }
    }

    fn assign_signal(&mut self, channel: i32, pins: &[u8], freq_hz: f32, duty: f32) -> i32 {
        let percent = match scale::to_percent(duty) {
            Ok(percent) => percent,
            Err(e) => return e,
        };
        if pins.len() > MAX_GPIO_PINS {
            return code::EINVGPIO;
        }
        let mut gpio = [0 as c_int; MAX_GPIO_PINS];
        for (slot, &pin) in gpio.iter_mut().zip(pins) {
            *slot = c_int::from(pin);
        }
        // SAFETY: `gpio` holds `pins.len()` initialized entries and outlives
        // the call; the driver only reads through the pointer.
        unsafe {
            sys::set_pwm(
                channel as c_int,
                gpio.as_mut_ptr(),
                pins.len(),
                freq_hz as c_float,
                percent as c_float,
            )
        }
    }

    fn enable(&mut self, channel: i32) -> i32 {
        // SAFETY: the driver range-checks the channel.
        unsafe { sys::enable_pwm(channel as c_int) }
    }

    fn disable(&mut self, channel: i32) -> i32 {
        // SAFETY: the driver range-checks the channel.
        unsafe { sys::disable_pwm(channel as c_int) }
    }

    fn release(&mut self, channel: i32) -> i32 {
        // SAFETY: the driver range-checks the channel.
        unsafe { sys::free_pwm(channel as c_int) }
    }

    fn duty_cycle(&mut self, channel: i32) -> f32 {
        // SAFETY: the driver range-checks the channel.
        let raw = unsafe { sys::get_duty_cycle_pwm(channel as c_int) };
        scale::from_percent(raw)
    }

    fn frequency(&mut self, channel: i32) -> f32 {
        // SAFETY: the driver range-checks the channel.
        unsafe { sys::get_freq_pwm(channel as c_int) }
    }

    fn pulse_width(&mut self) -> f32 {
        // SAFETY: reads a driver global.
        unsafe { sys::get_pulse_width() }
    }

    fn registers(&mut self, channel: i32) -> RegisterSnapshot {
        // SAFETY: `get_reg_pwm` dereferences the channel's mapped DMA
        // registers without a range check, so only requested ids reach it
        // (the registry checks membership before forwarding).
        unsafe { sys::get_reg_pwm(channel as c_int) }
    }
}
