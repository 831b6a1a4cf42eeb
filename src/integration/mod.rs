//! External Stack Integrations
//!
//! - **embedded-hal** (`embedded_hal`): [`SetDutyCycle`](::embedded_hal::pwm::SetDutyCycle)
//!   for [`PwmChannel`](crate::PwmChannel), so a channel can drive any
//!   embedded-hal 1.0 PWM consumer (servo and motor driver crates)
//!
//! # Example
//!
//! ```ignore
//! use embedded_hal::pwm::SetDutyCycle;
//!
//! let mut channel = REGISTRY.acquire()?;
//! channel.assign_signal(&[18], 50.0, 0.0)?;
//! channel.enable()?;
//! channel.set_duty_cycle_percent(50)?;
//! ```

pub mod embedded_hal;
