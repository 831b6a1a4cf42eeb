//! embedded-hal 1.0 PWM traits for [`PwmChannel`].
//!
//! The duty cycle maps linearly from `0..=u16::MAX` onto `[0, 1]`. Pins and
//! frequency come from the last [`PwmChannel::assign_signal`]; setting a duty
//! cycle before that fails with [`ErrorKind::PwmNotSet`](crate::ErrorKind::PwmNotSet).

use embedded_hal::pwm::{self, ErrorType, SetDutyCycle};

use crate::channel::PwmChannel;
use crate::driver::engine::DmaEngine;
use crate::error::Error;

impl pwm::Error for Error {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

impl<E: DmaEngine, const N: usize> ErrorType for PwmChannel<'_, E, N> {
    type Error = Error;
}

impl<E: DmaEngine, const N: usize> SetDutyCycle for PwmChannel<'_, E, N> {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.set_duty(f32::from(duty) / f32::from(u16::MAX))
    }
}
