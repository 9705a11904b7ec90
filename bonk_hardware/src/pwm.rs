use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f4xx_hal::{
    pac::TIM3,
    timer::{
        pwm::{ChannelBuilder, PwmHz},
        Channel,
    },
};

pub type ServoTimer = PwmHz<TIM3, ChannelBuilder<TIM3, 0>>;

/// One channel of a 50 Hz timer, exposed through `SetDutyCycle` so the
/// generic servo driver can own it.
pub struct ServoPwm {
    tim: ServoTimer,
    channel: Channel,
}

impl ServoPwm {
    pub fn new(mut tim: ServoTimer, channel: Channel) -> Self {
        tim.set_duty(channel, 0);
        tim.enable(channel);
        Self { tim, channel }
    }
}

impl ErrorType for ServoPwm {
    type Error = Infallible;
}

impl SetDutyCycle for ServoPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.tim.get_max_duty()
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.tim.set_duty(self.channel, duty);
        Ok(())
    }
}
