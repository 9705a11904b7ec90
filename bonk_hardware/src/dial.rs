/// Mode dial: a potentiometer across 3V and ground with the wiper on PA1.
use stm32f4xx_hal::{
    adc::{config::SampleTime, Adc},
    gpio::{Analog, Pin},
    pac::ADC1,
};

use embedded_hal_02::adc::Channel;

use bonk_core::Mode;

pub type DefaultModeDial = ModeDial<Pin<'A', 1, Analog>>;

pub struct ModeDial<P: Channel<ADC1, ID = u8>> {
    adc: Adc<ADC1>,
    wiper: P,
}

impl<P: Channel<ADC1, ID = u8>> ModeDial<P> {
    /// `adc` must be set to 10 bit resolution, the mode thresholds assume 0..=1023.
    pub fn new(adc: Adc<ADC1>, wiper: P) -> Self {
        Self { adc, wiper }
    }

    pub fn sample(&mut self) -> u16 {
        self.adc.convert(&self.wiper, SampleTime::Cycles_480)
    }

    pub fn mode(&mut self) -> Mode {
        Mode::from_dial(self.sample())
    }
}
