/// A simple pwm buzzer, use a timer's period to alter the tone
use stm32f4xx_hal::{
    pac::TIM1,
    timer::{
        pwm::{ChannelBuilder, PwmHz},
        Channel,
    },
};

use fugit::HertzU32;

use bonk_core::drivers::ToneGenerator;

pub type BuzzerType = PwmHz<TIM1, ChannelBuilder<TIM1, 0>>;

pub struct Buzzer {
    tim: BuzzerType,
    channel: Channel,
    tone: Option<HertzU32>,
}

impl Buzzer {
    /// Starts silent.
    pub fn new(tim: BuzzerType, channel: Channel) -> Self {
        let mut t = Self {
            tim,
            channel,
            tone: None,
        };
        t.tim.disable(t.channel);
        t
    }

    /// Holds `tone` until the next call; `None` silences the buzzer.
    pub fn play(&mut self, tone: Option<HertzU32>) {
        if tone == self.tone {
            return;
        }

        match tone {
            Some(freq) => {
                self.tim.set_period(freq);
                // The compare register is absolute, so re-center it for the new period
                let max = self.tim.get_max_duty();
                self.tim.set_duty(self.channel, max / 2);
                self.tim.enable(self.channel);
            }
            // A 0 Hz period would divide by zero, so silence means disabling the channel
            None => self.tim.disable(self.channel),
        }
        self.tone = tone;
    }

    pub fn tone(&self) -> Option<HertzU32> {
        self.tone
    }
}

impl ToneGenerator for Buzzer {
    fn start(&mut self, frequency: HertzU32) {
        self.play(Some(frequency));
    }

    fn stop(&mut self) {
        self.play(None);
    }
}
