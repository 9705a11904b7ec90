#![no_std]
#![no_main]

/// Walks the buzzer up and down the bonk's scale
use cortex_m_rt::entry;
use panic_halt as _;
use stm32f4xx_hal::{
    pac::Peripherals,
    prelude::*,
    timer::{Channel, Channel1, Timer1},
};

use bonk_core::{Note, Pitch};
use bonk_hardware::buzzer::Buzzer;

#[entry]
fn main() -> ! {
    let cp = cortex_m::peripheral::Peripherals::take().unwrap();
    let pac = Peripherals::take().unwrap();

    let rcc = pac.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).sysclk(168.MHz()).freeze();

    let mut delay = cp.SYST.delay(&clocks);

    let gpioa = pac.GPIOA.split();
    let tim1 = Timer1::new(pac.TIM1, &clocks);
    let buzz_pwm = tim1.pwm_hz(Channel1::new(gpioa.pa8), 440.Hz());

    let mut buzzer = Buzzer::new(buzz_pwm, Channel::C1);

    let tempo = 300_u32;

    loop {
        for pitch in Pitch::all().chain(Pitch::all().rev()) {
            buzzer.play(Note::from(pitch).frequency());
            delay.delay_ms(tempo);
        }

        buzzer.play(None);
        delay.delay_ms(1000_u32);
    }
}
