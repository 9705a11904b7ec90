#![no_std]
#![no_main]

/// Hits every bar in order, then parks the arm for a few seconds
use cortex_m_rt::entry;
use panic_halt as _;
use stm32f4xx_hal::{
    pac::Peripherals,
    prelude::*,
    timer::{Channel, Channel1, Timer3},
};

use bonk_core::config::{StrikeProfile, SERVO_SETTLE};
use bonk_core::drivers::{Servo, ServoLimits, Striker};
use bonk_core::{Note, Pitch};
use bonk_hardware::pwm::ServoPwm;

#[entry]
fn main() -> ! {
    let cp = cortex_m::peripheral::Peripherals::take().unwrap();
    let pac = Peripherals::take().unwrap();

    let rcc = pac.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).sysclk(168.MHz()).freeze();

    let mut delay = cp.SYST.delay(&clocks);

    let gpioc = pac.GPIOC.split();
    let gpioe = pac.GPIOE.split();

    let tim3 = Timer3::new(pac.TIM3, &clocks);
    let servo_pwm = tim3.pwm_hz(Channel1::new(gpioc.pc6), 50.Hz());
    let servo = Servo::new(ServoPwm::new(servo_pwm, Channel::C1), ServoLimits::HOBBY);

    let mut striker = Striker::new(
        servo,
        gpioe.pe7.into_push_pull_output(),
        gpioe.pe8.into_push_pull_output(),
        SERVO_SETTLE,
        StrikeProfile::DEFAULT,
    );

    loop {
        for pitch in Pitch::all() {
            striker.strike(Note::from(pitch), &mut delay).unwrap();
            delay.delay_ms(200_u32);
        }

        striker.park().unwrap();
        delay.delay_ms(3000_u32);
    }
}
