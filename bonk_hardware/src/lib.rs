//! Board support for the bonk on an STM32F407 Discovery.
//!
//! | Signal            | Pin  | Peripheral     |
//! |-------------------|------|----------------|
//! | Status LED R/G/B  | PD14/PD12/PD15 | GPIO |
//! | Heartbeat LED     | PD13 | GPIO           |
//! | Buzzer            | PA8  | TIM1 CH1       |
//! | Bar servo         | PC6  | TIM3 CH1, 50 Hz |
//! | Mallet STEP / DIR | PE7 / PE8 | GPIO      |
//! | Reset button      | PA0  | input, pull-down |
//! | Mode dial         | PA1  | ADC1, 10 bit   |
//! | VL53L0X SCL / SDA | PB6 / PB9 | I2C1      |
//! | Debug serial TX   | PA9  | USART1         |
#![no_std]

use stm32f4xx_hal::{
    adc::{
        config::{AdcConfig, Resolution},
        Adc,
    },
    i2c::I2c,
    pac::{CorePeripherals, Peripherals},
    prelude::*,
    time::Hertz,
    timer::{Channel, Channel1, Timer1, Timer3},
};

use bonk_core::drivers::{RgbLed, Servo, ServoLimits, Striker, TimedTone};
use bonk_core::Config;

pub mod board;
pub mod buzzer;
pub mod dial;
pub mod led;
pub mod pwm;
pub mod range;
pub mod serial;
pub mod striker;

use board::BonkBoard;
use buzzer::Buzzer;
use dial::ModeDial;
use led::OrangeLed;
use pwm::ServoPwm;
use range::RangeFinder;
use serial::DebugSerialPort;

/// Servo frame rate
const SERVO_FRAME: Hertz = Hertz::from_raw(50);
/// Carrier the buzzer starts on; it is silent until the first note anyway
const BUZZER_IDLE: Hertz = Hertz::from_raw(440);

pub struct BonkHardware {
    pub board: BonkBoard,
    pub heartbeat_led: OrangeLed,
    /// `None` when USART1 refused the baud rate
    pub dbg_serial: Option<DebugSerialPort>,
    /// Input clock of the APB1 timers, TIM2 drives the monotonic
    pub timer_clock: Hertz,
}

impl BonkHardware {
    pub fn init(pac: Peripherals, core: CorePeripherals, config: &Config) -> Self {
        let rcc = pac.RCC.constrain();
        let clocks = rcc.cfgr.use_hse(8.MHz()).sysclk(168.MHz()).freeze();
        let delay = core.SYST.delay(&clocks);

        let gpioa = pac.GPIOA.split();
        let gpiob = pac.GPIOB.split();
        let gpioc = pac.GPIOC.split();
        let gpiod = pac.GPIOD.split();
        let gpioe = pac.GPIOE.split();

        // Status LED's
        let green_led = gpiod.pd12.into_push_pull_output();
        let heartbeat_led = gpiod.pd13.into_push_pull_output();
        let red_led = gpiod.pd14.into_push_pull_output();
        let blue_led = gpiod.pd15.into_push_pull_output();
        let led = RgbLed::new(red_led, green_led, blue_led).unwrap_or_else(|e| match e {});

        let dbg_serial = pac
            .USART1
            .tx(gpioa.pa9.into_alternate(), 115200.bps(), &clocks)
            .ok();

        let tim1 = Timer1::new(pac.TIM1, &clocks);
        let buzz_pwm = tim1.pwm_hz(Channel1::new(gpioa.pa8), BUZZER_IDLE);
        let tone = TimedTone::new(Buzzer::new(buzz_pwm, Channel::C1), delay);

        let tim3 = Timer3::new(pac.TIM3, &clocks);
        let servo_pwm = tim3.pwm_hz(Channel1::new(gpioc.pc6), SERVO_FRAME);
        let servo = Servo::new(ServoPwm::new(servo_pwm, Channel::C1), ServoLimits::HOBBY);
        let striker = Striker::new(
            servo,
            gpioe.pe7.into_push_pull_output(),
            gpioe.pe8.into_push_pull_output(),
            config.servo_settle,
            config.strike,
        );

        let i2c = I2c::new(pac.I2C1, (gpiob.pb6, gpiob.pb9), 100.kHz(), &clocks);
        let range_finder = RangeFinder::new(i2c);

        let adc = Adc::adc1(
            pac.ADC1,
            true,
            AdcConfig::default().resolution(Resolution::Ten),
        );
        let dial = ModeDial::new(adc, gpioa.pa1.into_analog());

        let reset_button = gpioa.pa0.into_pull_down_input();

        Self {
            board: BonkBoard {
                tone,
                led,
                striker,
                range_finder,
                dial,
                reset_button,
            },
            heartbeat_led,
            dbg_serial,
            timer_clock: clocks.timclk1(),
        }
    }
}
