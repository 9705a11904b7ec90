use embedded_hal::delay::DelayNs;
use stm32f4xx_hal::{
    gpio::{Input, PA0},
    i2c::I2c,
    pac::I2C1,
    timer::SysDelay,
};

use bonk_core::drivers::TimedTone;
use bonk_core::io::{
    ActuatorOutput, IndicatorOutput, ModeSelector, RangeSensor, ResetInput, ToneOutput,
};
use bonk_core::{Color, Mode, Note, SensorReading};
use fugit::MillisDurationU32;

use crate::buzzer::Buzzer;
use crate::dial::DefaultModeDial;
use crate::led::StatusLed;
use crate::range::RangeFinder;
use crate::striker::ArmStriker;

pub type ResetButton = PA0<Input>;
pub type RangeBus = I2c<I2C1>;
/// The buzzer and the SysTick delay. Every blocking wait on the board goes
/// through it so a tone is cut off on time.
pub type ToneDelay = TimedTone<Buzzer, SysDelay>;

/// Everything the state machine touches, already configured.
/// Driver errors are logged here and never handed back to the loop.
pub struct BonkBoard {
    pub tone: ToneDelay,
    pub led: StatusLed,
    pub striker: ArmStriker,
    pub range_finder: RangeFinder<RangeBus>,
    pub dial: DefaultModeDial,
    pub reset_button: ResetButton,
}

impl RangeSensor for BonkBoard {
    fn measure(&mut self) -> SensorReading {
        let reading = self.range_finder.measure();
        log::trace!("range {:?}", reading);
        reading
    }
}

impl ToneOutput for BonkBoard {
    fn play(&mut self, note: Note, length: MillisDurationU32) {
        self.tone.play(note, length);
    }
}

impl ActuatorOutput for BonkBoard {
    fn strike(&mut self, note: Note) {
        if let Err(e) = self.striker.strike(note, &mut self.tone) {
            log::warn!("strike {:?} failed: {:?}", note, e);
        }
    }
}

impl IndicatorOutput for BonkBoard {
    fn set_color(&mut self, color: Color) {
        if let Err(e) = self.led.set(color) {
            log::warn!("status led: {:?}", e);
        }
    }
}

impl ModeSelector for BonkBoard {
    fn read_mode(&mut self) -> Mode {
        self.dial.mode()
    }
}

impl ResetInput for BonkBoard {
    fn is_pressed(&mut self) -> bool {
        // Pulled down, the button ties PA0 to 3V
        self.reset_button.is_high()
    }
}

impl DelayNs for BonkBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.tone.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.tone.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.tone.delay_ms(ms);
    }
}
