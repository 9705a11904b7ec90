use embedded_hal::{delay::DelayNs, digital::OutputPin, pwm::SetDutyCycle};
use fugit::MillisDurationU32;

use super::servo::Servo;
use crate::config::{Direction, StrikeProfile, Stroke};
use crate::note::{Note, REST_DEGREES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StrikeError<PwmE, PinE> {
    Servo(PwmE),
    Pin(PinE),
}

/// The percussion arm: a servo picks the bar, a step/direction motor driver
/// swings the mallet.
pub struct Striker<P, STEP, DIR> {
    servo: Servo<P>,
    step: STEP,
    dir: DIR,
    settle: MillisDurationU32,
    profile: StrikeProfile,
}

impl<P, STEP, DIR, E> Striker<P, STEP, DIR>
where
    P: SetDutyCycle,
    STEP: OutputPin<Error = E>,
    DIR: OutputPin<Error = E>,
{
    pub fn new(
        servo: Servo<P>,
        step: STEP,
        dir: DIR,
        settle: MillisDurationU32,
        profile: StrikeProfile,
    ) -> Self {
        Self {
            servo,
            step,
            dir,
            settle,
            profile,
        }
    }

    /// Parks the arm for `Rest`/`Fault`; otherwise moves over the bar, waits
    /// for the servo and runs the whole strike profile.
    pub fn strike(
        &mut self,
        note: Note,
        delay: &mut impl DelayNs,
    ) -> Result<(), StrikeError<P::Error, E>> {
        let Some(pitch) = note.pitch() else {
            return self.park();
        };

        self.servo
            .set_degrees(pitch.servo_degrees())
            .map_err(StrikeError::Servo)?;
        delay.delay_ms(self.settle.to_millis());

        self.swing(delay).map_err(StrikeError::Pin)
    }

    pub fn park(&mut self) -> Result<(), StrikeError<P::Error, E>> {
        self.servo
            .set_degrees(REST_DEGREES)
            .map_err(StrikeError::Servo)
    }

    fn swing(&mut self, delay: &mut impl DelayNs) -> Result<(), E> {
        let half_pulse = self.profile.half_pulse.to_micros();
        for stroke in self.profile.strokes {
            match *stroke {
                Stroke::Steps { direction, count } => {
                    match direction {
                        Direction::Lift => self.dir.set_high()?,
                        Direction::Drop => self.dir.set_low()?,
                    }
                    for _ in 0..count {
                        self.step.set_high()?;
                        delay.delay_us(half_pulse);
                        self.step.set_low()?;
                        delay.delay_us(half_pulse);
                    }
                }
                Stroke::Pause(pause) => delay.delay_ms(pause.to_millis()),
            }
        }
        Ok(())
    }

    pub fn servo_degrees(&self) -> Option<u16> {
        self.servo.degrees()
    }

    pub fn release(self) -> (Servo<P>, STEP, DIR) {
        (self.servo, self.step, self.dir)
    }
}
