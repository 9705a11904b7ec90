use embedded_hal::pwm::SetDutyCycle;
use fugit::MicrosDurationU32;

use crate::note::SERVO_RANGE_DEGREES;

/// Pulse widths at 0 and 180 degrees, and the frame period the PWM timer
/// was configured with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ServoLimits {
    pub min_pulse: MicrosDurationU32,
    pub max_pulse: MicrosDurationU32,
    pub period: MicrosDurationU32,
}

impl ServoLimits {
    /// Hobby servo on a 50 Hz frame.
    pub const HOBBY: ServoLimits = ServoLimits {
        min_pulse: MicrosDurationU32::micros(500),
        max_pulse: MicrosDurationU32::micros(2500),
        period: MicrosDurationU32::micros(20_000),
    };

    /// Pulse width for an angle, clamped to the servo's travel.
    pub fn pulse_for(&self, degrees: u16) -> MicrosDurationU32 {
        let degrees = u32::from(degrees.min(SERVO_RANGE_DEGREES));
        let min = self.min_pulse.to_micros();
        let span = self.max_pulse.to_micros() - min;
        MicrosDurationU32::micros(min + span * degrees / u32::from(SERVO_RANGE_DEGREES))
    }
}

/// Positional servo on one PWM channel.
pub struct Servo<P> {
    pwm: P,
    limits: ServoLimits,
    degrees: Option<u16>,
}

impl<P: SetDutyCycle> Servo<P> {
    pub fn new(pwm: P, limits: ServoLimits) -> Self {
        Self {
            pwm,
            limits,
            degrees: None,
        }
    }

    pub fn set_degrees(&mut self, degrees: u16) -> Result<(), P::Error> {
        let pulse = self.limits.pulse_for(degrees).to_micros();
        let period = self.limits.period.to_micros();
        // Both fit a u16 for any frame up to 65 ms.
        self.pwm
            .set_duty_cycle_fraction(pulse as u16, period as u16)?;
        self.degrees = Some(degrees.min(SERVO_RANGE_DEGREES));
        Ok(())
    }

    /// Last commanded angle; `None` until the first command.
    pub fn degrees(&self) -> Option<u16> {
        self.degrees
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePwm;

    #[test]
    fn pulse_spans_the_limits() {
        let limits = ServoLimits::HOBBY;
        assert_eq!(limits.pulse_for(0).to_micros(), 500);
        assert_eq!(limits.pulse_for(90).to_micros(), 1500);
        assert_eq!(limits.pulse_for(180).to_micros(), 2500);
        assert_eq!(limits.pulse_for(400).to_micros(), 2500);
    }

    #[test]
    fn duty_is_pulse_over_period() {
        let mut servo = Servo::new(FakePwm::new(20_000), ServoLimits::HOBBY);
        assert_eq!(servo.degrees(), None);

        servo.set_degrees(90).unwrap();
        assert_eq!(servo.degrees(), Some(90));
        assert_eq!(servo.release().duty(), 1500);
    }

    #[test]
    fn duty_scales_with_the_timer_resolution() {
        let mut servo = Servo::new(FakePwm::new(1000), ServoLimits::HOBBY);
        servo.set_degrees(0).unwrap();
        // 500 / 20000 of 1000
        assert_eq!(servo.release().duty(), 25);
    }
}
