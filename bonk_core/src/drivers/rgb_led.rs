use embedded_hal::digital::{OutputPin, PinState};

use crate::io::Color;

/// Three push-pull outputs driven together as one status LED.
pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    color: Color,
}

impl<E, R, G, B> RgbLed<R, G, B>
where
    R: OutputPin<Error = E>,
    G: OutputPin<Error = E>,
    B: OutputPin<Error = E>,
{
    /// Takes the pins and switches every channel off.
    pub fn new(red: R, green: G, blue: B) -> Result<Self, E> {
        let mut led = Self {
            red,
            green,
            blue,
            color: Color::OFF,
        };
        led.set(Color::OFF)?;
        Ok(led)
    }

    pub fn set(&mut self, color: Color) -> Result<(), E> {
        self.red.set_state(PinState::from(color.red))?;
        self.green.set_state(PinState::from(color.green))?;
        self.blue.set_state(PinState::from(color.blue))?;
        self.color = color;
        Ok(())
    }

    /// Last color successfully written.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}
