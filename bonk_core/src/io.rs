//! The leaf operations the state machine drives.
//!
//! A board implements each trait once; [`Board`] is just all of them plus a
//! blocking delay. None of these can fail from the caller's point of view:
//! a board logs its own driver errors and carries on, because the loop must
//! keep ticking.

use embedded_hal::delay::DelayNs;
use fugit::MillisDurationU32;

use crate::mode::Mode;
use crate::note::Note;
use crate::quantizer::SensorReading;

/// On/off state of the three LED channels. The LED is not dimmable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Color {
    pub const OFF: Color = Color::new(false, false, false);
    pub const RED: Color = Color::new(true, false, false);
    pub const GREEN: Color = Color::new(false, true, false);
    pub const BLUE: Color = Color::new(false, false, true);
    pub const CYAN: Color = Color::new(false, true, true);
    pub const YELLOW: Color = Color::new(true, true, false);
    pub const MAGENTA: Color = Color::new(true, false, true);
    pub const WHITE: Color = Color::new(true, true, true);

    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }
}

pub trait RangeSensor {
    /// Takes one blocking measurement.
    fn measure(&mut self) -> SensorReading;
}

pub trait ToneOutput {
    /// Sounds the note for `length`, or silences the buzzer for `Rest`/`Fault`.
    /// A later call replaces the tone; nothing stretches it past `length`.
    fn play(&mut self, note: Note, length: MillisDurationU32);
}

pub trait ActuatorOutput {
    /// Moves the arm over the note's bar and hits it, or parks the arm for
    /// `Rest`/`Fault`. Blocks until the mallet is back at rest.
    fn strike(&mut self, note: Note);
}

pub trait IndicatorOutput {
    fn set_color(&mut self, color: Color);
}

pub trait ModeSelector {
    fn read_mode(&mut self) -> Mode;
}

pub trait ResetInput {
    fn is_pressed(&mut self) -> bool;
}

pub trait Board:
    RangeSensor + ToneOutput + ActuatorOutput + IndicatorOutput + ModeSelector + ResetInput + DelayNs
{
}

impl<T> Board for T where
    T: RangeSensor
        + ToneOutput
        + ActuatorOutput
        + IndicatorOutput
        + ModeSelector
        + ResetInput
        + DelayNs
{
}
