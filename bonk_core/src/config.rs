//! Compile-time tuning for the firmware.
//!
//! Everything that came out of calibrating the prototype lives here so the
//! board and the state machine agree on one set of numbers.

use fugit::{MicrosDurationU32, MillisDurationU32};

use crate::io::Color;

pub const RECORDING_CAPACITY: usize = 40;

/// Nominal loop period. The tone of a tick is held for this long.
pub const TICK: MillisDurationU32 = MillisDurationU32::millis(500);

/// Consecutive ticks the reset button must be held to wipe the recording.
pub const HOLD_TICKS: u8 = 5;

/// Time the horizontal servo gets to reach a bar before the mallet drops.
pub const SERVO_SETTLE: MillisDurationU32 = MillisDurationU32::millis(300);

/// Whether the mallet goes up or down for a run of step pulses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Lift,
    Drop,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stroke {
    Steps { direction: Direction, count: u16 },
    Pause(MillisDurationU32),
}

/// Pulse pattern that swings the mallet from rest onto the bar and back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StrikeProfile {
    pub strokes: &'static [Stroke],
    /// High time and low time of every step pulse.
    pub half_pulse: MicrosDurationU32,
}

/// Down onto the bar, back up through rest, settle, down to rest again.
const DEFAULT_STROKES: [Stroke; 5] = [
    Stroke::Steps {
        direction: Direction::Drop,
        count: 25,
    },
    Stroke::Pause(MillisDurationU32::millis(40)),
    Stroke::Steps {
        direction: Direction::Lift,
        count: 50,
    },
    Stroke::Pause(MillisDurationU32::millis(150)),
    Stroke::Steps {
        direction: Direction::Drop,
        count: 25,
    },
];

impl StrikeProfile {
    pub const DEFAULT: StrikeProfile = StrikeProfile {
        strokes: &DEFAULT_STROKES,
        half_pulse: MicrosDurationU32::micros(800),
    };

    /// Lift steps minus drop steps. Zero means the mallet ends where it began.
    pub fn net_steps(&self) -> i32 {
        self.strokes
            .iter()
            .map(|stroke| match *stroke {
                Stroke::Steps {
                    direction: Direction::Lift,
                    count,
                } => i32::from(count),
                Stroke::Steps {
                    direction: Direction::Drop,
                    count,
                } => -i32::from(count),
                Stroke::Pause(_) => 0,
            })
            .sum()
    }

    pub fn pulse_count(&self) -> u32 {
        self.strokes
            .iter()
            .map(|stroke| match *stroke {
                Stroke::Steps { count, .. } => u32::from(count),
                Stroke::Pause(_) => 0,
            })
            .sum()
    }
}

impl Default for StrikeProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// When the playing modes swing the mallet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StrikePolicy {
    /// Only when the note differs from the one played on the previous tick.
    #[default]
    OnChange,
    /// On every tick, repeating the same bar while the note holds.
    EveryTick,
}

/// An LED blink pattern run as a blocking acknowledgment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Blink {
    pub times: u8,
    pub half_period: MillisDurationU32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub tick: MillisDurationU32,
    pub hold_ticks: u8,
    pub strike_policy: StrikePolicy,
    /// PlayLive color.
    pub live_color: Color,
    /// Shown on a Record tick whose note did not fit.
    pub full_color: Color,
    /// Entry acknowledgment for the Record and PlayRecord modes.
    pub ack: Blink,
    /// Rounds of the red/green/blue cycle played after a wipe.
    pub confirm: Blink,
    pub servo_settle: MillisDurationU32,
    pub strike: StrikeProfile,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            tick: TICK,
            hold_ticks: HOLD_TICKS,
            strike_policy: StrikePolicy::OnChange,
            live_color: Color::CYAN,
            full_color: Color::MAGENTA,
            ack: Blink {
                times: 2,
                half_period: MillisDurationU32::millis(100),
            },
            confirm: Blink {
                times: 3,
                half_period: MillisDurationU32::millis(80),
            },
            servo_settle: SERVO_SETTLE,
            strike: StrikeProfile::DEFAULT,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
