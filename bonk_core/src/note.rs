use fugit::HertzU32;

/// Number of playable pitches; also the number of distance bands and bars.
pub const PITCH_COUNT: usize = 8;

/// Servo angle the mallet arm parks at when nothing is playing.
pub const REST_DEGREES: u16 = 0;

/// Full servo travel; the bars sit at equal fractions of it.
pub const SERVO_RANGE_DEGREES: u16 = 180;

/// A natural minor, A4 up to A5
const SCALE: [HertzU32; PITCH_COUNT] = [
    HertzU32::from_raw(440),
    HertzU32::from_raw(494),
    HertzU32::from_raw(523),
    HertzU32::from_raw(587),
    HertzU32::from_raw(659),
    HertzU32::from_raw(698),
    HertzU32::from_raw(784),
    HertzU32::from_raw(880),
];

/// One of the eight playable pitches, stored as its bar index `0..8`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pitch(u8);

impl Pitch {
    pub const LOWEST: Pitch = Pitch(0);
    pub const HIGHEST: Pitch = Pitch(PITCH_COUNT as u8 - 1);

    /// Returns `None` when `index` does not name a bar.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < PITCH_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn frequency(self) -> HertzU32 {
        SCALE[self.0 as usize]
    }

    /// Horizontal arm angle over this pitch's bar.
    ///
    /// The bars divide the servo travel into eighths with the rest position
    /// below the first one, so the lowest bar sits at 1/8 of the range and
    /// the highest at the far end.
    pub const fn servo_degrees(self) -> u16 {
        (self.0 as u16 + 1) * SERVO_RANGE_DEGREES / PITCH_COUNT as u16
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Pitch> {
        (0..PITCH_COUNT as u8).map(Pitch)
    }
}

/// Outcome of turning one measurement into music.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Note {
    Pitch(Pitch),
    /// Nothing in any band.
    Rest,
    /// The sensor could not produce a trustworthy measurement.
    Fault,
}

impl Note {
    /// The playable pitch, if any. `Rest` and `Fault` both read as silence.
    pub const fn pitch(self) -> Option<Pitch> {
        match self {
            Note::Pitch(p) => Some(p),
            Note::Rest | Note::Fault => None,
        }
    }

    pub const fn frequency(self) -> Option<HertzU32> {
        match self.pitch() {
            Some(p) => Some(p.frequency()),
            None => None,
        }
    }

    pub const fn servo_degrees(self) -> u16 {
        match self.pitch() {
            Some(p) => p.servo_degrees(),
            None => REST_DEGREES,
        }
    }
}

impl From<Pitch> for Note {
    fn from(pitch: Pitch) -> Self {
        Note::Pitch(pitch)
    }
}
