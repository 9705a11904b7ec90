/// Upper bounds (exclusive) of the dial bands on a 10-bit sample.
/// Calibrated against the detents of the rotary switch on the prototype.
pub const DIAL_IDLE_BELOW: u16 = 170;
pub const DIAL_RECORD_BELOW: u16 = 511;
pub const DIAL_PLAY_RECORD_BELOW: u16 = 852;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Idle,
    Record,
    PlayLive,
    PlayRecord,
}

impl Mode {
    /// Maps a raw 10-bit dial sample onto its detent.
    pub const fn from_dial(sample: u16) -> Mode {
        if sample < DIAL_IDLE_BELOW {
            Mode::Idle
        } else if sample < DIAL_RECORD_BELOW {
            Mode::Record
        } else if sample < DIAL_PLAY_RECORD_BELOW {
            Mode::PlayRecord
        } else {
            Mode::PlayLive
        }
    }
}
