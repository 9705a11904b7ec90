use crate::note::{Note, Pitch, PITCH_COUNT};

/// Readings at or below this distance are too close to be a note.
pub const BAND_FLOOR_MM: u16 = 50;
pub const BAND_WIDTH_MM: u16 = 50;
/// Readings above this distance are past the last band.
pub const BAND_CEILING_MM: u16 = BAND_FLOOR_MM + BAND_WIDTH_MM * PITCH_COUNT as u16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeStatus {
    Valid,
    /// The sensor saw nothing within its range. Not a fault.
    OutOfRange,
    /// Bad phase/signal, bus error or timeout. The distance is garbage.
    Fault,
}

/// One blocking measurement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    pub status: RangeStatus,
    pub distance_mm: u16,
}

impl SensorReading {
    pub const fn valid(distance_mm: u16) -> Self {
        Self {
            status: RangeStatus::Valid,
            distance_mm,
        }
    }

    pub const fn out_of_range() -> Self {
        Self {
            status: RangeStatus::OutOfRange,
            distance_mm: u16::MAX,
        }
    }

    pub const fn fault() -> Self {
        Self {
            status: RangeStatus::Fault,
            distance_mm: 0,
        }
    }

    pub fn note(self) -> Note {
        quantize(self.distance_mm, self.status)
    }
}

/// Buckets a distance into one of the note bands.
///
/// Band `i` covers `(50 + 50i, 100 + 50i]` mm: the lower edge belongs to the
/// band below, the upper edge to this band.
pub fn quantize(distance_mm: u16, status: RangeStatus) -> Note {
    match status {
        RangeStatus::Fault => return Note::Fault,
        RangeStatus::OutOfRange => return Note::Rest,
        RangeStatus::Valid => {}
    }

    if distance_mm <= BAND_FLOOR_MM || distance_mm > BAND_CEILING_MM {
        return Note::Rest;
    }

    let band = (distance_mm - BAND_FLOOR_MM - 1) / BAND_WIDTH_MM;
    match Pitch::new(band as u8) {
        Some(pitch) => Note::Pitch(pitch),
        None => Note::Rest,
    }
}
