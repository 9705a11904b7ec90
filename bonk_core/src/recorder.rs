use heapless::Vec;

use crate::config::RECORDING_CAPACITY;
use crate::note::Pitch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecorderError {
    /// Every slot is taken; the note was dropped.
    Full,
    /// Nothing has been recorded, so there is nothing to replay.
    Empty,
}

/// Fixed-capacity, append-only recording with wrap-around replay.
///
/// The playback cursor lives with the caller. [`Recorder::next`] reads it
/// modulo the current length, so a cursor that kept counting across a
/// [`Recorder::clear`] or a late append still lands on a stored note.
#[derive(Debug, Clone, Default)]
pub struct Recorder<const N: usize = RECORDING_CAPACITY> {
    notes: Vec<Pitch, N>,
}

impl<const N: usize> Recorder<N> {
    pub const fn new() -> Self {
        Self { notes: Vec::new() }
    }

    pub fn append(&mut self, pitch: Pitch) -> Result<(), RecorderError> {
        self.notes.push(pitch).map_err(|_| RecorderError::Full)
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Returns the note under `cursor` and the cursor for the following tick.
    pub fn next(&self, cursor: usize) -> Result<(Pitch, usize), RecorderError> {
        if self.notes.is_empty() {
            return Err(RecorderError::Empty);
        }

        let pitch = self.notes[cursor % self.notes.len()];
        Ok((pitch, cursor.wrapping_add(1)))
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.notes.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pitch> {
        self.notes.iter()
    }
}
