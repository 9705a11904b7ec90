use embedded_hal::delay::DelayNs;
use fugit::{HertzU32, MillisDurationU32};

use crate::note::Note;

/// Something that can sound a square wave until told to stop.
pub trait ToneGenerator {
    fn start(&mut self, frequency: HertzU32);
    fn stop(&mut self);
}

/// A tone generator sharing the board's only blocking delay.
///
/// Every wait run through this delay also runs down the current tone, which
/// is cut off mid-wait once its length is used up. Strikes and ticks both
/// block on it, so no tone outlives its length however long the caller
/// blocks after starting it.
pub struct TimedTone<G, D> {
    generator: G,
    delay: D,
    remaining_ns: Option<u64>,
}

impl<G: ToneGenerator, D: DelayNs> TimedTone<G, D> {
    /// Starts silent.
    pub fn new(mut generator: G, delay: D) -> Self {
        generator.stop();
        Self {
            generator,
            delay,
            remaining_ns: None,
        }
    }

    /// Sounds the note for `length`; `Rest` and `Fault` silence at once.
    pub fn play(&mut self, note: Note, length: MillisDurationU32) {
        match note.frequency() {
            Some(frequency) if length.to_millis() > 0 => {
                self.generator.start(frequency);
                self.remaining_ns = Some(u64::from(length.to_millis()) * 1_000_000);
            }
            _ => self.silence(),
        }
    }

    pub fn silence(&mut self) {
        self.generator.stop();
        self.remaining_ns = None;
    }

    pub fn is_sounding(&self) -> bool {
        self.remaining_ns.is_some()
    }

    pub fn release(self) -> (G, D) {
        (self.generator, self.delay)
    }

    fn wait(&mut self, mut ns: u64) {
        if let Some(remaining) = self.remaining_ns {
            if ns >= remaining {
                self.sleep(remaining);
                self.silence();
                ns -= remaining;
            } else {
                self.remaining_ns = Some(remaining - ns);
            }
        }
        self.sleep(ns);
    }

    fn sleep(&mut self, ns: u64) {
        let mut us = ns / 1000;
        while us > 0 {
            let chunk = us.min(u64::from(u32::MAX)) as u32;
            self.delay.delay_us(chunk);
            us -= u64::from(chunk);
        }
        let rest = (ns % 1000) as u32;
        if rest > 0 {
            self.delay.delay_ns(rest);
        }
    }
}

impl<G: ToneGenerator, D: DelayNs> DelayNs for TimedTone<G, D> {
    fn delay_ns(&mut self, ns: u32) {
        self.wait(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait(u64::from(us) * 1000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait(u64::from(ms) * 1_000_000);
    }
}
