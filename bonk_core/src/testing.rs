//! Host-side stand-ins for pins, PWM channels, delays and a whole board.

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::{delay::DelayNs, digital, pwm};
use fugit::{HertzU32, MillisDurationU32};

use crate::drivers::ToneGenerator;
use crate::io::{
    ActuatorOutput, Color, IndicatorOutput, ModeSelector, RangeSensor, ResetInput, ToneOutput,
};
use crate::mode::Mode;
use crate::note::Note;
use crate::quantizer::SensorReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError;

impl digital::Error for FakeError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl pwm::Error for FakeError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

#[derive(Debug, Default)]
pub struct FakePin {
    high: bool,
    broken: bool,
    writes: Vec<bool>,
}

impl FakePin {
    pub fn low() -> Self {
        Self::default()
    }

    pub fn high() -> Self {
        Self {
            high: true,
            ..Self::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Every level written, in order.
    pub fn writes(&self) -> &[bool] {
        &self.writes
    }

    pub fn rising_edges(&self) -> u32 {
        let mut previous = false;
        let mut edges = 0;
        for &level in &self.writes {
            if level && !previous {
                edges += 1;
            }
            previous = level;
        }
        edges
    }

    fn write(&mut self, level: bool) -> Result<(), FakeError> {
        if self.broken {
            return Err(FakeError);
        }
        self.high = level;
        self.writes.push(level);
        Ok(())
    }
}

impl digital::ErrorType for FakePin {
    type Error = FakeError;
}

impl digital::OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

#[derive(Debug)]
pub struct FakePwm {
    max: u16,
    duty: u16,
}

impl FakePwm {
    pub fn new(max: u16) -> Self {
        Self { max, duty: 0 }
    }

    pub fn duty(&self) -> u16 {
        self.duty
    }
}

impl pwm::ErrorType for FakePwm {
    type Error = FakeError;
}

impl pwm::SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

/// Records every requested wait in microseconds instead of sleeping.
#[derive(Debug, Default)]
pub struct FakeDelay {
    waits_us: Vec<u32>,
}

impl FakeDelay {
    pub fn waits_us(&self) -> &[u32] {
        &self.waits_us
    }

    pub fn total_us(&self) -> u64 {
        self.waits_us.iter().map(|&us| u64::from(us)).sum()
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_us.push(ns / 1000);
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_us.push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_us.push(ms * 1000);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    Start(u32),
    Stop,
}

#[derive(Debug, Default)]
pub struct FakeTone {
    events: Vec<ToneEvent>,
}

impl FakeTone {
    pub fn events(&self) -> &[ToneEvent] {
        &self.events
    }
}

impl ToneGenerator for FakeTone {
    fn start(&mut self, frequency: HertzU32) {
        self.events.push(ToneEvent::Start(frequency.raw()));
    }

    fn stop(&mut self) {
        self.events.push(ToneEvent::Stop);
    }
}

/// What a [`FakeBoard`] was asked to do, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Measure,
    Play(Note),
    Strike(Note),
    Color(Color),
    Wait(u32),
}

/// A board whose inputs are set by the test and whose outputs are logged.
#[derive(Debug, Default)]
pub struct FakeBoard {
    pub mode: Mode,
    pub reset: bool,
    /// Served one per measurement; once drained every measurement is `Rest`.
    pub readings: VecDeque<SensorReading>,
    pub events: Vec<Event>,
    /// Length asked of every `play`, in order.
    pub tone_lengths: Vec<MillisDurationU32>,
}

impl FakeBoard {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn queue_mm(&mut self, distances: &[u16]) {
        self.readings
            .extend(distances.iter().map(|&d| SensorReading::valid(d)));
    }

    /// Drops the log, returning it.
    pub fn take_events(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }

    pub fn colors(&self) -> Vec<Color> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Color(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn strikes(&self) -> Vec<Note> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Strike(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    pub fn played(&self) -> Vec<Note> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Play(n) => Some(*n),
                _ => None,
            })
            .collect()
    }
}

impl RangeSensor for FakeBoard {
    fn measure(&mut self) -> SensorReading {
        self.events.push(Event::Measure);
        self.readings
            .pop_front()
            .unwrap_or_else(SensorReading::out_of_range)
    }
}

impl ToneOutput for FakeBoard {
    fn play(&mut self, note: Note, length: MillisDurationU32) {
        self.events.push(Event::Play(note));
        self.tone_lengths.push(length);
    }
}

impl ActuatorOutput for FakeBoard {
    fn strike(&mut self, note: Note) {
        self.events.push(Event::Strike(note));
    }
}

impl IndicatorOutput for FakeBoard {
    fn set_color(&mut self, color: Color) {
        self.events.push(Event::Color(color));
    }
}

impl ModeSelector for FakeBoard {
    fn read_mode(&mut self) -> Mode {
        self.mode
    }
}

impl ResetInput for FakeBoard {
    fn is_pressed(&mut self) -> bool {
        self.reset
    }
}

impl DelayNs for FakeBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.events.push(Event::Wait(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(Event::Wait(ms));
    }
}
