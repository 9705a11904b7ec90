use log::{debug, info, warn};

use crate::config::{Blink, Config, StrikePolicy};
use crate::io::{Board, Color};
use crate::mode::Mode;
use crate::note::Note;
use crate::recorder::Recorder;

const CONFIRM_CYCLE: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

/// The whole firmware state: current mode, recording, playback cursor, the
/// note the arm last struck and the reset hold counter.
///
/// Only [`Machine::tick`] mutates it, and only from the one control loop.
pub struct Machine {
    config: Config,
    mode: Mode,
    recorder: Recorder,
    cursor: usize,
    /// `None` when the arm position is unknown and the next note must strike.
    last_note: Option<Note>,
    held_ticks: u8,
}

impl Machine {
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            mode: Mode::Idle,
            recorder: Recorder::new(),
            cursor: 0,
            last_note: None,
            held_ticks: 0,
        }
    }

    /// Puts the board into the boot state, Idle. Call once before ticking.
    pub fn start<B: Board>(&mut self, board: &mut B) {
        info!("starting in {:?}", Mode::Idle);
        self.enter(Mode::Idle, board);
    }

    /// One loop iteration: follow the dial (or the held reset button), then
    /// run the current mode's work. Blocks for at least one tick period.
    pub fn tick<B: Board>(&mut self, board: &mut B) {
        let reset_held = board.is_pressed();
        let target = if reset_held {
            Mode::Idle
        } else {
            board.read_mode()
        };

        if target != self.mode {
            self.enter(target, board);
        }

        self.track_reset(reset_held, board);

        match self.mode {
            Mode::Idle => self.idle(board),
            Mode::Record => self.record(board),
            Mode::PlayLive => self.play_live(board),
            Mode::PlayRecord => self.play_record(board),
        }

        board.delay_ms(self.config.tick.to_millis());
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn held_ticks(&self) -> u8 {
        self.held_ticks
    }

    pub fn color_of(&self, mode: Mode) -> Color {
        match mode {
            Mode::Idle => Color::BLUE,
            Mode::Record => Color::RED,
            Mode::PlayLive => self.config.live_color,
            Mode::PlayRecord => Color::GREEN,
        }
    }

    fn enter<B: Board>(&mut self, mode: Mode, board: &mut B) {
        info!("mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        let color = self.color_of(mode);

        match mode {
            Mode::Idle => {
                board.set_color(color);
                board.play(Note::Rest, self.config.tick);
                board.strike(Note::Rest);
                self.last_note = Some(Note::Rest);
            }
            Mode::Record => {
                // The previous mode's tone must not sound over the blink
                board.play(Note::Rest, self.config.tick);
                blink(board, color, self.config.ack);
            }
            Mode::PlayLive => {
                board.set_color(color);
                self.last_note = None;
            }
            Mode::PlayRecord => {
                board.play(Note::Rest, self.config.tick);
                blink(board, color, self.config.ack);
                self.cursor = 0;
                self.last_note = None;
                info!("replaying {} notes", self.recorder.len());
                for (i, pitch) in self.recorder.iter().enumerate() {
                    debug!("  {}: {:?}", i, pitch);
                }
            }
        }
    }

    fn track_reset<B: Board>(&mut self, held: bool, board: &mut B) {
        if !held {
            self.held_ticks = 0;
            return;
        }

        self.held_ticks = self.held_ticks.saturating_add(1);
        if self.held_ticks < self.config.hold_ticks {
            debug!("reset held {}/{}", self.held_ticks, self.config.hold_ticks);
            return;
        }

        info!("clearing {} recorded notes", self.recorder.len());
        self.recorder.clear();
        self.held_ticks = 0;

        for _ in 0..self.config.confirm.times {
            for color in CONFIRM_CYCLE {
                board.set_color(color);
                board.delay_ms(self.config.confirm.half_period.to_millis());
            }
        }
        board.set_color(self.color_of(self.mode));
    }

    fn idle<B: Board>(&mut self, board: &mut B) {
        board.set_color(self.color_of(Mode::Idle));
    }

    fn record<B: Board>(&mut self, board: &mut B) {
        let note = sense(board);
        board.play(note, self.config.tick);

        let Some(pitch) = note.pitch() else {
            return;
        };

        match self.recorder.append(pitch) {
            Ok(()) => {
                debug!("recorded {:?} ({})", pitch, self.recorder.len());
                board.set_color(self.color_of(Mode::Record));
            }
            Err(err) => {
                warn!("{:?}: dropped {:?}", err, pitch);
                board.set_color(self.config.full_color);
            }
        }
    }

    fn play_live<B: Board>(&mut self, board: &mut B) {
        let note = sense(board);
        board.play(note, self.config.tick);
        self.strike(note, board);
    }

    fn play_record<B: Board>(&mut self, board: &mut B) {
        match self.recorder.next(self.cursor) {
            Ok((pitch, cursor)) => {
                self.cursor = cursor;
                let note = Note::Pitch(pitch);
                debug!("replay {:?}", note);
                board.play(note, self.config.tick);
                self.strike(note, board);
            }
            Err(_) => board.play(Note::Rest, self.config.tick),
        }
    }

    fn strike<B: Board>(&mut self, note: Note, board: &mut B) {
        // Rest and Fault both park the arm, so they count as the same position
        let changed = self.last_note.map(Note::pitch) != Some(note.pitch());
        if changed || self.config.strike_policy == StrikePolicy::EveryTick {
            board.strike(note);
        }
        self.last_note = Some(note);
    }
}

fn sense<B: Board>(board: &mut B) -> Note {
    let reading = board.measure();
    let note = reading.note();
    debug!("{:?} -> {:?}", reading, note);
    note
}

/// Blinks `color` and leaves it lit.
fn blink<B: Board>(board: &mut B, color: Color, pattern: Blink) {
    let half_period = pattern.half_period.to_millis();
    for _ in 0..pattern.times {
        board.set_color(color);
        board.delay_ms(half_period);
        board.set_color(Color::OFF);
        board.delay_ms(half_period);
    }
    board.set_color(color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HOLD_TICKS;
    use crate::note::Pitch;
    use crate::quantizer::SensorReading;
    use crate::testing::{Event, FakeBoard};

    fn pitch(i: u8) -> Note {
        Note::Pitch(Pitch::new(i).unwrap())
    }

    /// A machine already running in `mode`, with the board log cleared.
    fn running(mode: Mode, config: Config) -> (Machine, FakeBoard) {
        let mut machine = Machine::new(config);
        let mut board = FakeBoard::new(mode);
        machine.start(&mut board);
        if mode != Mode::Idle {
            machine.tick(&mut board);
        }
        board.take_events();
        (machine, board)
    }

    fn entries(events: &[Event], color: Color) -> usize {
        events
            .iter()
            .filter(|e| **e == Event::Color(color))
            .count()
    }

    #[test]
    fn boots_into_idle_with_everything_parked() {
        let mut machine = Machine::new(Config::default());
        let mut board = FakeBoard::new(Mode::Idle);
        machine.start(&mut board);

        assert_eq!(machine.mode(), Mode::Idle);
        assert_eq!(
            board.events,
            [
                Event::Color(Color::BLUE),
                Event::Play(Note::Rest),
                Event::Strike(Note::Rest)
            ]
        );
    }

    #[test]
    fn idle_tick_reasserts_blue_and_waits() {
        let (mut machine, mut board) = running(Mode::Idle, Config::default());
        machine.tick(&mut board);
        assert_eq!(
            board.events,
            [Event::Color(Color::BLUE), Event::Wait(500)]
        );
    }

    #[test]
    fn entry_color_is_set_before_the_first_tick_action() {
        for (mode, color) in [
            (Mode::Record, Color::RED),
            (Mode::PlayLive, Color::CYAN),
            (Mode::PlayRecord, Color::GREEN),
        ] {
            let (mut machine, mut board) = running(Mode::Idle, Config::default());
            board.mode = mode;
            machine.tick(&mut board);

            assert_eq!(machine.mode(), mode);
            // The tick's own tone comes after any entry silence
            let tick_tone = board
                .events
                .iter()
                .rposition(|e| matches!(e, Event::Play(_)))
                .unwrap();
            let last_color = board.events[..tick_tone]
                .iter()
                .rev()
                .find_map(|e| match e {
                    Event::Color(c) => Some(*c),
                    _ => None,
                });
            assert_eq!(last_color, Some(color), "{mode:?}");
        }
    }

    #[test]
    fn entry_action_runs_once_per_transition() {
        let (mut machine, mut board) = running(Mode::Idle, Config::default());
        board.mode = Mode::PlayLive;
        machine.tick(&mut board);
        machine.tick(&mut board);
        machine.tick(&mut board);

        // Entry lights cyan once; PlayLive ticks never touch the LED.
        assert_eq!(entries(&board.events, Color::CYAN), 1);
    }

    #[test]
    fn record_and_play_record_entries_blink() {
        let (mut machine, mut board) = running(Mode::Idle, Config::default());
        board.mode = Mode::Record;
        machine.tick(&mut board);

        let ack = Config::default().ack;
        assert_eq!(
            board.events[..5],
            [
                Event::Play(Note::Rest),
                Event::Color(Color::RED),
                Event::Wait(ack.half_period.to_millis()),
                Event::Color(Color::OFF),
                Event::Wait(ack.half_period.to_millis()),
            ]
        );
        assert_eq!(
            board.colors().iter().filter(|c| **c == Color::OFF).count(),
            usize::from(ack.times)
        );
    }

    #[test]
    fn record_plays_and_stores_pitches_without_striking() {
        let (mut machine, mut board) = running(Mode::Record, Config::default());
        board.queue_mm(&[75, 225, 600, 125]);
        for _ in 0..4 {
            machine.tick(&mut board);
        }

        assert_eq!(board.played(), [pitch(0), pitch(3), Note::Rest, pitch(1)]);
        assert!(board.strikes().is_empty());
        let stored: Vec<u8> = machine.recorder().iter().map(|p| p.index()).collect();
        assert_eq!(stored, [0, 3, 1]);
    }

    #[test]
    fn sensor_fault_is_silence_and_not_recorded() {
        let (mut machine, mut board) = running(Mode::Record, Config::default());
        board.readings.push_back(SensorReading::fault());
        machine.tick(&mut board);

        assert_eq!(board.played(), [Note::Fault]);
        assert!(machine.recorder().is_empty());
    }

    #[test]
    fn full_recording_shows_the_error_color_and_keeps_length() {
        let config = Config::default();
        let (mut machine, mut board) = running(Mode::Record, config);
        let capacity = machine.recorder().capacity();
        board.queue_mm(&vec![225; capacity + 1]);
        for _ in 0..capacity {
            machine.tick(&mut board);
        }
        assert!(!board.colors().contains(&config.full_color));

        board.take_events();
        machine.tick(&mut board);
        assert_eq!(machine.recorder().len(), capacity);
        assert_eq!(board.colors(), [config.full_color]);
    }

    #[test]
    fn play_live_strikes_only_on_change_by_default() {
        let (mut machine, mut board) = running(Mode::PlayLive, Config::default());
        board.queue_mm(&[225, 225, 230, 75, 700, 710]);
        for _ in 0..6 {
            machine.tick(&mut board);
        }

        assert_eq!(board.played().len(), 6);
        assert_eq!(board.strikes(), [pitch(3), pitch(0), Note::Rest]);
    }

    #[test]
    fn rest_and_fault_share_the_parked_position() {
        let (mut machine, mut board) = running(Mode::PlayLive, Config::default());
        board.queue_mm(&[225, 700]);
        board.readings.push_back(SensorReading::fault());
        board.queue_mm(&[710]);
        board.readings.push_back(SensorReading::fault());
        for _ in 0..5 {
            machine.tick(&mut board);
        }

        assert_eq!(
            board.played(),
            [pitch(3), Note::Rest, Note::Fault, Note::Rest, Note::Fault]
        );
        assert_eq!(board.strikes(), [pitch(3), Note::Rest]);
    }

    #[test]
    fn every_tone_lasts_one_tick() {
        let config = Config::default();
        let (mut machine, mut board) = running(Mode::PlayLive, config);
        board.queue_mm(&[225, 75]);
        machine.tick(&mut board);
        machine.tick(&mut board);
        board.mode = Mode::Record;
        machine.tick(&mut board);

        assert!(!board.tone_lengths.is_empty());
        assert!(board.tone_lengths.iter().all(|l| *l == config.tick));
    }

    #[test]
    fn entry_blinks_start_from_silence() {
        for mode in [Mode::Record, Mode::PlayRecord] {
            let (mut machine, mut board) = running(Mode::PlayLive, Config::default());
            board.queue_mm(&[225]);
            machine.tick(&mut board);
            assert_eq!(board.played(), [pitch(3)]);

            board.take_events();
            board.mode = mode;
            machine.tick(&mut board);

            // Nothing may sound while the entry color blinks
            let first_color = board
                .events
                .iter()
                .position(|e| matches!(e, Event::Color(_)))
                .unwrap();
            assert_eq!(board.events[..first_color], [Event::Play(Note::Rest)], "{mode:?}");
        }
    }

    #[test]
    fn play_live_can_strike_every_tick() {
        let config = Config {
            strike_policy: StrikePolicy::EveryTick,
            ..Config::default()
        };
        let (mut machine, mut board) = running(Mode::PlayLive, config);
        board.queue_mm(&[225, 225, 225]);
        for _ in 0..3 {
            machine.tick(&mut board);
        }

        assert_eq!(board.strikes(), [pitch(3); 3]);
    }

    #[test]
    fn play_live_first_note_always_strikes() {
        let (mut machine, mut board) = running(Mode::Idle, Config::default());
        board.mode = Mode::PlayLive;
        board.queue_mm(&[600]);
        machine.tick(&mut board);

        // Idle already parked the arm, but entering PlayLive forgets that.
        assert_eq!(board.strikes(), [Note::Rest]);
    }

    #[test]
    fn play_record_on_empty_recording_is_silent() {
        let (mut machine, mut board) = running(Mode::PlayRecord, Config::default());
        machine.tick(&mut board);

        assert_eq!(board.played(), [Note::Rest]);
        assert!(board.strikes().is_empty());
        assert!(!board.events.contains(&Event::Measure));
        assert_eq!(machine.cursor(), 0);
    }

    #[test]
    fn play_record_loops_the_recording_from_the_start() {
        let (mut machine, mut board) = running(Mode::Record, Config::default());
        board.queue_mm(&[75, 125, 175]);
        for _ in 0..3 {
            machine.tick(&mut board);
        }

        board.mode = Mode::PlayRecord;
        for _ in 0..7 {
            machine.tick(&mut board);
        }
        assert_eq!(machine.cursor(), 7);

        board.take_events();
        board.mode = Mode::PlayRecord;
        for _ in 0..3 {
            machine.tick(&mut board);
        }
        assert_eq!(board.played(), [pitch(1), pitch(2), pitch(0)]);
    }

    #[test]
    fn play_record_cursor_restarts_on_every_entry() {
        let (mut machine, mut board) = running(Mode::Record, Config::default());
        board.queue_mm(&[75, 125, 175]);
        for _ in 0..3 {
            machine.tick(&mut board);
        }

        board.mode = Mode::PlayRecord;
        machine.tick(&mut board);
        machine.tick(&mut board);
        board.mode = Mode::PlayLive;
        machine.tick(&mut board);

        board.take_events();
        board.mode = Mode::PlayRecord;
        machine.tick(&mut board);
        assert_eq!(board.played(), [Note::Rest, pitch(0)]);
        assert_eq!(machine.cursor(), 1);
    }

    #[test]
    fn play_record_strikes_repeated_notes_once() {
        let (mut machine, mut board) = running(Mode::Record, Config::default());
        board.queue_mm(&[225, 225, 75]);
        for _ in 0..3 {
            machine.tick(&mut board);
        }

        board.take_events();
        board.mode = Mode::PlayRecord;
        for _ in 0..3 {
            machine.tick(&mut board);
        }
        assert_eq!(board.played(), [Note::Rest, pitch(3), pitch(3), pitch(0)]);
        assert_eq!(board.strikes(), [pitch(3), pitch(0)]);
    }

    #[test]
    fn reset_forces_idle_while_held_and_returns_on_release() {
        let (mut machine, mut board) = running(Mode::PlayLive, Config::default());
        board.reset = true;
        machine.tick(&mut board);
        machine.tick(&mut board);
        assert_eq!(machine.mode(), Mode::Idle);
        assert!(!board.events.contains(&Event::Measure));

        board.reset = false;
        machine.tick(&mut board);
        assert_eq!(machine.mode(), Mode::PlayLive);
        assert_eq!(machine.held_ticks(), 0);
    }

    #[test]
    fn short_reset_keeps_the_recording() {
        let (mut machine, mut board) = running(Mode::Record, Config::default());
        board.queue_mm(&[75, 125]);
        machine.tick(&mut board);
        machine.tick(&mut board);

        board.reset = true;
        for _ in 0..HOLD_TICKS - 1 {
            machine.tick(&mut board);
        }
        assert_eq!(machine.held_ticks(), HOLD_TICKS - 1);
        board.reset = false;
        machine.tick(&mut board);

        assert_eq!(machine.held_ticks(), 0);
        assert_eq!(machine.recorder().len(), 2);
    }

    #[test]
    fn reset_at_threshold_clears_once_and_confirms() {
        let config = Config::default();
        let (mut machine, mut board) = running(Mode::Record, config);
        board.queue_mm(&[75, 125, 175]);
        for _ in 0..3 {
            machine.tick(&mut board);
        }

        board.take_events();
        board.reset = true;
        for _ in 0..HOLD_TICKS {
            machine.tick(&mut board);
        }

        assert!(machine.recorder().is_empty());
        assert_eq!(machine.held_ticks(), 0);
        let greens = board.colors().iter().filter(|c| **c == Color::GREEN).count();
        assert_eq!(greens, usize::from(config.confirm.times));
        assert_eq!(board.colors().last(), Some(&Color::BLUE));

        // Holding on starts a fresh count.
        machine.tick(&mut board);
        assert_eq!(machine.held_ticks(), 1);
    }

    #[test]
    fn cleared_recording_takes_a_full_capacity_again() {
        let (mut machine, mut board) = running(Mode::Record, Config::default());
        let capacity = machine.recorder().capacity();
        board.queue_mm(&vec![75; capacity]);
        for _ in 0..capacity {
            machine.tick(&mut board);
        }
        assert!(machine.recorder().is_full());

        board.reset = true;
        for _ in 0..HOLD_TICKS {
            machine.tick(&mut board);
        }
        board.reset = false;

        board.queue_mm(&vec![125; capacity]);
        board.take_events();
        for _ in 0..=capacity {
            machine.tick(&mut board);
        }
        assert_eq!(machine.recorder().len(), capacity);
        assert!(!board.colors().contains(&Config::default().full_color));
    }

    #[test]
    fn every_tick_waits_one_period() {
        let (mut machine, mut board) = running(Mode::PlayLive, Config::default());
        board.queue_mm(&[225]);
        machine.tick(&mut board);
        assert_eq!(board.events.last(), Some(&Event::Wait(500)));
    }
}
