//! Board-independent half of the bonk firmware.
//!
//! Everything here is `no_std` and talks to the outside world only through the
//! leaf traits in [`io`], so the whole state machine runs on the host under
//! `cargo test`.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod drivers;
pub mod io;
pub mod machine;
pub mod mode;
pub mod note;
pub mod quantizer;
pub mod recorder;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use io::{Board, Color};
pub use machine::Machine;
pub use mode::Mode;
pub use note::{Note, Pitch};
pub use quantizer::{quantize, RangeStatus, SensorReading};
pub use recorder::{Recorder, RecorderError};
