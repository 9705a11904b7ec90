//! Drivers that only need `embedded-hal` pins, PWM channels and delays.

pub mod rgb_led;
pub mod servo;
pub mod striker;
pub mod tone;

pub use rgb_led::RgbLed;
pub use servo::{Servo, ServoLimits};
pub use striker::{StrikeError, Striker};
pub use tone::{TimedTone, ToneGenerator};
