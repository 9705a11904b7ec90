use stm32f4xx_hal::gpio::{Output, PushPull, PE7, PE8};

use bonk_core::drivers::Striker;

use crate::pwm::ServoPwm;

/// STEP input of the mallet's motor driver, one pulse per step
pub type StepPin = PE7<Output<PushPull>>;
/// DIR input: high lifts the mallet, low drops it
pub type DirPin = PE8<Output<PushPull>>;

pub type ArmStriker = Striker<ServoPwm, StepPin, DirPin>;
