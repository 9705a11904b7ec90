use stm32f4xx_hal::gpio::{Output, PushPull, PD12, PD13, PD14, PD15};

use bonk_core::drivers::RgbLed;

pub type GreenLed = PD12<Output<PushPull>>;
pub type OrangeLed = PD13<Output<PushPull>>;
pub type RedLed = PD14<Output<PushPull>>;
pub type BlueLed = PD15<Output<PushPull>>;

/// The Discovery board's red, green and blue user LEDs lit together as the
/// mode indicator. Orange is left over for the heartbeat.
pub type StatusLed = RgbLed<RedLed, GreenLed, BlueLed>;
