#![no_main]
#![no_std]

use core::fmt::Write;

use panic_halt as _;

use cortex_m_rt::entry;
use cortex_m_semihosting::hio;
use stm32f4xx_hal::{i2c::I2c, pac, prelude::*};

use bonk_hardware::range::RangeFinder;

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().expect("Failed to get device periph");
    let cp = cortex_m::peripheral::Peripherals::take().expect("Failed to get core periph");

    let mut stdout = hio::hstdout().map_err(|_| core::fmt::Error).unwrap();

    let gpiob = dp.GPIOB.split();

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).sysclk(168.MHz()).freeze();

    let mut delay = cp.SYST.delay(&clocks);
    let i2c1 = I2c::new(dp.I2C1, (gpiob.pb6, gpiob.pb9), 100.kHz(), &clocks);

    let mut range_finder = RangeFinder::new(i2c1);
    if !range_finder.is_present() {
        writeln!(stdout, "No VL53L0X on I2C1").unwrap();
    }

    loop {
        let reading = range_finder.measure();
        writeln!(
            stdout,
            "{:?} {} mm -> {:?}",
            reading.status,
            reading.distance_mm,
            reading.note()
        )
        .unwrap();
        delay.delay_ms(250_u32);
    }
}
