#![no_main]
#![no_std]

use core::fmt::Write;

use panic_halt as _;

use cortex_m_rt::entry;
use cortex_m_semihosting::hio;
use stm32f4xx_hal::{
    i2c::{Error, I2c, NoAcknowledgeSource},
    pac,
    prelude::*,
};

use bonk_hardware::range::SENSOR_ADDR;

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().expect("Failed to get device periph");
    let cp = cortex_m::peripheral::Peripherals::take().expect("Failed to get core periph");

    let mut stdout = hio::hstdout().map_err(|_| core::fmt::Error).unwrap();

    let gpiob = dp.GPIOB.split();
    let scl = gpiob.pb6;
    let sda = gpiob.pb9;

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).sysclk(168.MHz()).freeze();

    let mut delay = cp.SYST.delay(&clocks);
    let mut i2c1 = I2c::new(dp.I2C1, (scl, sda), 100.kHz(), &clocks);
    let mut buf = [0_u8; 1];

    delay.delay_ms(100_u32);

    let mut found = 0;
    // 7 bit addresses, skipping the reserved ranges at both ends
    for addr in 0x08..0x78 {
        match i2c1.read(addr, &mut buf) {
            Ok(_) => {
                let tag = if addr == SENSOR_ADDR { " (VL53L0X)" } else { "" };
                writeln!(stdout, "Address found: {:#04x}{}", addr, tag).unwrap();
                found += 1;
            }
            Err(e) if e == Error::NoAcknowledge(NoAcknowledgeSource::Address) => (),
            Err(s) => writeln!(stdout, "Some other error: {:?}", s).unwrap(),
        };
        delay.delay_ms(10_u32);
    }

    if found == 0 {
        writeln!(stdout, "No addresses found :(").unwrap();
    }

    loop {}
}
