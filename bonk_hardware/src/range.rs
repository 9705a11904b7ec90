//! VL53L0X time-of-flight sensor on I2C1.
use embedded_hal_02::blocking::i2c::{Write, WriteRead};
use vl53l0x::VL53L0x;

use bonk_core::SensorReading;

/// What the sensor reports when nothing returned the pulse.
pub const NO_TARGET_MM: u16 = 8190;

/// Default 7 bit address of a VL53L0X straight out of reset
pub const SENSOR_ADDR: u8 = 0x29;

pub struct RangeFinder<I2C: WriteRead> {
    sensor: Option<VL53L0x<I2C>>,
}

impl<I2C, E> RangeFinder<I2C>
where
    I2C: WriteRead<Error = E> + Write<Error = E>,
{
    /// A sensor that fails to come up is kept as absent, every measurement
    /// is then a fault rather than a panic at boot.
    pub fn new(i2c: I2C) -> Self {
        let sensor = match VL53L0x::new(i2c) {
            Ok(sensor) => Some(sensor),
            Err(_) => {
                log::error!("VL53L0X did not answer at {:#x}", SENSOR_ADDR);
                None
            }
        };
        Self { sensor }
    }

    pub fn is_present(&self) -> bool {
        self.sensor.is_some()
    }

    /// One blocking single-shot measurement.
    pub fn measure(&mut self) -> SensorReading {
        let Some(sensor) = self.sensor.as_mut() else {
            return SensorReading::fault();
        };

        match sensor.read_range_single_millimeters_blocking() {
            Ok(mm) if mm >= NO_TARGET_MM => SensorReading::out_of_range(),
            Ok(mm) => SensorReading::valid(mm),
            Err(_) => {
                log::warn!("range measurement failed");
                SensorReading::fault()
            }
        }
    }
}
