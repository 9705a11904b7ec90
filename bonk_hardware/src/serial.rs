use stm32f4xx_hal::{pac::USART1, serial::Tx};

/// TX-only debug port on PA9, used by the serial logger.
pub type DebugSerialPort = Tx<USART1>;
