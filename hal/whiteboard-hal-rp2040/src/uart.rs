//! UART configuration conversion

use embassy_rp::uart::{Config, DataBits, Parity as RpParity, StopBits as RpStopBits};
use whiteboard_hal::{Parity, StopBits, UartConfig};

/// Build the embassy-rp UART config for a link setting (always 8 data bits)
pub fn uart_config(config: &UartConfig) -> Config {
    let mut rp = Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = DataBits::DataBits8;
    rp.parity = match config.parity {
        Parity::None => RpParity::ParityNone,
        Parity::Even => RpParity::ParityEven,
        Parity::Odd => RpParity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => RpStopBits::STOP1,
        StopBits::Two => RpStopBits::STOP2,
    };
    rp
}
