//! Machine configuration loading
//!
//! The configuration is compiled into the image from `whiteboard.toml`
//! (checked by `build.rs`) and parsed at boot.

use defmt::*;

use whiteboard_core::config::{parse_config, MachineConfig};
use whiteboard_core::traits::Axis;

/// Embedded configuration; edit whiteboard.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../whiteboard.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load_config() -> MachineConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            log_config_summary(&config);
            config
        }
        Err(e) => {
            // build.rs validates the file, so this means the two disagree
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using built-in defaults");
            MachineConfig::default()
        }
    }
}

fn log_config_summary(config: &MachineConfig) {
    info!(
        "Serial: {} baud, {:?} parity, {:?} stop bits",
        config.serial.baudrate, config.serial.parity, config.serial.stop_bits
    );
    for axis in Axis::ALL {
        let motor = config.motor(axis);
        info!(
            "Motor {:?}: gain={} speed={}..{} tolerance={} reversed={}",
            axis, motor.gain, motor.min_speed, motor.max_speed, motor.tolerance, motor.reversed
        );
    }
    info!(
        "Pen: up={}us down={}us period={}us",
        config.pen.up_us, config.pen.down_us, config.pen.period_us
    );
}
