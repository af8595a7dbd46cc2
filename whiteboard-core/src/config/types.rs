//! Configuration type definitions

use whiteboard_hal::UartConfig;

use crate::traits::Axis;

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Value could not be parsed for its key
    InvalidValue,
    /// Line is neither a header, a comment nor `key = value`
    MalformedLine,
    /// Values parse but are inconsistent (e.g. `min_speed > max_speed`)
    OutOfRange,
}

/// Closed-loop tuning for one motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorConfig {
    /// Drive level added per encoder count of position error
    pub gain: u8,
    /// Smallest drive level that still turns the motor
    pub min_speed: u8,
    /// Drive level ceiling
    pub max_speed: u8,
    /// Position error (encoder counts) treated as on target
    pub tolerance: u16,
    /// Encoder counts per pulse of a move argument
    pub counts_per_pulse: u8,
    /// Swap the forward and reverse outputs
    pub reversed: bool,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            gain: 4,
            min_speed: 60,
            max_speed: 255,
            tolerance: 1,
            counts_per_pulse: 2,
            reversed: false,
        }
    }
}

impl MotorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_speed > self.max_speed || self.max_speed == 0 || self.counts_per_pulse == 0 {
            return Err(ConfigError::OutOfRange);
        }
        Ok(())
    }
}

/// Pen servo timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PenConfig {
    /// Pulse width with the pen lifted, in microseconds
    pub up_us: u16,
    /// Pulse width with the pen on the board, in microseconds
    pub down_us: u16,
    /// Servo frame period, in microseconds
    pub period_us: u16,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            up_us: 2000,
            down_us: 1000,
            period_us: 20_000,
        }
    }
}

impl PenConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.period_us == 0 || self.up_us > self.period_us || self.down_us > self.period_us {
            return Err(ConfigError::OutOfRange);
        }
        Ok(())
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MachineConfig {
    /// Command link settings
    pub serial: UartConfig,
    /// Per-axis motor tuning, indexed by [`Axis::index`]
    pub motors: [MotorConfig; 2],
    pub pen: PenConfig,
}

impl MachineConfig {
    pub fn motor(&self, axis: Axis) -> &MotorConfig {
        &self.motors[axis.index()]
    }

    pub fn motor_mut(&mut self, axis: Axis) -> &mut MotorConfig {
        &mut self.motors[axis.index()]
    }

    /// Check cross-field consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.baudrate == 0 {
            return Err(ConfigError::OutOfRange);
        }
        for motor in &self.motors {
            motor.validate()?;
        }
        self.pen.validate()
    }
}
