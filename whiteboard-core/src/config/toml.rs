//! Minimal TOML parser for machine configuration
//!
//! Handles only the subset `whiteboard.toml` uses. It does NOT support the
//! full TOML spec and never allocates.
//!
//! Supported:
//! - `key = value` pairs (integer, boolean, bare or quoted word)
//! - `[section]`, `[section name]` and `[section.name]` headers
//! - Comments (`# ...`), including after a value
//!
//! Anything else is an error rather than being skipped, so a typo in the
//! file does not silently fall back to a default.

use whiteboard_hal::{Parity, StopBits};

use super::types::{ConfigError, MachineConfig, MotorConfig, PenConfig};
use crate::traits::Axis;

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Serial,
    Motor(Axis),
    Pen,
}

/// Parse TOML configuration into a validated `MachineConfig`
///
/// Keys that do not appear keep their default value.
pub fn parse_config(input: &str) -> Result<MachineConfig, ConfigError> {
    let mut config = MachineConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(ConfigError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::MalformedLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a section header like "serial", "motor left" or "motor.left"
fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    let header = header.trim();
    let mut parts = header.split(|c: char| c == '.' || c.is_whitespace());
    let section_type = parts.next().ok_or(ConfigError::InvalidSection)?;
    let name = parts.find(|part| !part.is_empty());

    let section = match (section_type, name) {
        ("serial", None) => Section::Serial,
        ("pen", None) => Section::Pen,
        ("motor", Some("left")) => Section::Motor(Axis::Left),
        ("motor", Some("right")) => Section::Motor(Axis::Right),
        _ => return Err(ConfigError::InvalidSection),
    };

    if parts.any(|part| !part.is_empty()) {
        return Err(ConfigError::InvalidSection);
    }
    Ok(section)
}

/// Drop a trailing comment, ignoring `#` inside a quoted string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (pos, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..pos],
            _ => {}
        }
    }
    line
}

/// Split a "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Remove surrounding quotes, if any
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse a TOML integer
///
/// Decimal with an optional sign, or unsigned `0x`/`0o`/`0b`. Either form may
/// use `_` between digits.
fn parse_int<T: TryFrom<i64>>(value: &str) -> Result<T, ConfigError> {
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") => (16, &unsigned[2..]),
        Some("0o") => (8, &unsigned[2..]),
        Some("0b") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };
    if radix != 10 && unsigned.len() != value.len() {
        return Err(ConfigError::InvalidValue);
    }

    let magnitude = parse_digits(digits, radix).ok_or(ConfigError::InvalidValue)?;
    let value = if negative { -magnitude } else { magnitude };
    T::try_from(value).map_err(|_| ConfigError::InvalidValue)
}

/// Digits in `radix`, each `_` sitting between two digits
fn parse_digits(digits: &str, radix: u32) -> Option<i64> {
    let mut value: i64 = 0;
    let mut after_digit = false;
    for c in digits.chars() {
        if c == '_' {
            if !after_digit {
                return None;
            }
            after_digit = false;
            continue;
        }
        let digit = c.to_digit(radix)?;
        value = value.checked_mul(radix as i64)?.checked_add(digit as i64)?;
        after_digit = true;
    }
    after_digit.then_some(value)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_parity(value: &str) -> Result<Parity, ConfigError> {
    match parse_string(value) {
        "none" => Ok(Parity::None),
        "even" => Ok(Parity::Even),
        "odd" => Ok(Parity::Odd),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_stop_bits(value: &str) -> Result<StopBits, ConfigError> {
    match parse_int::<u8>(value)? {
        1 => Ok(StopBits::One),
        2 => Ok(StopBits::Two),
        _ => Err(ConfigError::InvalidValue),
    }
}

/// Apply a parsed value to the config
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MachineConfig,
) -> Result<(), ConfigError> {
    match section {
        Section::Serial => match key {
            "baudrate" => config.serial.baudrate = parse_int(value)?,
            "parity" => config.serial.parity = parse_parity(value)?,
            "stop_bits" => config.serial.stop_bits = parse_stop_bits(value)?,
            _ => return Err(ConfigError::UnknownKey),
        },
        Section::Motor(axis) => apply_motor_value(config.motor_mut(axis), key, value)?,
        Section::Pen => apply_pen_value(&mut config.pen, key, value)?,
        Section::Root => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_motor_value(motor: &mut MotorConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "gain" => motor.gain = parse_int(value)?,
        "min_speed" => motor.min_speed = parse_int(value)?,
        "max_speed" => motor.max_speed = parse_int(value)?,
        "tolerance" => motor.tolerance = parse_int(value)?,
        "counts_per_pulse" => motor.counts_per_pulse = parse_int(value)?,
        "reversed" => motor.reversed = parse_bool(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_pen_value(pen: &mut PenConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "up_us" => pen.up_us = parse_int(value)?,
        "down_us" => pen.down_us = parse_int(value)?,
        "period_us" => pen.period_us = parse_int(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}
