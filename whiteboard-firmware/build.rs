//! Build script for whiteboard-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates whiteboard.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate whiteboard.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=whiteboard.toml");

    let config_path = Path::new("whiteboard.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: whiteboard.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds whiteboard.toml as its configuration.       ║\n\
            ║  Please create one in the whiteboard-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read whiteboard.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in whiteboard.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_serial(&config, &mut errors);
    validate_motors(&config, &mut errors);
    validate_pen(&config, &mut errors);
    report("Invalid configuration", &errors);

    println!("cargo:warning=whiteboard.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a boxed list of errors, if there are any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only the sections the firmware understands may appear
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        match name.as_str() {
            "serial" | "pen" | "motor" if value.is_table() => {}
            "serial" | "pen" | "motor" => errors.push(format!("[{}] must be a table", name)),
            _ => errors.push(format!("unknown section [{}]", name)),
        }
    }

    if let Some(motors) = config.get("motor").and_then(|m| m.as_table()) {
        for name in motors.keys() {
            if name != "left" && name != "right" {
                errors.push(format!("unknown motor [motor.{}]", name));
            }
        }
    }
}

/// Check an optional integer key against an inclusive range
fn check_int(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match table.get(key)? {
        toml::Value::Integer(v) if (min..=max).contains(v) => Some(*v),
        toml::Value::Integer(_) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            None
        }
        _ => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

fn check_keys(
    table: &toml::value::Table,
    section: &str,
    known: &[&str],
    errors: &mut Vec<String>,
) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(serial) = config.get("serial").and_then(|s| s.as_table()) else {
        return;
    };

    check_keys(serial, "serial", &["baudrate", "parity", "stop_bits"], errors);
    check_int(serial, "serial", "baudrate", 300, 921_600, errors);
    check_int(serial, "serial", "stop_bits", 1, 2, errors);

    if let Some(parity) = serial.get("parity") {
        match parity.as_str() {
            Some("none" | "even" | "odd") => {}
            _ => errors.push("[serial] parity must be 'none', 'even' or 'odd'".to_string()),
        }
    }
}

fn validate_motors(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(motors) = config.get("motor").and_then(|m| m.as_table()) else {
        return;
    };

    for (name, motor) in motors {
        let section = format!("motor.{}", name);
        let Some(motor) = motor.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        check_keys(
            motor,
            &section,
            &[
                "gain",
                "min_speed",
                "max_speed",
                "tolerance",
                "counts_per_pulse",
                "reversed",
            ],
            errors,
        );
        check_int(motor, &section, "gain", 0, 255, errors);
        let min_speed = check_int(motor, &section, "min_speed", 0, 255, errors);
        let max_speed = check_int(motor, &section, "max_speed", 1, 255, errors);
        check_int(motor, &section, "tolerance", 0, 65_535, errors);
        check_int(motor, &section, "counts_per_pulse", 1, 255, errors);

        if let (Some(min), Some(max)) = (min_speed, max_speed) {
            if min > max {
                errors.push(format!("[{}] min_speed must not exceed max_speed", section));
            }
        }

        if let Some(reversed) = motor.get("reversed") {
            if !reversed.is_bool() {
                errors.push(format!("[{}] reversed must be true or false", section));
            }
        }
    }
}

fn validate_pen(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(pen) = config.get("pen").and_then(|p| p.as_table()) else {
        return;
    };

    check_keys(pen, "pen", &["up_us", "down_us", "period_us"], errors);
    let up = check_int(pen, "pen", "up_us", 0, 65_535, errors);
    let down = check_int(pen, "pen", "down_us", 0, 65_535, errors);
    let period = check_int(pen, "pen", "period_us", 1, 65_535, errors).unwrap_or(20_000);

    for (key, width) in [("up_us", up), ("down_us", down)] {
        if width.is_some_and(|w| w > period) {
            errors.push(format!("[pen] {} must fit in period_us", key));
        }
    }
}
