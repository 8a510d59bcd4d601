//! Build script for beamgate-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates node.toml at compile time

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

/// Validate node.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=node.toml");

    let config_path = Path::new("node.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: node.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a node.toml configuration file.           ║\n\
            ║  Please create one in the beamgate-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read node.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in node.toml                         ║\n\
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
    validate_node(&config, &mut errors);
    validate_beams(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_uplink(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid node.toml configuration                          ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=node.toml validated successfully");
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

/// Validate the [node] section
fn validate_node(config: &toml::Value, errors: &mut Vec<String>) {
    let id = match config.get("node").and_then(|n| n.get("id")) {
        Some(toml::Value::String(id)) => id,
        Some(_) => {
            errors.push("[node] id must be a string".to_string());
            return;
        }
        None => {
            errors.push("Missing [node] id".to_string());
            return;
        }
    };

    let charset_ok = id
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'));
    if id.is_empty() || id.len() > 32 || !charset_ok {
        errors.push("[node] id must be 1-32 chars of A-Z a-z 0-9 _ - .".to_string());
    }
}

/// Parse "gpioN" / "^gpioN" into a pin number
fn parse_pin(s: &str) -> Option<u8> {
    let s = s.strip_prefix('^').unwrap_or(s);
    s.strip_prefix("gpio")?.parse().ok()
}

/// Validate [beam.a] and [beam.b]
fn validate_beams(config: &toml::Value, errors: &mut Vec<String>) {
    let mut pins = Vec::new();

    for name in ["a", "b"] {
        let beam = match config.get("beam").and_then(|b| b.get(name)) {
            Some(toml::Value::Table(t)) => t,
            _ => {
                errors.push(format!("Missing [beam.{}] section", name));
                continue;
            }
        };

        match beam.get("pin") {
            Some(toml::Value::String(pin)) => match parse_pin(pin) {
                Some(0) | Some(1) => {
                    errors.push(format!("[beam.{}] gpio0/gpio1 are reserved for the uplink", name));
                }
                Some(n) if n < 30 => pins.push(n),
                _ => errors.push(format!("[beam.{}] pin must be \"gpio2\"..\"gpio29\"", name)),
            },
            _ => errors.push(format!("[beam.{}] missing 'pin'", name)),
        }

        if let Some(polarity) = beam.get("polarity") {
            let valid = matches!(
                polarity.as_str(),
                Some("auto") | Some("intact_high") | Some("intact_low")
            );
            if !valid {
                errors.push(format!(
                    "[beam.{}] polarity must be 'auto', 'intact_high' or 'intact_low'",
                    name
                ));
            }
        }
    }

    if pins.len() == 2 && pins[0] == pins[1] {
        errors.push("[beam.a] and [beam.b] must use different pins".to_string());
    }
}

/// Read an optional non-negative integer from a table
fn get_ms(table: Option<&toml::Value>, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    match table.and_then(|t| t.get(key)) {
        Some(toml::Value::Integer(v)) if *v >= 0 && *v <= u32::MAX as i64 => Some(*v),
        Some(_) => {
            errors.push(format!("[timing] {} must be a non-negative integer", key));
            None
        }
        None => None,
    }
}

/// Validate the [timing] section
fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let timing = config.get("timing");

    let debounce = get_ms(timing, "debounce_ms", errors).unwrap_or(25);
    let timeout = get_ms(timing, "sequence_timeout_ms", errors).unwrap_or(900);
    let restore = get_ms(timing, "restore_stable_ms", errors).unwrap_or(120);
    get_ms(timing, "settle_ms", errors);
    get_ms(timing, "startup_delay_ms", errors);

    if debounce == 0 {
        errors.push("[timing] debounce_ms must be greater than 0".to_string());
    }
    if restore == 0 {
        errors.push("[timing] restore_stable_ms must be greater than 0".to_string());
    }
    if timeout <= debounce {
        errors.push("[timing] sequence_timeout_ms must exceed debounce_ms".to_string());
    }
}

/// Validate the [uplink] section
fn validate_uplink(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(baud) = config.get("uplink").and_then(|u| u.get("baudrate")) {
        match baud {
            toml::Value::Integer(b) if *b > 0 && *b <= 921_600 => {}
            _ => errors.push("[uplink] baudrate must be 1-921600".to_string()),
        }
    }
}
