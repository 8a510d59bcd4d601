//! Simple TOML parser for node configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `node.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] and [section.subsection] headers
//! - Comments (# ...), including trailing comments
//!
//! Unknown keys are ignored; `build.rs` already rejected malformed files.

use heapless::String as HString;

use beamgate_core::config::{ConfigError, NodeConfig, Polarity, MAX_NODE_ID_LEN};
use beamgate_hal_rp2040::gpio::parse_pin_string;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Parsed, but the resulting config is not usable
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Node,
    BeamA,
    BeamB,
    Timing,
    Uplink,
}

/// Parse TOML configuration into a validated NodeConfig
pub fn parse_config(input: &str) -> Result<NodeConfig, ParseError> {
    let mut config = NodeConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Parse section header like "node" or "beam.a"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "node" => Ok(Section::Node),
        "beam.a" => Ok(Section::BeamA),
        "beam.b" => Ok(Section::BeamB),
        "timing" => Ok(Section::Timing),
        "uplink" => Ok(Section::Uplink),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_polarity(value: &str) -> Result<Polarity, ParseError> {
    match parse_string(value) {
        "auto" => Ok(Polarity::Auto),
        "intact_high" => Ok(Polarity::IntactHigh),
        "intact_low" => Ok(Polarity::IntactLow),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_node_id(value: &str) -> Result<HString<MAX_NODE_ID_LEN>, ParseError> {
    HString::try_from(parse_string(value)).map_err(|_| ParseError::InvalidValue)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut NodeConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Node => {
            if key == "id" {
                config.node_id = parse_node_id(value)?;
            }
        }
        Section::BeamA | Section::BeamB => {
            let beam = if section == Section::BeamA {
                &mut config.beam_a
            } else {
                &mut config.beam_b
            };
            match key {
                "pin" => {
                    beam.pin = parse_pin_string(parse_string(value)).ok_or(ParseError::InvalidPin)?
                }
                "polarity" => beam.polarity = parse_polarity(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Timing => {
            let t = &mut config.timing;
            match key {
                "debounce_ms" => t.debounce_ms = parse_int(value)?,
                "sequence_timeout_ms" => t.sequence_timeout_ms = parse_int(value)?,
                "restore_stable_ms" => t.restore_stable_ms = parse_int(value)?,
                "settle_ms" => t.settle_ms = parse_int(value)?,
                "startup_delay_ms" => t.startup_delay_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Uplink => {
            if key == "baudrate" {
                config.uplink.baudrate = parse_int(value)?;
            }
        }
        Section::Root => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamgate_core::config::PinConfig;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(include_str!("../../node.toml")).unwrap();
        assert_eq!(config, NodeConfig::default());
    }

    #[test]
    fn test_parse_overrides() {
        let config_str = r#"
[node]
id = "lab.east-2"   # trailing comment

[beam.a]
pin = "gpio6"
polarity = "intact_low"

[beam.b]
pin = "^gpio7"

[timing]
debounce_ms = 10
sequence_timeout_ms = 1500
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.node_id.as_str(), "lab.east-2");
        assert_eq!(
            config.beam_a.pin,
            PinConfig {
                pin: 6,
                pull_up: false
            }
        );
        assert_eq!(config.beam_a.polarity, Polarity::IntactLow);
        assert_eq!(config.beam_b.pin, PinConfig::pulled_up(7));
        assert_eq!(config.beam_b.polarity, Polarity::Auto);
        assert_eq!(config.timing.debounce_ms, 10);
        assert_eq!(config.timing.sequence_timeout_ms, 1500);
        assert_eq!(config.timing.restore_stable_ms, 120);
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("beam.a"), Ok(Section::BeamA));
        assert_eq!(parse_section_header(" uplink "), Ok(Section::Uplink));
        assert_eq!(parse_section_header("beam.c"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[beam.a]\npin = \"pin4\"\n"),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_config("[beam.a]\npolarity = \"sideways\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[timing]\ndebounce_ms = -3\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_validation_runs_after_parse() {
        assert_eq!(
            parse_config("[beam.b]\npin = \"^gpio4\"\n"),
            Err(ParseError::Invalid(ConfigError::DuplicatePin))
        );
        assert_eq!(
            parse_config("[node]\nid = \"door 1\"\n"),
            Err(ParseError::Invalid(ConfigError::InvalidNodeId))
        );
    }
}
