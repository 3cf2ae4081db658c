//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

/// Parse and validate a bounded float value.
///
/// # Arguments
///
/// * `s` - The string to parse
/// * `min` - Minimum allowed value (inclusive)
/// * `max` - Maximum allowed value (inclusive)
/// * `name` - Name of the parameter for error messages
pub fn parse_bounded_float(s: &str, min: f32, max: f32, name: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(min..=max).contains(&value) {
        return Err(format!(
            "{name} must be between {min} and {max}, got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate a confidence threshold in percent (0-100).
pub fn parse_percent(s: &str) -> Result<f32, String> {
    use crate::constants::thresholds::{MAX, MIN};

    parse_bounded_float(s, MIN, MAX, "threshold")
}

/// Parse and validate a timeout in whole seconds (at least 1).
pub fn parse_timeout_secs(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number of seconds"))?;

    if value == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }

    Ok(value)
}
