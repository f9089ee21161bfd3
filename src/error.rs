//! Parsing of mode words given on the command line.

use std::num::IntErrorKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseModeError {
    #[error("empty mode")]
    Empty,

    #[error("invalid {radix} mode '{input}'")]
    InvalidDigits { input: String, radix: &'static str },

    #[error("mode '{0}' does not fit in 32 bits")]
    Overflow(String),
}

fn radix_name(radix: u32) -> &'static str {
    match radix {
        2 => "binary",
        8 => "octal",
        16 => "hex",
        _ => "numeric",
    }
}

/// Parses a mode word. Octal unless prefixed with `0x`, `0b` or `0o`;
/// underscores are ignored.
///
/// ```
/// use permscope::error::parse_mode;
///
/// assert_eq!(parse_mode("755").unwrap(), 0o755);
/// assert_eq!(parse_mode("0x1ff").unwrap(), 0o777);
/// assert_eq!(parse_mode("0b111_101_101").unwrap(), 0o755);
/// ```
pub fn parse_mode(input: &str) -> Result<u32, ParseModeError> {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else {
        (lower.as_str(), 8)
    };

    if trimmed.is_empty() {
        return Err(ParseModeError::Empty);
    }

    // from_str_radix tolerates a leading '+', modes take bare digits only
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ParseModeError::InvalidDigits {
            input: trimmed.to_string(),
            radix: radix_name(radix),
        });
    }

    u32::from_str_radix(&digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ParseModeError::Overflow(trimmed.to_string()),
        _ => ParseModeError::InvalidDigits {
            input: trimmed.to_string(),
            radix: radix_name(radix),
        },
    })
}
