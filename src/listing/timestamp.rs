//! FTP timestamp parsing
//!
//! Parses the `YYYYMMDDhhmmss[.fff]` values of MDTM replies and the
//! `modify`/`create` MLST facts.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::error::{ParseError, ParseTarget};

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(\d{2})(\d{2})(\d{2})(\d{2})(\d{2})(?:\.(\d+))?$")
        .expect("timestamp pattern is valid")
});

/// Parses an FTP timestamp into a UTC date-time.
///
/// The optional fraction is applied as a sub-second offset, truncated to
/// nanoseconds. Out-of-range fields (month 13, hour 25, ...) are rejected.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, ParseError> {
    let invalid = || ParseError::new(ParseTarget::Timestamp, text);
    let caps = TIMESTAMP.captures(text.trim()).ok_or_else(invalid)?;

    let field = |idx: usize| caps[idx].parse::<u32>().map_err(|_| invalid());
    let year = caps[1].parse::<i32>().map_err(|_| invalid())?;

    let nanos = match caps.get(7) {
        Some(fraction) => {
            // Right-pad to nine digits, dropping anything finer than a nanosecond.
            let digits: String = fraction.as_str().chars().chain("000000000".chars()).take(9).collect();
            digits.parse::<u32>().map_err(|_| invalid())?
        }
        None => 0,
    };

    let date = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?).ok_or_else(invalid)?;
    let time = date
        .and_hms_nano_opt(field(4)?, field(5)?, field(6)?, nanos)
        .ok_or_else(invalid)?;
    Ok(time.and_utc())
}
