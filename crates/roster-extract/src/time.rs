//! Roster clock times.
//!
//! Rosters write duties that run past midnight with hours of 24 and above,
//! so `25:55` means 01:55 on the following day. Parsing keeps the wall-clock
//! time and reports how many whole days the raw hour spilled over.

use chrono::NaiveTime;

use crate::error::CellError;

/// A wall-clock time plus the number of days the raw hour overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverflowTime {
    pub time: NaiveTime,
    pub day_overflow: u32,
}

/// Parse an `H:MM` roster time where `H` may exceed 23.
///
/// # Errors
///
/// Returns [`CellError::MalformedTime`] unless the input is one or more
/// digits, a colon, and exactly two digits forming a minute below 60.
pub fn parse_time_with_overflow(raw: &str) -> Result<OverflowTime, CellError> {
    let malformed = || CellError::MalformedTime(raw.to_string());

    let (hours, minutes) = raw.split_once(':').ok_or_else(malformed)?;
    if hours.is_empty() || !hours.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(malformed());
    }
    if minutes.len() != 2 || !minutes.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(malformed());
    }

    let hours: u32 = hours.parse().map_err(|_| malformed())?;
    let minutes: u32 = minutes.parse().map_err(|_| malformed())?;

    let time = NaiveTime::from_hms_opt(hours % 24, minutes, 0).ok_or_else(malformed)?;
    Ok(OverflowTime {
        time,
        day_overflow: hours / 24,
    })
}
