use std::sync::LazyLock;

use regex::Regex;

use crate::error::CellError;
use crate::model::{Activity, TrainCode};
use crate::time::{OverflowTime, parse_time_with_overflow};

static DRIVING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}:\d{2})\s+(\d{1,2}:\d{2})\s*([A-Z]+\d{3})?")
        .expect("hardcoded driving shift regex is valid")
});

/// What a single roster cell stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellClass {
    Activity(Activity),
    Driving {
        start: OverflowTime,
        end: OverflowTime,
        train_code: TrainCode,
    },
}

/// Classify one collapsed, trimmed cell.
///
/// Known activity codes are matched exactly first; anything else must start
/// with `<start H:MM> <end H:MM>` optionally followed by a train code.
///
/// # Errors
///
/// [`CellError::Unclassifiable`] when neither form matches, and
/// [`CellError::MalformedTime`] when a matched time has minutes above 59.
pub fn classify_cell(content: &str) -> Result<CellClass, CellError> {
    if let Some(activity) = Activity::from_code(content) {
        return Ok(CellClass::Activity(activity));
    }

    let captures = DRIVING_RE
        .captures(content)
        .ok_or(CellError::Unclassifiable)?;
    let start = parse_time_with_overflow(&captures[1])?;
    let end = parse_time_with_overflow(&captures[2])?;
    let train_code = captures
        .get(3)
        .map_or(TrainCode::Unknown, |code| TrainCode::Code(code.as_str().to_string()));

    Ok(CellClass::Driving {
        start,
        end,
        train_code,
    })
}
