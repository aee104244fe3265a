use std::io;

use thiserror::Error;

/// Failures that abort a whole extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to open roster document: {0}")]
    DocumentUnreadable(#[from] lopdf::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no pages available after applying selection")]
    NoPagesSelected,
}

/// A single cell could not be turned into a shift.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("malformed time '{0}'")]
    MalformedTime(String),

    #[error("unrecognised shift code")]
    Unclassifiable,
}

/// A whole table row had to be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row has no cells")]
    Empty,

    #[error("week number '{0}' is out of range")]
    WeekOutOfRange(String),

    #[error("date for week {week}, day {day} is out of range")]
    DateOutOfRange { week: u32, day: usize },
}
