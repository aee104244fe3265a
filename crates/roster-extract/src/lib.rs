//! Convert duty-roster PDFs into normalized shift records.
//!
//! A run walks the document page by page. Each page may carry a series
//! header (`[FL-A]: ... PERIODE Z SUP 0`) that stays in force until the next
//! one, and any number of tables; only tables headed `Week` are read. Every
//! non-empty day cell becomes either a [`Shift`] or one line in the run's
//! [`RunDiagnostics`].

mod builder;
mod classify;
mod csv_out;
mod diagnostics;
mod error;
mod model;
mod options;
mod pdf_reader;
mod scanner;
mod table_detect;
mod table_parse;
mod time;

use std::path::Path;

use chrono::NaiveDate;

use crate::pdf_reader::read_roster_pages;
use crate::scanner::week_tables;

pub use builder::{DAY_HEADERS, ShiftBuilder, shift_date};
pub use classify::{CellClass, classify_cell};
pub use csv_out::write_shifts_csv;
pub use diagnostics::RunDiagnostics;
pub use error::{CellError, ExtractError, RowError};
pub use model::{
    Activity, DEFAULT_AGENT_ID, NOT_APPLICABLE_LABEL, Period, RosterExtraction, RosterPage,
    RosterTable, Shift, ShiftMetadata, ShiftTime, ShiftType, TrainCode, UNKNOWN_LABEL,
    ValidationStatus,
};
pub use options::{ExtractOptions, PageSelection, first_day_of_month};
pub use scanner::{PageContext, SeriesHeader, WEEK_HEADER, find_series_header, is_week_table};
pub use time::{OverflowTime, parse_time_with_overflow};

/// Run the extraction engine over already-extracted pages.
///
/// Never fails: unreadable cells and rows end up in `logs.errors`.
#[must_use]
pub fn extract_from_pages(
    pages: &[RosterPage],
    agent_id: &str,
    start_date: NaiveDate,
) -> RosterExtraction {
    let builder = ShiftBuilder {
        start_date,
        agent_id,
    };
    let mut context = PageContext::default();
    let mut shifts = Vec::new();
    let mut logs = RunDiagnostics::default();

    for page in pages {
        context.observe(page);
        for table in week_tables(page) {
            builder.build_table(table, &context, &mut shifts, &mut logs);
        }
    }

    tracing::info!(
        pages = pages.len(),
        cells = logs.total_cells_detected,
        shifts = logs.shifts_converted,
        errors = logs.errors.len(),
        "roster extraction finished"
    );

    RosterExtraction { shifts, logs }
}

/// Extract shifts from an in-memory roster PDF.
///
/// # Errors
///
/// Fails only when the document cannot be opened or the page selection
/// leaves nothing to read.
pub fn extract_roster_from_bytes(
    input_pdf: &[u8],
    options: &ExtractOptions,
) -> Result<RosterExtraction, ExtractError> {
    let pages = read_roster_pages(input_pdf, options.pages.as_ref())?;
    let start_date = options.reference_start_date_now();
    tracing::debug!(pages = pages.len(), %start_date, "roster document opened");

    Ok(extract_from_pages(&pages, options.effective_agent_id(), start_date))
}

/// Extract shifts from a roster PDF on disk.
///
/// # Errors
///
/// See [`extract_roster_from_bytes`]; reading the file may also fail.
pub fn extract_roster(
    input_pdf: &Path,
    options: &ExtractOptions,
) -> Result<RosterExtraction, ExtractError> {
    let bytes = std::fs::read(input_pdf)?;
    extract_roster_from_bytes(&bytes, options)
}
