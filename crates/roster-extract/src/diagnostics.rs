use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CellError, RowError};

/// Counters and recoverable failures collected over one extraction run.
///
/// `errors` keeps one human-readable line per failed cell or abandoned row,
/// in document order. Cell failures always satisfy
/// `shifts_converted + cell failures == total_cells_detected`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunDiagnostics {
    pub total_cells_detected: usize,
    pub shifts_converted: usize,
    pub errors: Vec<String>,
}

impl RunDiagnostics {
    pub fn record_cell_detected(&mut self) {
        self.total_cells_detected += 1;
    }

    pub fn record_shift_converted(&mut self) {
        self.shifts_converted += 1;
    }

    pub fn record_cell_failure(&mut self, content: &str, date: NaiveDate, error: &CellError) {
        tracing::warn!(%content, %date, %error, "roster cell could not be classified");
        self.errors.push(format!(
            "Parsing failed for: {content} ({}): {error}",
            date.format("%Y-%m-%d")
        ));
    }

    pub fn record_row_failure(&mut self, page: u32, table_id: usize, row: usize, error: &RowError) {
        tracing::warn!(page, table_id, row, %error, "abandoning roster row");
        self.errors.push(format!(
            "Error while processing roster row {row} (page {page}, table {table_id}): {error}"
        ));
    }
}
