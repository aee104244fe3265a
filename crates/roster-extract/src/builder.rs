use chrono::{NaiveDate, TimeDelta};
use uuid::Uuid;

use crate::classify::{CellClass, classify_cell};
use crate::diagnostics::RunDiagnostics;
use crate::error::RowError;
use crate::model::{
    RosterTable, Shift, ShiftMetadata, ShiftTime, ShiftType, TrainCode, ValidationStatus,
};
use crate::scanner::PageContext;
use crate::table_parse::collapse_whitespace;

pub const DAY_HEADERS: [&str; 7] = ["R1", "R2", "R3", "R4", "R5", "R6", "R7"];

/// Calendar date of `day_index` (0..=6) in roster week `week_number`.
#[must_use]
pub fn shift_date(start: NaiveDate, week_number: u32, day_index: usize) -> Option<NaiveDate> {
    let day_index = i64::try_from(day_index).ok()?;
    let offset = 7 * (i64::from(week_number) - 1) + day_index;
    start.checked_add_signed(TimeDelta::try_days(offset)?)
}

/// Turns accepted week-tables into shifts for one agent.
#[derive(Debug, Clone, Copy)]
pub struct ShiftBuilder<'a> {
    pub start_date: NaiveDate,
    pub agent_id: &'a str,
}

impl ShiftBuilder<'_> {
    /// Append a shift for every classifiable cell of `table`.
    ///
    /// The header row is skipped. Failures are recorded in `diagnostics`
    /// and never stop the remaining rows.
    pub fn build_table(
        &self,
        table: &RosterTable,
        context: &PageContext,
        shifts: &mut Vec<Shift>,
        diagnostics: &mut RunDiagnostics,
    ) {
        for (index, row) in table.rows.iter().enumerate().skip(1) {
            if let Err(error) = self.build_row(row, context, shifts, diagnostics) {
                diagnostics.record_row_failure(table.page, table.table_id, index, &error);
            }
        }
    }

    fn build_row(
        &self,
        row: &[String],
        context: &PageContext,
        shifts: &mut Vec<Shift>,
        diagnostics: &mut RunDiagnostics,
    ) -> Result<(), RowError> {
        let week_cell = row.first().ok_or(RowError::Empty)?.trim();
        if week_cell.is_empty() || !week_cell.bytes().all(|byte| byte.is_ascii_digit()) {
            return Ok(());
        }
        let week_number: u32 = week_cell
            .parse()
            .map_err(|_| RowError::WeekOutOfRange(week_cell.to_string()))?;

        for (day_index, raw) in row.iter().skip(1).take(DAY_HEADERS.len()).enumerate() {
            let content = collapse_whitespace(raw);
            if content.is_empty() {
                continue;
            }

            let date = shift_date(self.start_date, week_number, day_index).ok_or(
                RowError::DateOutOfRange {
                    week: week_number,
                    day: day_index,
                },
            )?;
            diagnostics.record_cell_detected();

            match classify_cell(&content) {
                Ok(class) => {
                    shifts.push(self.shift(class, content, date, week_number, day_index, context));
                    diagnostics.record_shift_converted();
                }
                Err(error) => diagnostics.record_cell_failure(&content, date, &error),
            }
        }

        Ok(())
    }

    fn shift(
        &self,
        class: CellClass,
        content: String,
        date: NaiveDate,
        week_number: u32,
        day_index: usize,
        context: &PageContext,
    ) -> Shift {
        // Day overflow is intentionally not folded into `date`.
        let (shift_type, start_time, end_time, train_code) = match class {
            CellClass::Activity(activity) => (
                ShiftType::Activity(activity),
                ShiftTime::NotApplicable,
                ShiftTime::NotApplicable,
                TrainCode::NotApplicable,
            ),
            CellClass::Driving {
                start,
                end,
                train_code,
            } => (
                ShiftType::Driving,
                ShiftTime::At(start.time),
                ShiftTime::At(end.time),
                train_code,
            ),
        };

        Shift {
            shift_id: Uuid::new_v4(),
            agent_id: self.agent_id.to_string(),
            series: context.series.clone(),
            period: context.period,
            date,
            weekday_name: date.format("%A").to_string(),
            week_number,
            start_time,
            end_time,
            is_swappable: shift_type == ShiftType::Driving,
            shift_type,
            train_code,
            metadata: ShiftMetadata {
                source: format!(
                    "Roster {}, Week {week_number}, {}",
                    context.series, DAY_HEADERS[day_index]
                ),
                original_content: content,
                validation_status: ValidationStatus::Pending,
            },
        }
    }
}
