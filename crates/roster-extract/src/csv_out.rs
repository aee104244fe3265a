use std::io::Write;

use csv::Writer;

use crate::error::ExtractError;
use crate::model::Shift;

const CSV_HEADERS: [&str; 15] = [
    "shift_id",
    "agent_id",
    "series",
    "period",
    "date",
    "weekday_name",
    "week_number",
    "start_time",
    "end_time",
    "type",
    "train_code",
    "is_swappable",
    "source",
    "original_content",
    "validation_status",
];

fn shift_record(shift: &Shift) -> [String; 15] {
    [
        shift.shift_id.to_string(),
        shift.agent_id.clone(),
        shift.series.clone(),
        shift.period.to_string(),
        shift.date.format("%Y-%m-%d").to_string(),
        shift.weekday_name.clone(),
        shift.week_number.to_string(),
        shift.start_time.to_string(),
        shift.end_time.to_string(),
        shift.shift_type.to_string(),
        shift.train_code.to_string(),
        shift.is_swappable.to_string(),
        shift.metadata.source.clone(),
        shift.metadata.original_content.clone(),
        shift.metadata.validation_status.as_str().to_string(),
    ]
}

/// Write one CSV row per shift, metadata flattened into trailing columns.
///
/// # Errors
///
/// Propagates CSV and I/O failures from the underlying writer.
pub fn write_shifts_csv<W: Write>(out: W, shifts: &[Shift]) -> Result<(), ExtractError> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(CSV_HEADERS)?;
    for shift in shifts {
        writer.write_record(shift_record(shift))?;
    }
    writer.flush()?;
    Ok(())
}
