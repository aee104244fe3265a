use crate::model::RosterTable;
use crate::table_parse::{header_column_starts, slot_line_into_columns, split_line_into_cells};

pub(crate) const MIN_TABLE_COLS: usize = 2;
pub(crate) const MIN_TABLE_ROWS: usize = 2;

/// Group consecutive multi-cell lines of a page into tables.
///
/// Blank lines are ignored; any other line with fewer than
/// [`MIN_TABLE_COLS`] cells ends the current table. The first line of a table
/// anchors its columns: later rows are slotted by character offset, so a
/// column left blank in a row comes back as an empty cell.
pub(crate) fn detect_tables(page_number: u32, text: &str) -> Vec<RosterTable> {
    let mut tables = Vec::new();
    let mut current_rows: Vec<Vec<String>> = Vec::new();
    let mut column_starts: Option<Vec<usize>> = None;

    let mut flush_current = |rows: &mut Vec<Vec<String>>| {
        if rows.len() >= MIN_TABLE_ROWS {
            tables.push(RosterTable {
                page: page_number,
                table_id: tables.len() + 1,
                rows: std::mem::take(rows),
            });
        } else {
            rows.clear();
        }
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let cells = split_line_into_cells(line);
        if cells.len() < MIN_TABLE_COLS {
            flush_current(&mut current_rows);
            column_starts = None;
            continue;
        }

        if current_rows.is_empty() {
            column_starts = header_column_starts(line);
            current_rows.push(cells);
            continue;
        }

        let row = match (&column_starts, line.contains('\t')) {
            (Some(starts), false) => slot_line_into_columns(line, starts),
            _ => cells,
        };
        current_rows.push(row);
    }
    flush_current(&mut current_rows);

    tables
}
