/// Split a text line into cells on tabs or runs of two or more spaces.
///
/// Single spaces stay inside a cell, so `06:30 14:05 FL123` remains one cell.
pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0_usize;

    let mut flush = |current: &mut String| {
        if !current.trim().is_empty() {
            cells.push(current.trim().to_string());
        }
        current.clear();
    };

    for ch in trimmed.chars() {
        if ch == '\t' {
            flush(&mut current);
            whitespace_run = 0;
            continue;
        }

        if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= 2 {
                flush(&mut current);
            } else {
                current.push(' ');
            }
            continue;
        }

        whitespace_run = 0;
        current.push(ch);
    }
    flush(&mut current);

    cells
}

/// Character offset at which each header cell starts, used as column anchors.
///
/// Returns `None` for tab-separated lines, whose offsets carry no layout.
pub(crate) fn header_column_starts(line: &str) -> Option<Vec<usize>> {
    if line.contains('\t') {
        return None;
    }

    let mut starts = Vec::new();
    let mut whitespace_run = 0_usize;
    let mut in_cell = false;
    for (offset, ch) in line.chars().enumerate() {
        if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= 2 {
                in_cell = false;
            }
            continue;
        }
        whitespace_run = 0;
        if !in_cell {
            starts.push(offset);
            in_cell = true;
        }
    }
    Some(starts)
}

/// Place each word of `line` in the column whose header starts at or before it.
///
/// Columns with no words come back as empty strings, so a blank day keeps its
/// slot. A word may start one character left of its header. Words past the last
/// header land in the last column.
pub(crate) fn slot_line_into_columns(line: &str, column_starts: &[usize]) -> Vec<String> {
    let mut cells = vec![String::new(); column_starts.len().max(1)];
    let boundaries: Vec<usize> = column_starts
        .iter()
        .skip(1)
        .map(|start| start.saturating_sub(1))
        .collect();

    for (offset, word) in words_with_offsets(line) {
        let column = boundaries.partition_point(|&boundary| boundary <= offset);
        let cell = &mut cells[column];
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str(word);
    }

    cells
}

fn words_with_offsets(line: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut word_start: Option<(usize, usize)> = None;

    for (offset, (byte_index, ch)) in line.char_indices().enumerate() {
        match (ch.is_whitespace(), word_start) {
            (true, Some((start_offset, start_byte))) => {
                words.push((start_offset, &line[start_byte..byte_index]));
                word_start = None;
            }
            (false, None) => word_start = Some((offset, byte_index)),
            _ => {}
        }
    }
    if let Some((start_offset, start_byte)) = word_start {
        words.push((start_offset, &line[start_byte..]));
    }

    words
}

/// Collapse internal whitespace runs to one space and trim.
pub(crate) fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
