use std::collections::BTreeMap;

use encoding_rs::{UTF_16BE, WINDOWS_1252};
use lopdf::Document;
use lopdf::Object;
use lopdf::content::{Content, Operation};

use crate::error::ExtractError;
use crate::model::RosterPage;
use crate::options::PageSelection;
use crate::table_detect::{MIN_TABLE_COLS, detect_tables};
use crate::table_parse::split_line_into_cells;

fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}

fn looks_decoding_broken(text: &str) -> bool {
    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    if total == 0 {
        return false;
    }

    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    replacement * 8 > total || control * 5 > total
}

fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    let has_bom = bytes.starts_with(&[0xFE, 0xFF]);
    let wide_hint = encoding.is_some_and(|name| {
        let lower = name.to_ascii_lowercase();
        lower.contains("utf16") || lower.contains("ucs2") || lower.contains("identity-h")
    });
    if has_bom || wide_hint {
        let payload = if has_bom { &bytes[2..] } else { bytes };
        let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(payload);
        if !had_errors && !utf16.is_empty() {
            return utf16.into_owned();
        }
    }

    // Belgian rosters are Latin-1 family; WinAnsi covers the accented period names.
    let (latin, _, _) = WINDOWS_1252.decode(bytes);
    latin.into_owned()
}

fn is_time_like(token: &str) -> bool {
    token
        .split_once(':')
        .is_some_and(|(hours, minutes)| {
            !hours.is_empty()
                && minutes.len() == 2
                && hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit())
        })
}

fn extraction_quality_score(text: &str) -> i64 {
    if text.trim().is_empty() {
        return i64::MIN / 4;
    }

    let mut non_empty_lines = 0_i64;
    let mut multi_cell_lines = 0_i64;
    let mut time_like_lines = 0_i64;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        non_empty_lines += 1;
        if split_line_into_cells(line).len() >= MIN_TABLE_COLS {
            multi_cell_lines += 1;
        }
        if line.split_whitespace().any(is_time_like) {
            time_like_lines += 1;
        }
    }

    let broken_penalty = if looks_decoding_broken(text) { 800 } else { 0 };
    multi_cell_lines * 50 + time_like_lines * 15 + non_empty_lines - broken_penalty
}

fn choose_best_text(candidates: Vec<String>) -> String {
    candidates
        .into_iter()
        .max_by_key(|text| extraction_quality_score(text))
        .unwrap_or_default()
}

fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => {
                text.push_str(&decode_pdf_bytes(encoding, bytes));
            }
            Object::Array(items) => {
                collect_text(text, encoding, items);
            }
            Object::Integer(value) => {
                if *value < -100 {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// Rebuild text lines from content-stream operators.
///
/// `'` and `"` move to the next line before showing their string.
fn lines_from_operations(operations: &[Operation], encodings: &BTreeMap<Vec<u8>, &str>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_encoding = None;

    let mut end_line = |current: &mut String| {
        if !current.trim().is_empty() {
            lines.push(std::mem::take(current));
        }
    };

    for operation in operations {
        match operation.operator.as_str() {
            "Tf" => {
                if let Some(font_name) = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                {
                    current_encoding = encodings.get(font_name).copied();
                }
            }
            "Tj" | "TJ" => {
                collect_text(&mut current, current_encoding, &operation.operands);
            }
            "'" | "\"" => {
                end_line(&mut current);
                collect_text(&mut current, current_encoding, &operation.operands);
            }
            "T*" | "Td" | "TD" | "ET" => end_line(&mut current),
            _ => {}
        }
    }
    end_line(&mut current);

    lines
}

fn extract_text_from_page_content(document: &Document, page_id: lopdf::ObjectId) -> Option<String> {
    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let lines = lines_from_operations(&content.operations, &encodings);
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Load a PDF and return the text and tables of every selected page.
///
/// # Errors
///
/// [`ExtractError::DocumentUnreadable`] when the bytes are not a loadable
/// PDF, and [`ExtractError::NoPagesSelected`] when the selection leaves
/// nothing to scan.
pub(crate) fn read_roster_pages(
    input_pdf: &[u8],
    page_selection: Option<&PageSelection>,
) -> Result<Vec<RosterPage>, ExtractError> {
    let document = Document::load_mem(input_pdf)?;
    let pages_map = document.get_pages();

    let pdf_extract_pages = pdf_extract::extract_text_from_mem(input_pdf)
        .ok()
        .map(|text| split_text_into_pages(&text))
        .filter(|pages| pages.len() == pages_map.len());

    let mut pages = Vec::new();
    for (index, (page_no, page_id)) in pages_map.iter().enumerate() {
        if page_selection.is_some_and(|selection| !selection.contains(*page_no)) {
            continue;
        }

        let mut candidates = Vec::new();
        if let Some(text) = pdf_extract_pages
            .as_ref()
            .and_then(|fallback| fallback.get(index).cloned())
            .filter(|text| !text.trim().is_empty())
        {
            candidates.push(text);
        }
        if let Some(text) = extract_text_from_page_content(&document, *page_id) {
            candidates.push(text);
        }
        if let Some(text) = document
            .extract_text(&[*page_no])
            .ok()
            .filter(|text| !text.trim().is_empty())
        {
            candidates.push(text);
        }

        let text = choose_best_text(candidates);
        let tables = detect_tables(*page_no, &text);
        tracing::debug!(page = page_no, tables = tables.len(), "page text extracted");

        pages.push(RosterPage {
            page_number: *page_no,
            text,
            tables,
        });
    }

    if pages.is_empty() && page_selection.is_some() {
        return Err(ExtractError::NoPagesSelected);
    }

    Ok(pages)
}
