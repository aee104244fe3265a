use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Period, RosterPage, RosterTable, UNKNOWN_LABEL};

pub const WEEK_HEADER: &str = "Week";

const DAY_KEYWORDS: [&str; 3] = ["matins", "journées", "journees"];

static SERIES_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(FL-[A-E])\]:.*?Liege serie - ([A-Z]) \((.*?)\) PERIODE Z SUP 0")
        .expect("hardcoded series header regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesHeader {
    pub series: String,
    pub period: Period,
}

/// Series and period currently in force while walking the document.
///
/// Pages without a header keep whatever the last header said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub series: String,
    pub period: Period,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            series: UNKNOWN_LABEL.to_string(),
            period: Period::Unknown,
        }
    }
}

impl PageContext {
    /// Update the context from a page's header; returns whether one was found.
    pub fn observe(&mut self, page: &RosterPage) -> bool {
        let Some(header) = find_series_header(&page.text) else {
            return false;
        };

        tracing::debug!(
            page = page.page_number,
            series = %header.series,
            period = %header.period,
            "series header detected"
        );
        self.series = header.series;
        self.period = header.period;
        true
    }
}

#[must_use]
pub fn find_series_header(text: &str) -> Option<SeriesHeader> {
    let captures = SERIES_HEADER_RE.captures(text)?;
    let descriptor = captures.get(3).map_or("", |value| value.as_str()).to_lowercase();
    let period = if DAY_KEYWORDS
        .iter()
        .any(|keyword| descriptor.contains(keyword))
    {
        Period::Day
    } else {
        Period::NightLate
    };

    Some(SeriesHeader {
        series: captures[1].to_string(),
        period,
    })
}

/// Only tables whose very first cell reads exactly `Week` carry roster weeks.
#[must_use]
pub fn is_week_table(table: &RosterTable) -> bool {
    table
        .rows
        .first()
        .and_then(|header| header.first())
        .is_some_and(|cell| cell == WEEK_HEADER)
}

pub fn week_tables(page: &RosterPage) -> impl Iterator<Item = &RosterTable> {
    page.tables.iter().filter(|table| is_week_table(table))
}
