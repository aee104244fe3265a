use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};

use crate::model::DEFAULT_AGENT_ID;

/// 1-based set of pages to scan, parsed from lists like `1-3,5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }
}

fn parse_page_number(raw: &str, what: &str) -> Result<u32, String> {
    let page: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid {what}: '{}'", raw.trim()))?;
    if page == 0 {
        return Err("pages are 1-based".to_string());
    }
    Ok(page)
}

impl FromStr for PageSelection {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut pages = BTreeSet::new();
        for token in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match token.split_once('-') {
                Some((start, end)) => {
                    let start = parse_page_number(start, "page range start")?;
                    let end = parse_page_number(end, "page range end")?;
                    if end < start {
                        return Err(format!("invalid range '{token}': end is smaller than start"));
                    }
                    pages.extend(start..=end);
                }
                None => {
                    pages.insert(parse_page_number(token, "page number")?);
                }
            }
        }

        if pages.is_empty() {
            return Err("page selection cannot be empty".to_string());
        }

        Ok(Self { pages })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub agent_id: String,
    /// First day of roster week 1. Defaults to the first of the current month.
    pub start_date: Option<NaiveDate>,
    pub pages: Option<PageSelection>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            agent_id: DEFAULT_AGENT_ID.to_string(),
            start_date: None,
            pages: None,
        }
    }
}

impl ExtractOptions {
    /// Agent id stamped on every shift; a blank id falls back to [`DEFAULT_AGENT_ID`].
    #[must_use]
    pub fn effective_agent_id(&self) -> &str {
        let agent_id = self.agent_id.trim();
        if agent_id.is_empty() {
            DEFAULT_AGENT_ID
        } else {
            agent_id
        }
    }

    #[must_use]
    pub fn reference_start_date(&self, today: NaiveDate) -> NaiveDate {
        self.start_date.unwrap_or_else(|| first_day_of_month(today))
    }

    #[must_use]
    pub fn reference_start_date_now(&self) -> NaiveDate {
        self.reference_start_date(Utc::now().date_naive())
    }
}

#[must_use]
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
