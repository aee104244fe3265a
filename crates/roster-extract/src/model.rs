use std::fmt::{self, Display, Formatter};

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::diagnostics::RunDiagnostics;

pub const DEFAULT_AGENT_ID: &str = "AGENT_ID_DEFAULT";
pub const UNKNOWN_LABEL: &str = "UNKNOWN";
pub const NOT_APPLICABLE_LABEL: &str = "N/A";

/// Text and detected tables of one document page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterPage {
    pub page_number: u32,
    pub text: String,
    pub tables: Vec<RosterTable>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTable {
    pub page: u32,
    pub table_id: usize,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    NightLate,
    Unknown,
}

impl Period {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::NightLate => "NIGHT-LATE",
            Self::Unknown => UNKNOWN_LABEL,
        }
    }
}

/// Non-driving day statuses written as short codes in roster cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    CompensatoryRest,
    WeeklyRest,
    TerritorialRest,
    Leave,
    Reserve,
    OutOfServiceBrussels,
    Training,
}

impl Activity {
    pub const ALL: [Self; 7] = [
        Self::CompensatoryRest,
        Self::WeeklyRest,
        Self::TerritorialRest,
        Self::Leave,
        Self::Reserve,
        Self::OutOfServiceBrussels,
        Self::Training,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::CompensatoryRest => "CW",
            Self::WeeklyRest => "RW",
            Self::TerritorialRest => "RT",
            Self::Leave => "CV",
            Self::Reserve => "RES",
            Self::OutOfServiceBrussels => "HSBR",
            Self::Training => "F",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CompensatoryRest => "COMPENSATORY REST",
            Self::WeeklyRest => "WEEKLY REST",
            Self::TerritorialRest => "TERRITORIAL REST",
            Self::Leave => "LEAVE",
            Self::Reserve => "RESERVE",
            Self::OutOfServiceBrussels => "OUT OF SERVICE - BRUSSELS",
            Self::Training => "TRAINING",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|activity| activity.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftType {
    Activity(Activity),
    Driving,
}

impl ShiftType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activity(activity) => activity.label(),
            Self::Driving => "DRIVING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftTime {
    At(NaiveTime),
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrainCode {
    Code(String),
    Unknown,
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Pending,
}

impl ValidationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftMetadata {
    pub source: String,
    pub original_content: String,
    pub validation_status: ValidationStatus,
}

/// One duty or rest entry for one agent on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shift {
    pub shift_id: Uuid,
    pub agent_id: String,
    pub series: String,
    pub period: Period,
    pub date: NaiveDate,
    pub weekday_name: String,
    pub week_number: u32,
    pub start_time: ShiftTime,
    pub end_time: ShiftTime,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    pub train_code: TrainCode,
    pub is_swappable: bool,
    pub metadata: ShiftMetadata,
}

/// Everything a successful run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterExtraction {
    pub shifts: Vec<Shift>,
    pub logs: RunDiagnostics,
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for ShiftType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for ShiftTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(time) => write!(f, "{}", time.format("%H:%M")),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE_LABEL),
        }
    }
}

impl Display for TrainCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => f.write_str(code),
            Self::Unknown => f.write_str(UNKNOWN_LABEL),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE_LABEL),
        }
    }
}

macro_rules! serialize_as_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    serializer.collect_str(self)
                }
            }
        )+
    };
}

serialize_as_display!(Period, ShiftType, ShiftTime, TrainCode);
