use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Office,
    Home,
    Vacation,
    Sick,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Office => "office",
            Location::Home => "home",
            Location::Vacation => "vacation",
            Location::Sick => "sick",
        }
    }
}

/// One logged day. `date` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DayEntry {
    /// Placeholder for a weekday nobody logged.
    pub fn home(date: NaiveDate) -> Self {
        Self {
            date,
            location: Location::Home,
            notes: None,
        }
    }
}

pub const DEFAULT_COMPLIANCE_CONFIG: ComplianceConfig = ComplianceConfig {
    required_office_days_per_week: 2,
    required_compliant_weeks_per_quarter: 8,
    warning_threshold_weeks: 7,
};

/// Policy thresholds. Ordering between the two quarter thresholds is not
/// enforced; a warning threshold above the compliant threshold simply makes
/// `QuarterStatus::Warning` unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    pub required_office_days_per_week: u32,
    pub required_compliant_weeks_per_quarter: u32,
    pub warning_threshold_weeks: u32,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        DEFAULT_COMPLIANCE_CONFIG
    }
}

/// An ISO week, identified by its ISO year and week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekRef {
    pub year: i32,
    pub week: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekSummary {
    pub year: i32,
    pub week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub office_days: u32,
    pub is_compliant: bool,
    pub days: Vec<DayEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarterStatus {
    Compliant,
    Warning,
    Danger,
}

impl QuarterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuarterStatus::Compliant => "compliant",
            QuarterStatus::Warning => "warning",
            QuarterStatus::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarterSummary {
    pub quarter: u32,
    pub year: i32,
    pub weeks: Vec<WeekSummary>,
    pub compliant_weeks: u32,
    pub total_weeks: u32,
    pub status: QuarterStatus,
}
