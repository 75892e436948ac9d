use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar;
use crate::models::{
    ComplianceConfig, DayEntry, Location, QuarterStatus, QuarterSummary, WeekSummary,
};

pub fn summarize_week(
    year: i32,
    week: u32,
    config: &ComplianceConfig,
    entries: &[DayEntry],
) -> WeekSummary {
    let (start_date, end_date) = calendar::week_bounds(year, week);

    let logged: HashMap<NaiveDate, &DayEntry> = entries
        .iter()
        .filter(|entry| entry.date >= start_date && entry.date <= end_date)
        .map(|entry| (entry.date, entry))
        .collect();

    let days: Vec<DayEntry> = calendar::weekdays(start_date, end_date)
        .into_iter()
        .map(|date| match logged.get(&date) {
            Some(entry) => (*entry).clone(),
            None => DayEntry::home(date),
        })
        .collect();

    let office_days = days
        .iter()
        .filter(|day| day.location == Location::Office)
        .count() as u32;

    WeekSummary {
        year,
        week_number: week,
        start_date,
        end_date,
        office_days,
        is_compliant: office_days >= config.required_office_days_per_week,
        days,
    }
}

pub fn quarter_status(compliant_weeks: u32, config: &ComplianceConfig) -> QuarterStatus {
    if compliant_weeks >= config.required_compliant_weeks_per_quarter {
        QuarterStatus::Compliant
    } else if compliant_weeks >= config.warning_threshold_weeks {
        QuarterStatus::Warning
    } else {
        QuarterStatus::Danger
    }
}

pub fn summarize_quarter(
    year: i32,
    quarter: u32,
    config: &ComplianceConfig,
    entries: &[DayEntry],
) -> QuarterSummary {
    let weeks: Vec<WeekSummary> = calendar::weeks_in_quarter(year, quarter)
        .into_iter()
        .map(|week| summarize_week(week.year, week.week, config, entries))
        .collect();

    let compliant_weeks = weeks.iter().filter(|week| week.is_compliant).count() as u32;
    let total_weeks = weeks.len() as u32;
    let status = quarter_status(compliant_weeks, config);

    debug!(
        year,
        quarter,
        compliant_weeks,
        total_weeks,
        status = status.as_str(),
        "summarized quarter"
    );

    QuarterSummary {
        quarter,
        year,
        weeks,
        compliant_weeks,
        total_weeks,
        status,
    }
}

pub fn summarize_year(
    year: i32,
    config: &ComplianceConfig,
    entries: &[DayEntry],
) -> Vec<QuarterSummary> {
    (1..=4)
        .map(|quarter| summarize_quarter(year, quarter, config, entries))
        .collect()
}

/// Compliant weeks still missing before the quarter reports `compliant`.
pub fn weeks_needed(summary: &QuarterSummary, config: &ComplianceConfig) -> u32 {
    config
        .required_compliant_weeks_per_quarter
        .saturating_sub(summary.compliant_weeks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(y: i32, m: u32, d: u32, location: Location) -> DayEntry {
        DayEntry {
            date: date(y, m, d),
            location,
            notes: None,
        }
    }

    /// Two office days on Monday and Tuesday of every week in the range.
    fn office_weeks(year: i32, weeks: impl IntoIterator<Item = u32>) -> Vec<DayEntry> {
        let mut entries = Vec::new();
        for week in weeks {
            let (monday, _) = calendar::week_bounds(year, week);
            for offset in 0..2 {
                entries.push(DayEntry {
                    date: monday + chrono::Duration::days(offset),
                    location: Location::Office,
                    notes: None,
                });
            }
        }
        entries
    }

    #[test]
    fn unlogged_week_defaults_to_home() {
        let config = ComplianceConfig::default();
        let summary = summarize_week(2025, 10, &config, &[]);
        assert_eq!(summary.days.len(), 5);
        assert!(summary.days.iter().all(|day| day.location == Location::Home));
        assert_eq!(summary.office_days, 0);
        assert!(!summary.is_compliant);
        assert_eq!(summary.start_date, date(2025, 3, 3));
        assert_eq!(summary.end_date, date(2025, 3, 9));
    }

    #[test]
    fn week_uses_logged_entries_and_ignores_weekends() {
        let config = ComplianceConfig::default();
        let entries = vec![
            entry(2025, 3, 3, Location::Office),
            DayEntry {
                notes: Some("client visit".to_string()),
                ..entry(2025, 3, 5, Location::Office)
            },
            entry(2025, 3, 6, Location::Sick),
            entry(2025, 3, 8, Location::Office),
            entry(2025, 3, 10, Location::Office),
        ];

        let summary = summarize_week(2025, 10, &config, &entries);
        assert_eq!(summary.office_days, 2);
        assert!(summary.is_compliant);
        assert_eq!(summary.days[1], DayEntry::home(date(2025, 3, 4)));
        assert_eq!(summary.days[2].notes.as_deref(), Some("client visit"));
        assert_eq!(summary.days[3].location, Location::Sick);
        assert!(summary.days.iter().all(|day| day.date != date(2025, 3, 8)));
    }

    #[test]
    fn zero_requirement_makes_every_week_compliant() {
        let config = ComplianceConfig {
            required_office_days_per_week: 0,
            ..ComplianceConfig::default()
        };
        assert!(summarize_week(2025, 20, &config, &[]).is_compliant);
    }

    #[test]
    fn status_tiers_follow_thresholds() {
        let config = ComplianceConfig::default();
        assert_eq!(quarter_status(9, &config), QuarterStatus::Compliant);
        assert_eq!(quarter_status(8, &config), QuarterStatus::Compliant);
        assert_eq!(quarter_status(7, &config), QuarterStatus::Warning);
        assert_eq!(quarter_status(5, &config), QuarterStatus::Danger);
    }

    #[test]
    fn inverted_thresholds_never_warn() {
        let config = ComplianceConfig {
            required_office_days_per_week: 2,
            required_compliant_weeks_per_quarter: 6,
            warning_threshold_weeks: 9,
        };
        assert_eq!(quarter_status(6, &config), QuarterStatus::Compliant);
        assert_eq!(quarter_status(5, &config), QuarterStatus::Danger);
    }

    #[test]
    fn quarter_counts_compliant_weeks() {
        let config = ComplianceConfig::default();
        let entries = office_weeks(2025, 15..=23);
        let summary = summarize_quarter(2025, 2, &config, &entries);

        assert_eq!(summary.total_weeks, 13);
        assert_eq!(summary.compliant_weeks, 9);
        assert_eq!(summary.status, QuarterStatus::Compliant);
        assert_eq!(weeks_needed(&summary, &config), 0);
        assert_eq!(summary.weeks[0].week_number, 15);
    }

    #[test]
    fn quarter_warns_then_dangers() {
        let config = ComplianceConfig::default();

        let warning = summarize_quarter(2025, 2, &config, &office_weeks(2025, 15..=21));
        assert_eq!(warning.compliant_weeks, 7);
        assert_eq!(warning.status, QuarterStatus::Warning);
        assert_eq!(weeks_needed(&warning, &config), 1);

        let danger = summarize_quarter(2025, 2, &config, &office_weeks(2025, 15..=19));
        assert_eq!(danger.compliant_weeks, 5);
        assert_eq!(danger.status, QuarterStatus::Danger);
        assert_eq!(weeks_needed(&danger, &config), 3);
    }

    #[test]
    fn year_has_four_quarters_in_order() {
        let config = ComplianceConfig::default();
        let quarters = summarize_year(2026, &config, &[]);
        let numbers: Vec<u32> = quarters.iter().map(|q| q.quarter).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        let total: u32 = quarters.iter().map(|q| q.total_weeks).sum();
        assert_eq!(total, 53);
    }
}
