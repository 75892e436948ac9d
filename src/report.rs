use std::fmt::Write;

use crate::compliance;
use crate::models::{ComplianceConfig, DayEntry, Location, QuarterSummary};

fn location_counts(quarter: &QuarterSummary) -> [(Location, usize); 4] {
    let mut counts = [
        (Location::Office, 0),
        (Location::Home, 0),
        (Location::Vacation, 0),
        (Location::Sick, 0),
    ];
    for day in quarter.weeks.iter().flat_map(|week| week.days.iter()) {
        if let Some(slot) = counts.iter_mut().find(|(location, _)| *location == day.location) {
            slot.1 += 1;
        }
    }
    counts
}

pub fn build_report(year: i32, config: &ComplianceConfig, entries: &[DayEntry]) -> String {
    let quarters = compliance::summarize_year(year, config, entries);

    let mut output = String::new();

    let _ = writeln!(output, "# Return-to-Office Compliance {year}");
    let _ = writeln!(
        output,
        "Policy: {} office days per week, {} compliant weeks per quarter (warning at {})",
        config.required_office_days_per_week,
        config.required_compliant_weeks_per_quarter,
        config.warning_threshold_weeks
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Quarter Status");

    for quarter in quarters.iter() {
        let needed = compliance::weeks_needed(quarter, config);
        let _ = write!(
            output,
            "- Q{}: {} ({}/{} compliant weeks)",
            quarter.quarter,
            quarter.status.as_str(),
            quarter.compliant_weeks,
            quarter.total_weeks
        );
        if needed > 0 {
            let _ = write!(output, ", {needed} more needed");
        }
        let _ = writeln!(output);
    }

    for quarter in quarters.iter() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Q{} Weeks", quarter.quarter);

        let counts = location_counts(quarter);
        let mix: Vec<String> = counts
            .iter()
            .map(|(location, count)| format!("{} {}", count, location.as_str()))
            .collect();
        let _ = writeln!(output, "Day mix: {}", mix.join(", "));

        for week in quarter.weeks.iter() {
            let mark = if week.is_compliant { "x" } else { " " };
            let _ = writeln!(
                output,
                "- [{}] {}-W{:02} ({} to {}): {} office days",
                mark, week.year, week.week_number, week.start_date, week.end_date, week.office_days
            );
        }
    }

    let mut notes: Vec<&DayEntry> = quarters
        .iter()
        .flat_map(|quarter| quarter.weeks.iter())
        .flat_map(|week| week.days.iter())
        .filter(|day| day.notes.is_some())
        .collect();
    notes.sort_by(|a, b| b.date.cmp(&a.date));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Notes");

    if notes.is_empty() {
        let _ = writeln!(output, "No notes recorded for this year.");
    } else {
        for day in notes.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} ({}): {}",
                day.date,
                day.location.as_str(),
                day.notes.as_deref().unwrap_or_default()
            );
        }
    }

    output
}
