use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::{DayEntry, Location};

/// Day records keyed by date; at most one per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayLog {
    days: BTreeMap<NaiveDate, DayEntry>,
}

impl DayLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `entry.date`, returning the one it replaced.
    pub fn upsert(&mut self, entry: DayEntry) -> Option<DayEntry> {
        self.days.insert(entry.date, entry)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.days.get(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Snapshot in date order.
    pub fn entries(&self) -> Vec<DayEntry> {
        self.days.values().cloned().collect()
    }
}

impl FromIterator<DayEntry> for DayLog {
    fn from_iter<I: IntoIterator<Item = DayEntry>>(iter: I) -> Self {
        let mut log = DayLog::new();
        for entry in iter {
            log.upsert(entry);
        }
        log
    }
}

#[derive(serde::Deserialize)]
struct CsvRow {
    date: NaiveDate,
    location: Location,
    #[serde(default)]
    notes: Option<String>,
}

/// Reads `date,location,notes` rows. Later rows for a date replace earlier ones.
pub fn read_csv(csv_path: &Path) -> anyhow::Result<DayLog> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut log = DayLog::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| {
            format!("invalid row {} in {}", index + 1, csv_path.display())
        })?;
        let notes = row.notes.filter(|note| !note.is_empty());

        if let Some(previous) = log.upsert(DayEntry {
            date: row.date,
            location: row.location,
            notes,
        }) {
            debug!(date = %previous.date, "replaced earlier entry");
        }
    }

    info!(days = log.len(), path = %csv_path.display(), "loaded day entries");
    Ok(log)
}
