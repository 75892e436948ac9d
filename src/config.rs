//! Settings file for the compliance CLI: the attendance policy and where the
//! day log lives.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::models::ComplianceConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub policy: ComplianceConfig,
    #[serde(default)]
    pub entries: Entries,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entries {
    pub path: String,
}

impl Default for Entries {
    fn default() -> Self {
        Self {
            path: "attendance.csv".to_string(),
        }
    }
}

/// Load settings from a YAML file and validate them.
pub fn load(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = serde_yaml::from_str(content)?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.entries.path.trim().is_empty() {
        return Err(ConfigError::Invalid("entries.path must be non-empty"));
    }

    let policy = &settings.policy;
    if policy.warning_threshold_weeks > policy.required_compliant_weeks_per_quarter {
        warn!(
            warning_threshold_weeks = policy.warning_threshold_weeks,
            required_compliant_weeks_per_quarter = policy.required_compliant_weeks_per_quarter,
            "warning threshold exceeds compliant threshold; warning status is unreachable"
        );
    }

    Ok(())
}

pub fn example() -> &'static str {
    r#"policy:
  required_office_days_per_week: 2
  required_compliant_weeks_per_quarter: 8
  warning_threshold_weeks: 7

entries:
  path: "./attendance.csv"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_example_ok() {
        let settings = parse(example()).unwrap();
        assert_eq!(settings.policy, ComplianceConfig::default());
        assert_eq!(settings.entries.path, "./attendance.csv");
    }

    #[test]
    fn missing_policy_falls_back_to_defaults() {
        let settings = parse("entries:\n  path: days.csv\n").unwrap();
        assert_eq!(settings.policy, ComplianceConfig::default());
        assert_eq!(settings.entries.path, "days.csv");
    }

    #[test]
    fn partial_policy_keeps_remaining_defaults() {
        let settings = parse("policy: {required_office_days_per_week: 3}\n").unwrap();
        assert_eq!(settings.policy.required_office_days_per_week, 3);
        assert_eq!(settings.policy.required_compliant_weeks_per_quarter, 8);
        assert_eq!(settings.policy.warning_threshold_weeks, 7);
    }

    #[test]
    fn custom_policy_is_read() {
        let settings = parse(
            "policy:\n  required_office_days_per_week: 3\n  required_compliant_weeks_per_quarter: 10\n  warning_threshold_weeks: 8\n",
        )
        .unwrap();
        assert_eq!(settings.policy.required_office_days_per_week, 3);
        assert_eq!(settings.policy.required_compliant_weeks_per_quarter, 10);
        assert_eq!(settings.policy.warning_threshold_weeks, 8);
    }

    #[test]
    fn empty_entries_path_is_invalid() {
        let err = parse("entries:\n  path: \"  \"\n").unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("entries.path")),
            _ => panic!("wrong error"),
        }
    }

    #[test]
    fn inverted_thresholds_are_accepted() {
        let settings = parse(
            "policy:\n  required_office_days_per_week: 2\n  required_compliant_weeks_per_quarter: 6\n  warning_threshold_weeks: 9\n",
        )
        .unwrap();
        assert_eq!(settings.policy.warning_threshold_weeks, 9);
    }

    #[test]
    fn negative_thresholds_fail_to_parse() {
        let err = parse("policy:\n  required_office_days_per_week: -1\n  required_compliant_weeks_per_quarter: 8\n  warning_threshold_weeks: 7\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file_ok() {
        let td = tempdir().unwrap();
        let p = td.path().join("rto.yaml");
        fs::write(&p, example()).unwrap();
        let settings = load(&p).unwrap();
        assert_eq!(settings.policy.warning_threshold_weeks, 7);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let td = tempdir().unwrap();
        let err = load(&td.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
