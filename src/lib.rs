//! Return-to-office attendance compliance.
//!
//! The engine (`calendar`, `compliance`) is a set of pure functions over a
//! snapshot of [`DayEntry`] records and a resolved [`ComplianceConfig`].
//! `entries`, `config` and `report` support the command-line front end.

pub mod calendar;
pub mod compliance;
pub mod config;
pub mod entries;
pub mod models;
pub mod report;

pub use models::{
    ComplianceConfig, DayEntry, Location, QuarterStatus, QuarterSummary, WeekRef, WeekSummary,
    DEFAULT_COMPLIANCE_CONFIG,
};
