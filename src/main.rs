use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use rto_compliance::config::{self, Settings};
use rto_compliance::entries::{self, DayLog};
use rto_compliance::models::{ComplianceConfig, DayEntry, QuarterSummary, WeekRef, WeekSummary};
use rto_compliance::{calendar, compliance, report};

const DEFAULT_CONFIG_PATH: &str = "rto.yaml";
const MIN_YEAR: i64 = 1;
const MAX_YEAR: i64 = 9999;

#[derive(Parser)]
#[command(name = "rto-compliance")]
#[command(about = "Track office attendance against a return-to-office policy", long_about = None)]
struct Cli {
    /// Path to YAML settings file (defaults to ./rto.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// CSV of day entries; overrides entries.path from the settings file
    #[arg(long, global = true)]
    entries: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize one ISO week
    Week {
        #[arg(long, value_parser = clap::value_parser!(i32).range(MIN_YEAR..=MAX_YEAR))]
        year: Option<i32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=53))]
        week: Option<u32>,
    },
    /// Summarize one quarter
    Quarter {
        #[arg(long, value_parser = clap::value_parser!(i32).range(MIN_YEAR..=MAX_YEAR))]
        year: Option<i32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=4))]
        quarter: Option<u32>,
    },
    /// Summarize all four quarters of a year
    Year {
        #[arg(long, value_parser = clap::value_parser!(i32).range(MIN_YEAR..=MAX_YEAR))]
        year: Option<i32>,
    },
    /// Generate a markdown report for a year
    Report {
        #[arg(long, value_parser = clap::value_parser!(i32).range(MIN_YEAR..=MAX_YEAR))]
        year: Option<i32>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Print an example settings file
    ExampleConfig,
}

fn load_settings(path: Option<&Path>, default_path: &Path) -> anyhow::Result<Settings> {
    match path {
        Some(path) => config::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => {
            if default_path.exists() {
                return config::load(default_path).with_context(|| {
                    format!("failed to load settings from {}", default_path.display())
                });
            }
            info!(path = %default_path.display(), "no settings file found, using default policy");
            Ok(Settings::default())
        }
    }
}

/// An `--entries` path given on the command line must exist; the settings
/// default may be absent, in which case every day reads as home.
fn load_entries(path: &Path, explicit: bool) -> anyhow::Result<DayLog> {
    if !path.exists() {
        if explicit {
            bail!("entries file {} does not exist", path.display());
        }
        warn!(path = %path.display(), "entries file not found, treating every day as home");
        return Ok(DayLog::new());
    }
    entries::read_csv(path)
}

/// Resolves the policy and the day-entry snapshot the engine runs against.
fn load_inputs(
    config_path: Option<&Path>,
    entries_path: Option<&Path>,
) -> anyhow::Result<(ComplianceConfig, Vec<DayEntry>)> {
    let settings = load_settings(config_path, Path::new(DEFAULT_CONFIG_PATH))?;
    let log = match entries_path {
        Some(path) => load_entries(path, true)?,
        None => load_entries(Path::new(&settings.entries.path), false)?,
    };
    Ok((settings.policy, log.entries()))
}

/// Fills in the current week and rejects week 53 for years that only have 52.
fn resolve_week(
    year: Option<i32>,
    week: Option<u32>,
    today: NaiveDate,
) -> anyhow::Result<WeekRef> {
    let current = calendar::current_week(today);
    let year = year.unwrap_or(current.year);
    let week = week.unwrap_or(current.week);
    let last = calendar::weeks_in_iso_year(year);
    if week > last {
        bail!("{year} has only {last} ISO weeks, week {week} does not exist");
    }
    Ok(WeekRef { year, week })
}

fn print_week(week: &WeekSummary) {
    let status = if week.is_compliant {
        "compliant"
    } else {
        "not compliant"
    };
    println!(
        "{}-W{:02} ({} to {}): {} office days, {}",
        week.year, week.week_number, week.start_date, week.end_date, week.office_days, status
    );
    for day in week.days.iter() {
        match day.notes.as_deref() {
            Some(note) => println!("  {} {:<8} {}", day.date, day.location.as_str(), note),
            None => println!("  {} {}", day.date, day.location.as_str()),
        }
    }
}

fn print_quarter(quarter: &QuarterSummary, needed: u32) {
    println!(
        "Q{} {}: {} ({}/{} compliant weeks, {} more needed)",
        quarter.quarter,
        quarter.year,
        quarter.status.as_str(),
        quarter.compliant_weeks,
        quarter.total_weeks,
        needed
    );
    for week in quarter.weeks.iter() {
        let mark = if week.is_compliant { "+" } else { "-" };
        println!(
            "  {} {}-W{:02} {} office days",
            mark, week.year, week.week_number, week.office_days
        );
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let today = Utc::now().date_naive();

    match cli.command {
        Commands::ExampleConfig => print!("{}", config::example()),
        Commands::Week { year, week } => {
            let (policy, days) = load_inputs(cli.config.as_deref(), cli.entries.as_deref())?;
            let target = resolve_week(year, week, today)?;
            let summary = compliance::summarize_week(target.year, target.week, &policy, &days);
            match cli.format {
                Format::Json => print_json(&summary)?,
                Format::Text => print_week(&summary),
            }
        }
        Commands::Quarter { year, quarter } => {
            let (policy, days) = load_inputs(cli.config.as_deref(), cli.entries.as_deref())?;
            let (current_year, current_quarter) = calendar::current_quarter(today);
            let summary = compliance::summarize_quarter(
                year.unwrap_or(current_year),
                quarter.unwrap_or(current_quarter),
                &policy,
                &days,
            );
            match cli.format {
                Format::Json => print_json(&summary)?,
                Format::Text => print_quarter(&summary, compliance::weeks_needed(&summary, &policy)),
            }
        }
        Commands::Year { year } => {
            let (policy, days) = load_inputs(cli.config.as_deref(), cli.entries.as_deref())?;
            let (current_year, _) = calendar::current_quarter(today);
            let quarters =
                compliance::summarize_year(year.unwrap_or(current_year), &policy, &days);
            match cli.format {
                Format::Json => print_json(&quarters)?,
                Format::Text => {
                    for quarter in quarters.iter() {
                        print_quarter(quarter, compliance::weeks_needed(quarter, &policy));
                    }
                }
            }
        }
        Commands::Report { year, out } => {
            let (policy, days) = load_inputs(cli.config.as_deref(), cli.entries.as_deref())?;
            let (current_year, _) = calendar::current_quarter(today);
            let report = report::build_report(year.unwrap_or(current_year), &policy, &days);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
