use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::{RatingField, TimePeriod, validate_date};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "daybook", version, about = "Offline daily health journal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Everything the journal can be asked to do from the command line.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List every logged day, most recent first.
    List,
    /// Print the log for a day as JSON.
    Show {
        #[arg(value_parser = parse_date)]
        date: String,
    },
    /// Summarise the days between two dates (inclusive), oldest first.
    Range {
        #[arg(value_parser = parse_date)]
        start: String,
        #[arg(value_parser = parse_date)]
        end: String,
    },
    /// Set one time-of-day rating.
    Rate {
        #[arg(value_parser = parse_date)]
        date: String,
        /// dizziness, stress, anxiety, mood, energy, or fatigue.
        #[arg(value_parser = parse_field)]
        field: RatingField,
        /// morning, midday, afternoon, or evening.
        #[arg(value_parser = parse_period)]
        period: TimePeriod,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Record last night's sleep.
    Sleep {
        #[arg(value_parser = parse_date)]
        date: String,
        #[arg(allow_negative_numbers = true)]
        hours: f64,
        /// 1 (poor) to 5 (excellent).
        quality: u8,
    },
    /// Replace the general notes for a day.
    Note {
        #[arg(value_parser = parse_date)]
        date: String,
        text: String,
    },
    /// Add a trigger label to a day.
    Trigger {
        #[arg(value_parser = parse_date)]
        date: String,
        label: String,
    },
    /// Delete the log for a day.
    Delete {
        #[arg(value_parser = parse_date)]
        date: String,
    },
    /// Delete every log.
    Clear {
        /// Confirm that every log should be deleted.
        #[arg(long)]
        yes: bool,
    },
    /// Show today's entry, recent trends, and the most frequent triggers.
    Summary,
    /// Summarise each of the last seven days, oldest first.
    Week,
    /// Write every log to a JSON file.
    Export {
        /// Defaults to ~/daybook-YYYYMMDD.json.
        path: Option<PathBuf>,
    },
    /// Replace every log with the contents of a JSON export.
    Import { path: PathBuf },
}

fn parse_date(s: &str) -> Result<String, String> {
    validate_date(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

fn parse_field(s: &str) -> Result<RatingField, String> {
    RatingField::from_key(s).ok_or_else(|| format!("unknown rating field: {s}"))
}

fn parse_period(s: &str) -> Result<TimePeriod, String> {
    TimePeriod::from_key(s).ok_or_else(|| format!("unknown time of day: {s}"))
}
