//! Command-line front-end: argument parsing and command dispatch.
//!
//! Commands only talk to [`LogStore`]; they never touch the slot directly.

mod command;
mod error;

use std::io::Write;

use chrono::NaiveDate;

pub use command::{Cli, Command};
pub use error::CliError;

use crate::model::{
    DailyLog, RatingField, TRIGGER_WINDOW, TREND_WINDOW, is_common_trigger, last_days,
    rating_trend, sleep_trend, top_triggers, validate_rating, validate_sleep_hours,
    validate_sleep_quality,
};
use crate::storage::{LogStore, default_export_path, export_to_path, import_from_path};

/// One line summarising a day: averaged ratings and sleep.
pub fn format_summary(log: &DailyLog) -> String {
    let ratings: Vec<String> = RatingField::all()
        .iter()
        .map(|field| format!("{field} {:.1}", log.rating(*field).average()))
        .collect();
    format!(
        "{}  {}  sleep {:.1}h ({}/5)",
        log.date,
        ratings.join("  "),
        log.sleep_hours,
        log.sleep_quality
    )
}

/// Days shown by the `week` command.
const WEEK_DAYS: u64 = 7;

/// Today's entry, the trend of every rating and of sleep, and the most
/// frequent recent triggers.
fn write_summary(
    store: &LogStore,
    out: &mut impl Write,
    today: NaiveDate,
) -> Result<(), CliError> {
    let logs = store.list_all();
    let key = today.format("%Y-%m-%d").to_string();
    match logs.iter().find(|log| log.date == key) {
        Some(log) => writeln!(out, "Today: {}", format_summary(log))?,
        None => writeln!(out, "No entry for today ({key}) yet.")?,
    }

    writeln!(
        out,
        "Trends (last {TREND_WINDOW} logs against the {TREND_WINDOW} before):"
    )?;
    for field in RatingField::all() {
        writeln!(out, "  {field} {}", rating_trend(&logs, *field))?;
    }
    writeln!(out, "  sleep {}", sleep_trend(&logs))?;

    let triggers = top_triggers(&logs);
    if triggers.is_empty() {
        writeln!(out, "No triggers in the last {TRIGGER_WINDOW} logs.")?;
    } else {
        writeln!(out, "Top triggers (last {TRIGGER_WINDOW} logs):")?;
        for (label, count) in &triggers {
            writeln!(out, "  {label} {count}")?;
        }
    }
    Ok(())
}

/// Runs one command against `store`, writing user-facing output to `out`.
///
/// `today` anchors the summary and week views and names the default export
/// file.
pub fn run(
    command: Command,
    store: &LogStore,
    out: &mut impl Write,
    today: NaiveDate,
) -> Result<(), CliError> {
    match command {
        Command::List => {
            let logs = store.list_all();
            if logs.is_empty() {
                writeln!(out, "No logs yet.")?;
            }
            for log in &logs {
                writeln!(out, "{}", format_summary(log))?;
            }
        }
        Command::Show { date } => {
            let log = match store.get_by_date(&date) {
                Some(log) => log,
                None => {
                    writeln!(out, "No log saved for {date}; showing defaults.")?;
                    DailyLog::empty(date)
                }
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&log)?)?;
        }
        Command::Range { start, end } => {
            let mut logs = store.get_in_range(&start, &end);
            logs.reverse();
            if logs.is_empty() {
                writeln!(out, "No logs between {start} and {end}.")?;
            }
            for log in &logs {
                writeln!(out, "{}", format_summary(log))?;
            }
        }
        Command::Rate {
            date,
            field,
            period,
            value,
        } => {
            validate_rating(field, value)?;
            store.update(&date, |log| {
                log.rating_mut(field).set(period, value);
            })?;
            writeln!(out, "Set {field} ({period}) to {value} on {date}.")?;
        }
        Command::Sleep {
            date,
            hours,
            quality,
        } => {
            validate_sleep_hours(hours)?;
            validate_sleep_quality(quality)?;
            store.update(&date, |log| {
                log.sleep_hours = hours;
                log.sleep_quality = quality;
            })?;
            writeln!(out, "Recorded {hours}h of sleep ({quality}/5) on {date}.")?;
        }
        Command::Note { date, text } => {
            store.update(&date, |log| {
                log.general_notes = text;
            })?;
            writeln!(out, "Saved notes for {date}.")?;
        }
        Command::Trigger { date, label } => {
            let label = label.trim().to_string();
            let custom = !is_common_trigger(&label);
            let log = store.update(&date, |log| {
                log.add_trigger(label.clone());
            })?;
            writeln!(
                out,
                "Added {}trigger \"{label}\" on {date} ({} total).",
                if custom { "custom " } else { "" },
                log.triggers.len()
            )?;
        }
        Command::Delete { date } => {
            if store.delete_by_date(&date)? {
                writeln!(out, "Deleted log for {date}.")?;
            } else {
                writeln!(out, "No log for {date}.")?;
            }
        }
        Command::Clear { yes } => {
            if yes {
                let removed = store.clear()?;
                writeln!(out, "Deleted all logs ({removed}).")?;
            } else {
                writeln!(out, "This deletes every log. Run again with --yes to confirm.")?;
            }
        }
        Command::Summary => write_summary(store, out, today)?,
        Command::Week => {
            let logs = store.list_all();
            for (day, log) in last_days(&logs, today, WEEK_DAYS) {
                match log {
                    Some(log) => writeln!(out, "{} {}", day.format("%a"), format_summary(log))?,
                    None => writeln!(out, "{}", day.format("%a %Y-%m-%d  no entry"))?,
                }
            }
        }
        Command::Export { path } => {
            let path = match path {
                Some(path) => path,
                None => default_export_path(today)?,
            };
            export_to_path(store, &path)?;
            writeln!(out, "Exported logs to {}.", path.display())?;
        }
        Command::Import { path } => {
            let count = import_from_path(store, &path)?;
            writeln!(out, "Imported {count} logs from {}.", path.display())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::model::{TimeOfDayRating, TimePeriod, ValidationError};
    use crate::storage::StorageError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn run_ok(store: &LogStore, command: Command) -> String {
        let mut out = Vec::new();
        run(command, store, &mut out, today()).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn rate(date: &str, field: RatingField, period: TimePeriod, value: f64) -> Command {
        Command::Rate {
            date: date.to_string(),
            field,
            period,
            value,
        }
    }

    #[test]
    fn summary_line() {
        let mut log = DailyLog::empty("2024-01-01");
        log.dizziness = TimeOfDayRating {
            morning: 2.0,
            midday: 4.0,
            afternoon: 4.0,
            evening: 4.0,
        };
        log.sleep_hours = 7.5;
        assert_eq!(
            format_summary(&log),
            "2024-01-01  dizziness 3.5  stress 0.0  anxiety 0.0  mood 3.0  energy 5.0  fatigue 0.0  sleep 7.5h (3/5)"
        );
    }

    #[test]
    fn list_on_empty_store() {
        let store = LogStore::in_memory();
        assert_eq!(run_ok(&store, Command::List), "No logs yet.\n");
    }

    #[test]
    fn rate_creates_log_with_defaults() {
        let store = LogStore::in_memory();
        run_ok(
            &store,
            rate("2024-01-01", RatingField::Dizziness, TimePeriod::Morning, 6.0),
        );

        let log = store.get_by_date("2024-01-01").unwrap();
        assert_eq!(log.dizziness.morning, 6.0);
        assert_eq!(log.dizziness.evening, 0.0);
        assert_eq!(log.mood, TimeOfDayRating::uniform(3.0));
    }

    #[test]
    fn rate_updates_existing_log_in_place() {
        let store = LogStore::in_memory();
        run_ok(
            &store,
            rate("2024-01-01", RatingField::Stress, TimePeriod::Morning, 2.0),
        );
        let id = store.get_by_date("2024-01-01").unwrap().id;
        run_ok(
            &store,
            rate("2024-01-01", RatingField::Stress, TimePeriod::Evening, 8.0),
        );

        let logs = store.list_all();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, id);
        assert_eq!(logs[0].stress.morning, 2.0);
        assert_eq!(logs[0].stress.evening, 8.0);
    }

    #[test]
    fn rate_out_of_range_saves_nothing() {
        let store = LogStore::in_memory();
        let mut out = Vec::new();
        let result = run(
            rate("2024-01-01", RatingField::Mood, TimePeriod::Midday, 9.0),
            &store,
            &mut out,
            today(),
        );
        assert!(matches!(
            result,
            Err(CliError::Validation(ValidationError::RatingOutOfRange { .. }))
        ));
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn sleep_is_recorded() {
        let store = LogStore::in_memory();
        run_ok(
            &store,
            Command::Sleep {
                date: "2024-01-01".to_string(),
                hours: 6.5,
                quality: 2,
            },
        );
        let log = store.get_by_date("2024-01-01").unwrap();
        assert_eq!(log.sleep_hours, 6.5);
        assert_eq!(log.sleep_quality, 2);
    }

    #[test]
    fn sleep_quality_out_of_range_is_rejected() {
        let store = LogStore::in_memory();
        let mut out = Vec::new();
        let result = run(
            Command::Sleep {
                date: "2024-01-01".to_string(),
                hours: 6.5,
                quality: 9,
            },
            &store,
            &mut out,
            today(),
        );
        assert!(matches!(result, Err(CliError::Validation(_))));
    }

    #[test]
    fn note_replaces_general_notes() {
        let store = LogStore::in_memory();
        for text in ["first", "second"] {
            run_ok(
                &store,
                Command::Note {
                    date: "2024-01-01".to_string(),
                    text: text.to_string(),
                },
            );
        }
        assert_eq!(
            store.get_by_date("2024-01-01").unwrap().general_notes,
            "second"
        );
    }

    #[test]
    fn trigger_reports_custom_labels() {
        let store = LogStore::in_memory();
        let common = run_ok(
            &store,
            Command::Trigger {
                date: "2024-01-01".to_string(),
                label: "Screens".to_string(),
            },
        );
        let custom = run_ok(
            &store,
            Command::Trigger {
                date: "2024-01-01".to_string(),
                label: " Cheese ".to_string(),
            },
        );
        assert_eq!(common, "Added trigger \"Screens\" on 2024-01-01 (1 total).\n");
        assert_eq!(
            custom,
            "Added custom trigger \"Cheese\" on 2024-01-01 (2 total).\n"
        );
        assert_eq!(
            store.get_by_date("2024-01-01").unwrap().triggers,
            ["Screens", "Cheese"]
        );
    }

    #[test]
    fn show_missing_day_does_not_save() {
        let store = LogStore::in_memory();
        let output = run_ok(
            &store,
            Command::Show {
                date: "2024-01-01".to_string(),
            },
        );
        assert!(output.starts_with("No log saved for 2024-01-01"));
        assert!(output.contains("\"generalNotes\": \"\""));
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn range_lists_oldest_first() {
        let store = LogStore::in_memory();
        for date in ["2024-01-03", "2024-01-01", "2024-01-02", "2024-01-09"] {
            store.save(&DailyLog::empty(date)).unwrap();
        }
        let output = run_ok(
            &store,
            Command::Range {
                start: "2024-01-01".to_string(),
                end: "2024-01-03".to_string(),
            },
        );
        let dates: Vec<&str> = output
            .lines()
            .map(|line| line.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn delete_removes_day() {
        let store = LogStore::in_memory();
        store.save(&DailyLog::empty("2024-01-01")).unwrap();
        let output = run_ok(
            &store,
            Command::Delete {
                date: "2024-01-01".to_string(),
            },
        );
        assert_eq!(output, "Deleted log for 2024-01-01.\n");
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn delete_of_missing_day_says_so() {
        let store = LogStore::in_memory();
        store.save(&DailyLog::empty("2024-01-01")).unwrap();
        let output = run_ok(
            &store,
            Command::Delete {
                date: "2024-01-02".to_string(),
            },
        );
        assert_eq!(output, "No log for 2024-01-02.\n");
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn clear_without_confirmation_keeps_logs() {
        let store = LogStore::in_memory();
        store.save(&DailyLog::empty("2024-01-01")).unwrap();
        let output = run_ok(&store, Command::Clear { yes: false });
        assert!(output.contains("--yes"));
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn clear_deletes_every_log() {
        let store = LogStore::in_memory();
        store.save(&DailyLog::empty("2024-01-01")).unwrap();
        store.save(&DailyLog::empty("2024-01-02")).unwrap();
        let output = run_ok(&store, Command::Clear { yes: true });
        assert_eq!(output, "Deleted all logs (2).\n");
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn sleep_rejects_infinite_hours() {
        let store = LogStore::in_memory();
        let mut out = Vec::new();
        let result = run(
            Command::Sleep {
                date: "2024-01-01".to_string(),
                hours: f64::INFINITY,
                quality: 3,
            },
            &store,
            &mut out,
            today(),
        );
        assert!(matches!(
            result,
            Err(CliError::Validation(ValidationError::InvalidSleepHours(_)))
        ));
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn summary_of_empty_store() {
        let store = LogStore::in_memory();
        insta::assert_snapshot!(run_ok(&store, Command::Summary), @r"
        No entry for today (2024-06-01) yet.
        Trends (last 3 logs against the 3 before):
          dizziness flat
          stress flat
          anxiety flat
          mood flat
          energy flat
          fatigue flat
          sleep flat
        No triggers in the last 30 logs.
        ");
    }

    #[test]
    fn summary_reports_trends_and_triggers() {
        let store = LogStore::in_memory();
        let days = [(1, 2.0, 8.0), (2, 2.0, 8.0), (3, 2.0, 8.0), (4, 6.0, 5.0)];
        for (day, dizziness, sleep) in days {
            let mut log = DailyLog::empty(format!("2024-06-0{day}"));
            log.dizziness = TimeOfDayRating::uniform(dizziness);
            log.sleep_hours = sleep;
            log.add_trigger("Heat");
            if day % 2 == 0 {
                log.add_trigger("Screens");
            }
            store.save(&log).unwrap();
        }
        let mut out = Vec::new();
        run(Command::Summary, &store, &mut out, today()).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.starts_with("Today: 2024-06-01  dizziness 2.0"));
        // most recent three: 06-04, 06-03, 06-02; before them: 06-01
        assert!(output.contains("  dizziness up\n"));
        assert!(output.contains("  sleep down\n"));
        assert!(output.contains("  mood flat\n"));
        assert!(output.ends_with("Top triggers (last 30 logs):\n  Heat 4\n  Screens 2\n"));
    }

    #[test]
    fn week_marks_missing_days() {
        let store = LogStore::in_memory();
        store.save(&DailyLog::empty("2024-06-01")).unwrap();
        store.save(&DailyLog::empty("2024-05-28")).unwrap();
        store.save(&DailyLog::empty("2024-05-01")).unwrap();
        let output = run_ok(&store, Command::Week);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Sun 2024-05-26  no entry");
        assert!(lines[2].starts_with("Tue 2024-05-28  dizziness 0.0"));
        assert!(lines[6].starts_with("Sat 2024-06-01  dizziness 0.0"));
    }

    #[test]
    fn export_and_import_through_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let source = LogStore::in_memory();
        source.save(&DailyLog::empty("2024-01-01")).unwrap();
        source.save(&DailyLog::empty("2024-01-02")).unwrap();

        run_ok(&source, Command::Export { path: Some(path.clone()) });
        assert!(fs::metadata(&path).is_ok());

        let target = LogStore::in_memory();
        let output = run_ok(&target, Command::Import { path: path.clone() });
        assert!(output.starts_with("Imported 2 logs"));
        assert_eq!(target.list_all(), source.list_all());
    }

    #[test]
    fn import_of_bad_file_keeps_existing_logs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        let store = LogStore::in_memory();
        store.save(&DailyLog::empty("2024-01-01")).unwrap();

        let mut out = Vec::new();
        let result = run(Command::Import { path }, &store, &mut out, today());
        assert!(matches!(
            result,
            Err(CliError::Storage(StorageError::InvalidSnapshot(_)))
        ));
        assert_eq!(store.list_all().len(), 1);
    }
}
