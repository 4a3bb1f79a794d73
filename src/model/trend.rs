//! Indicators derived from the accumulated history.
//!
//! Every function here takes logs in store order (most recent date first),
//! as returned by `LogStore::list_all`.

use std::collections::HashMap;
use std::fmt;

use chrono::{Days, NaiveDate};

use super::daily_log::DailyLog;
use super::rating::RatingField;

/// How many of the most recent logs are compared with the ones before them.
pub const TREND_WINDOW: usize = 3;

/// Changes of the mean smaller than this are reported as [`Trend::Flat`].
pub const TREND_THRESHOLD: f64 = 0.5;

/// How many of the most recent logs trigger frequencies are counted over.
pub const TRIGGER_WINDOW: usize = 30;

/// How many triggers [`top_triggers`] reports at most.
pub const TOP_TRIGGERS: usize = 8;

/// Which way a value has moved recently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[mutants::skip]
impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        })
    }
}

fn mean(logs: &[DailyLog], value: &impl Fn(&DailyLog) -> f64) -> f64 {
    logs.iter().map(value).sum::<f64>() / logs.len() as f64
}

/// Compares the mean of `value` over the [`TREND_WINDOW`] most recent logs
/// with its mean over the window before that.
///
/// With no earlier window to compare against the trend is flat.
pub fn trend_by(logs: &[DailyLog], value: impl Fn(&DailyLog) -> f64) -> Trend {
    if logs.len() <= TREND_WINDOW {
        return Trend::Flat;
    }
    let recent = &logs[..TREND_WINDOW];
    let older = &logs[TREND_WINDOW..logs.len().min(2 * TREND_WINDOW)];

    let diff = mean(recent, &value) - mean(older, &value);
    if diff.abs() < TREND_THRESHOLD || diff.is_nan() {
        Trend::Flat
    } else if diff > 0.0 {
        Trend::Up
    } else {
        Trend::Down
    }
}

/// Trend of a rating field's daily average.
pub fn rating_trend(logs: &[DailyLog], field: RatingField) -> Trend {
    trend_by(logs, |log| log.rating(field).average())
}

/// Trend of hours slept.
pub fn sleep_trend(logs: &[DailyLog]) -> Trend {
    trend_by(logs, |log| log.sleep_hours)
}

/// The most frequent triggers over the [`TRIGGER_WINDOW`] most recent logs,
/// at most [`TOP_TRIGGERS`] of them, most frequent first.
///
/// Labels are counted exactly as recorded. Ties keep the order in which the
/// labels were first seen.
pub fn top_triggers(logs: &[DailyLog]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for log in logs.iter().take(TRIGGER_WINDOW) {
        for trigger in &log.triggers {
            match index.get(trigger.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(trigger.as_str(), counts.len());
                    counts.push((trigger.clone(), 1));
                }
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_TRIGGERS);
    counts
}

/// The `days` calendar days ending with `today`, oldest first, each paired
/// with its log if one exists.
pub fn last_days(
    logs: &[DailyLog],
    today: NaiveDate,
    days: u64,
) -> Vec<(NaiveDate, Option<&DailyLog>)> {
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|day| {
            let key = day.format("%Y-%m-%d").to_string();
            (day, logs.iter().find(|log| log.date == key))
        })
        .collect()
}
