use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use super::daily_log::DailyLog;
use super::rating::{RatingField, TimePeriod};

/// Validation errors for daily log fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
    #[error("{field} must be between {min} and {max}, got {value}")]
    RatingOutOfRange {
        field: RatingField,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("sleep quality must be between 1 and 5, got {0}")]
    InvalidSleepQuality(u8),
    #[error("sleep hours must be a non-negative number, got {0}")]
    InvalidSleepHours(f64),
    #[error("{field} ({period}) must be a finite number, got {value}")]
    NonFiniteRating {
        field: RatingField,
        period: TimePeriod,
        value: f64,
    },
}

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid hardcoded regex"));

/// Validates a calendar date in `YYYY-MM-DD` form.
///
/// Both the shape and the calendar are checked, so `2024-02-30` is rejected.
/// Lexicographic order of valid dates equals chronological order.
pub fn validate_date(date: &str) -> Result<(), ValidationError> {
    if DATE_RE.is_match(date) && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err(ValidationError::InvalidDate(date.to_string()))
    }
}

/// Validates that `value` lies within the inclusive range of `field`.
pub fn validate_rating(field: RatingField, value: f64) -> Result<(), ValidationError> {
    let (min, max) = field.range();
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Validates a 1–5 sleep quality score.
pub fn validate_sleep_quality(quality: u8) -> Result<(), ValidationError> {
    if (1..=5).contains(&quality) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSleepQuality(quality))
    }
}

/// Validates that sleep hours are a finite, non-negative number.
pub fn validate_sleep_hours(hours: f64) -> Result<(), ValidationError> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidSleepHours(hours))
    }
}

/// Checks what a log must satisfy before it is stored.
///
/// JSON has no encoding for NaN or infinity, so a non-finite rating or sleep
/// value would come back as `null`. Rating ranges are left to callers.
pub fn validate_log(log: &DailyLog) -> Result<(), ValidationError> {
    validate_date(&log.date)?;
    validate_sleep_hours(log.sleep_hours)?;
    for field in RatingField::all() {
        let rating = log.rating(*field);
        for period in TimePeriod::all() {
            let value = rating.get(*period);
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteRating {
                    field: *field,
                    period: *period,
                    value,
                });
            }
        }
    }
    Ok(())
}
