//! Read-time migration from the legacy record shape.
//!
//! Older records stored each rating as one number per day under a different
//! key (`dizzinessSeverity`, `stressLevel`, ...). Current records store a
//! time-of-day mapping under the field name itself. The shape of `dizziness`
//! alone decides which one a stored element is: a mapping means current,
//! anything else means legacy.
//!
//! Both shapes are decoded field by field. A field that is missing or has the
//! wrong type takes the value [`DailyLog::empty`] gives it, and the rest of
//! the record is kept. Only an element that is not an object, or has no
//! string `date`, is unreadable. Nothing here writes back to storage.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{DailyLog, RatingField, TimeOfDayRating, TimePeriod, count_from_value};

/// Why a stored element could not be decoded at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("entry is not a JSON object")]
    NotAnObject,
    #[error("entry has no date")]
    MissingDate,
}

/// The outcome of decoding one stored element.
#[derive(Debug)]
pub enum Decoded {
    /// The element was already in the current shape.
    Current(DailyLog),
    /// The element was in the legacy shape and has been converted.
    Legacy(DailyLog),
    /// The element has no usable identity.
    Unreadable(DecodeError),
}

impl Decoded {
    /// Returns the decoded log, or `None` if the element was unreadable.
    pub fn into_log(self) -> Option<DailyLog> {
        match self {
            Self::Current(log) | Self::Legacy(log) => Some(log),
            Self::Unreadable(_) => None,
        }
    }
}

/// Decodes a stored element into a current-shape [`DailyLog`].
pub fn decode(value: &Value) -> Decoded {
    let Some(record) = value.as_object() else {
        return Decoded::Unreadable(DecodeError::NotAnObject);
    };
    let Some(date) = record.get("date").and_then(Value::as_str) else {
        return Decoded::Unreadable(DecodeError::MissingDate);
    };

    let mut log = decode_common(record, date);
    let current = record.get("dizziness").is_some_and(Value::is_object);
    for field in RatingField::all() {
        *log.rating_mut(*field) = if current {
            current_rating(record.get(field.key()), *field)
        } else {
            broadcast(record.get(field.legacy_key()), *field)
        };
    }

    if current {
        Decoded::Current(log)
    } else {
        Decoded::Legacy(log)
    }
}

/// Decodes every field the two shapes share.
fn decode_common(record: &Map<String, Value>, date: &str) -> DailyLog {
    let mut log = DailyLog::empty(date);

    assign(&mut log.id, field(record, "id"));
    assign(&mut log.dizziness_notes, field(record, "dizzinessNotes"));
    assign(
        &mut log.sleep_hours,
        record.get("sleepHours").and_then(Value::as_f64),
    );
    assign(
        &mut log.sleep_quality,
        record
            .get("sleepQuality")
            .and_then(count_from_value)
            .and_then(|n| u8::try_from(n).ok()),
    );
    log.meals = list(record, "meals");
    for (key, slot) in [
        ("waterIntake", &mut log.water_intake),
        ("caffeineIntake", &mut log.caffeine_intake),
        ("alcoholIntake", &mut log.alcohol_intake),
    ] {
        assign(slot, record.get(key).and_then(count_from_value));
    }
    log.exercises = list(record, "exercises");
    log.triggers = list(record, "triggers");
    assign(&mut log.trigger_notes, field(record, "triggerNotes"));
    log.medications = list(record, "medications");
    assign(&mut log.general_notes, field(record, "generalNotes"));

    log
}

fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Decodes `record[key]`, or `None` if it is missing or malformed.
fn field<T: DeserializeOwned>(record: &Map<String, Value>, key: &str) -> Option<T> {
    let value = record.get(key)?;
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::debug!(key, error = %e, "ignoring malformed field");
            None
        }
    }
}

/// Decodes the elements of the array `record[key]`, dropping malformed ones.
fn list<T: DeserializeOwned>(record: &Map<String, Value>, key: &str) -> Vec<T> {
    match record.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Reads a current-shape rating. Periods that are missing or not numbers take
/// the field's default; a bare number is spread over the whole day.
fn current_rating(value: Option<&Value>, field: RatingField) -> TimeOfDayRating {
    let Some(Value::Object(periods)) = value else {
        return broadcast(value, field);
    };
    let mut rating = TimeOfDayRating::uniform(field.default_value());
    for period in TimePeriod::all() {
        if let Some(n) = periods.get(period.key()).and_then(Value::as_f64) {
            rating.set(*period, n);
        }
    }
    rating
}

/// Copies a legacy scalar into all four periods, or the field's default if
/// the scalar is missing or not a number.
fn broadcast(value: Option<&Value>, field: RatingField) -> TimeOfDayRating {
    let n = value
        .and_then(Value::as_f64)
        .unwrap_or_else(|| field.default_value());
    TimeOfDayRating::uniform(n)
}
