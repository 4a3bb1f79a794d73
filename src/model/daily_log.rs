use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::rating::{RatingField, TimeOfDayRating};

/// Generates a fresh record identifier.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn default_sleep_quality() -> u8 {
    3
}

/// Reads a whole-number count (minutes, glasses, cups) from any JSON number.
///
/// Fractions are rounded to the nearest whole number. Negative, non-finite,
/// and non-numeric values have no count.
pub(crate) fn count_from_value(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return Some(u32::try_from(n).unwrap_or(u32::MAX));
    }
    match value.as_f64() {
        // `as` saturates at u32::MAX
        Some(n) if n.is_finite() && n >= 0.0 => Some(n.round() as u32),
        _ => None,
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value).unwrap_or_default())
}

fn lenient_intensity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Intensity, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(Intensity::deserialize(&value).unwrap_or_default())
}

fn default_mood() -> TimeOfDayRating {
    TimeOfDayRating::uniform(RatingField::Mood.default_value())
}

fn default_energy() -> TimeOfDayRating {
    TimeOfDayRating::uniform(RatingField::Energy.default_value())
}

/// A meal eaten during the day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meal {
    pub name: String,
    pub time: String,
    pub notes: String,
}

/// How hard an exercise session was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    #[default]
    Light,
    Moderate,
    Vigorous,
}

/// An exercise session and how symptoms responded to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Exercise {
    #[serde(rename = "type")]
    pub kind: String,
    /// Minutes.
    #[serde(deserialize_with = "lenient_count")]
    pub duration: u32,
    #[serde(deserialize_with = "lenient_intensity")]
    pub intensity: Intensity,
    pub symptom_response: String,
}

/// A medication dose taken during the day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub time: String,
    pub side_effects: String,
}

/// Everything recorded for one calendar day.
///
/// `date` is the identity of a log within the store; `id` is carried along
/// but never used for lookup. Deserializing requires `dizziness` to be a
/// time-of-day mapping; missing fields take the value [`DailyLog::empty`]
/// would give them. The store itself decodes stored elements field by field
/// (see `storage::migrate`), so one malformed field never hides the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    #[serde(default = "new_id")]
    pub id: String,
    /// `YYYY-MM-DD`.
    pub date: String,

    /// 0–10.
    pub dizziness: TimeOfDayRating,
    #[serde(default)]
    pub dizziness_notes: String,

    #[serde(default)]
    pub sleep_hours: f64,
    /// 1–5.
    #[serde(default = "default_sleep_quality")]
    pub sleep_quality: u8,

    #[serde(default)]
    pub meals: Vec<Meal>,
    /// Glasses.
    #[serde(default, deserialize_with = "lenient_count")]
    pub water_intake: u32,
    /// Cups.
    #[serde(default, deserialize_with = "lenient_count")]
    pub caffeine_intake: u32,
    /// Drinks.
    #[serde(default, deserialize_with = "lenient_count")]
    pub alcohol_intake: u32,

    #[serde(default)]
    pub exercises: Vec<Exercise>,

    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub trigger_notes: String,

    /// 0–10.
    #[serde(default)]
    pub stress: TimeOfDayRating,
    /// 0–10.
    #[serde(default)]
    pub anxiety: TimeOfDayRating,
    /// 1–5.
    #[serde(default = "default_mood")]
    pub mood: TimeOfDayRating,

    #[serde(default)]
    pub medications: Vec<Medication>,

    /// 0–10.
    #[serde(default = "default_energy")]
    pub energy: TimeOfDayRating,
    /// 0–10.
    #[serde(default)]
    pub fatigue: TimeOfDayRating,

    #[serde(default)]
    pub general_notes: String,
}

impl DailyLog {
    /// Creates an unsaved log for `date` with every field at its default.
    ///
    /// Ratings start at zero except mood (3) and energy (5); sleep quality
    /// starts at 3. A fresh `id` is generated.
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            date: date.into(),
            dizziness: TimeOfDayRating::default(),
            dizziness_notes: String::new(),
            sleep_hours: 0.0,
            sleep_quality: default_sleep_quality(),
            meals: Vec::new(),
            water_intake: 0,
            caffeine_intake: 0,
            alcohol_intake: 0,
            exercises: Vec::new(),
            triggers: Vec::new(),
            trigger_notes: String::new(),
            stress: TimeOfDayRating::default(),
            anxiety: TimeOfDayRating::default(),
            mood: default_mood(),
            medications: Vec::new(),
            energy: default_energy(),
            fatigue: TimeOfDayRating::default(),
            general_notes: String::new(),
        }
    }

    /// Returns the rating stored for `field`.
    pub fn rating(&self, field: RatingField) -> &TimeOfDayRating {
        match field {
            RatingField::Dizziness => &self.dizziness,
            RatingField::Stress => &self.stress,
            RatingField::Anxiety => &self.anxiety,
            RatingField::Mood => &self.mood,
            RatingField::Energy => &self.energy,
            RatingField::Fatigue => &self.fatigue,
        }
    }

    /// Returns a mutable reference to the rating stored for `field`.
    pub fn rating_mut(&mut self, field: RatingField) -> &mut TimeOfDayRating {
        match field {
            RatingField::Dizziness => &mut self.dizziness,
            RatingField::Stress => &mut self.stress,
            RatingField::Anxiety => &mut self.anxiety,
            RatingField::Mood => &mut self.mood,
            RatingField::Energy => &mut self.energy,
            RatingField::Fatigue => &mut self.fatigue,
        }
    }

    /// Adds a trigger label. Duplicates are kept.
    pub fn add_trigger(&mut self, label: impl Into<String>) {
        self.triggers.push(label.into());
    }
}
