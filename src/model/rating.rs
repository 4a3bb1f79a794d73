use std::fmt;

use serde::{Deserialize, Serialize};

/// A part of the day that a rating applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    Morning,
    Midday,
    Afternoon,
    Evening,
}

static ALL_PERIODS: &[TimePeriod] = &[
    TimePeriod::Morning,
    TimePeriod::Midday,
    TimePeriod::Afternoon,
    TimePeriod::Evening,
];

impl TimePeriod {
    /// Returns all periods in the order they occur during a day.
    pub fn all() -> &'static [TimePeriod] {
        ALL_PERIODS
    }

    /// Returns the key used for this period in stored records.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Midday => "midday",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    /// Returns the human-readable label for this period.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Midday => "Midday",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }

    /// Parses a period from its stored key, ignoring ASCII case.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.key().eq_ignore_ascii_case(key))
    }
}

#[mutants::skip]
impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A severity recorded separately for each part of the day.
///
/// Missing periods decode as `0.0`, so a partially written mapping still
/// yields a complete rating.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeOfDayRating {
    #[serde(default)]
    pub morning: f64,
    #[serde(default)]
    pub midday: f64,
    #[serde(default)]
    pub afternoon: f64,
    #[serde(default)]
    pub evening: f64,
}

impl TimeOfDayRating {
    /// Returns a rating with the same value in every period.
    pub fn uniform(value: f64) -> Self {
        Self {
            morning: value,
            midday: value,
            afternoon: value,
            evening: value,
        }
    }

    /// Returns the value recorded for `period`.
    pub fn get(&self, period: TimePeriod) -> f64 {
        match period {
            TimePeriod::Morning => self.morning,
            TimePeriod::Midday => self.midday,
            TimePeriod::Afternoon => self.afternoon,
            TimePeriod::Evening => self.evening,
        }
    }

    /// Sets the value recorded for `period`.
    pub fn set(&mut self, period: TimePeriod, value: f64) {
        let slot = match period {
            TimePeriod::Morning => &mut self.morning,
            TimePeriod::Midday => &mut self.midday,
            TimePeriod::Afternoon => &mut self.afternoon,
            TimePeriod::Evening => &mut self.evening,
        };
        *slot = value;
    }

    /// Collapses the four periods to one number: the mean, rounded to one
    /// decimal place.
    pub fn average(&self) -> f64 {
        let mean = (self.morning + self.midday + self.afternoon + self.evening) / 4.0;
        (mean * 10.0).round() / 10.0
    }
}

/// The six rating fields of a daily log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingField {
    Dizziness,
    Stress,
    Anxiety,
    Mood,
    Energy,
    Fatigue,
}

static ALL_FIELDS: &[RatingField] = &[
    RatingField::Dizziness,
    RatingField::Stress,
    RatingField::Anxiety,
    RatingField::Mood,
    RatingField::Energy,
    RatingField::Fatigue,
];

impl RatingField {
    /// Returns all rating fields in display order.
    pub fn all() -> &'static [RatingField] {
        ALL_FIELDS
    }

    /// Returns the key used for this field in current-shape records.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Dizziness => "dizziness",
            Self::Stress => "stress",
            Self::Anxiety => "anxiety",
            Self::Mood => "mood",
            Self::Energy => "energy",
            Self::Fatigue => "fatigue",
        }
    }

    /// Returns the key this field had in legacy records, where it held one
    /// number for the whole day.
    pub fn legacy_key(&self) -> &'static str {
        match self {
            Self::Dizziness => "dizzinessSeverity",
            Self::Stress => "stressLevel",
            Self::Anxiety => "anxietyLevel",
            Self::Mood => "mood",
            Self::Energy => "energyLevel",
            Self::Fatigue => "fatigueSeverity",
        }
    }

    /// Inclusive bounds of a valid value.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Mood => (1.0, 5.0),
            _ => (0.0, 10.0),
        }
    }

    /// The value every period takes in a freshly created log.
    pub fn default_value(&self) -> f64 {
        match self {
            Self::Mood => 3.0,
            Self::Energy => 5.0,
            _ => 0.0,
        }
    }

    /// Parses a field from its key, ignoring ASCII case.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(key))
    }
}

#[mutants::skip]
impl fmt::Display for RatingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
