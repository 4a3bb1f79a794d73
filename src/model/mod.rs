mod daily_log;
mod rating;
mod trend;
mod validation;
mod vocab;

pub(crate) use daily_log::count_from_value;
pub use daily_log::{DailyLog, Exercise, Intensity, Meal, Medication};
pub use rating::{RatingField, TimeOfDayRating, TimePeriod};
pub use trend::{
    TOP_TRIGGERS, TREND_THRESHOLD, TREND_WINDOW, TRIGGER_WINDOW, Trend, last_days, rating_trend,
    sleep_trend, top_triggers, trend_by,
};
pub use validation::{
    ValidationError, validate_date, validate_log, validate_rating, validate_sleep_hours,
    validate_sleep_quality,
};
pub use vocab::{COMMON_TRIGGERS, EXERCISE_TYPES, is_common_trigger};
