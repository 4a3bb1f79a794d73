//! Suggested labels offered to the user. Stored values are not restricted to these.

/// Triggers commonly associated with dizziness episodes.
pub const COMMON_TRIGGERS: &[&str] = &[
    "Bright lights",
    "Flickering lights",
    "Screens",
    "Crowded spaces",
    "Loud noises",
    "Strong smells",
    "Scrolling",
    "Driving",
    "Supermarket aisles",
    "Busy patterns",
    "Head movements",
    "Standing up quickly",
    "Weather changes",
    "Lack of sleep",
    "Stress",
    "Dehydration",
];

/// Exercise types offered when adding an exercise entry.
pub const EXERCISE_TYPES: &[&str] = &[
    "Walking",
    "Vestibular exercises",
    "Yoga",
    "Swimming",
    "Cycling",
    "Tai chi",
    "Stretching",
    "Breathing exercises",
    "Balance training",
    "Other",
];

/// Returns `true` if `label` is one of the suggested triggers, ignoring case.
pub fn is_common_trigger(label: &str) -> bool {
    COMMON_TRIGGERS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(label.trim()))
}
