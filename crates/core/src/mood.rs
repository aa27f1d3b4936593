//! Mood categories and the calendar context attached to every mood entry.

use std::fmt;

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MoodCategory
// ---------------------------------------------------------------------------

/// The fixed set of labels a mood description can be classified into.
///
/// `Other` is the catch-all used for empty input, classifier failures and
/// any label the model invents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodCategory {
    Happy,
    Sad,
    Angry,
    Calm,
    Excited,
    Anxious,
    Confident,
    Lonely,
    Nostalgic,
    Romantic,
    Other,
}

impl MoodCategory {
    /// Every category in presentation order (catch-all last).
    pub const ALL: [MoodCategory; 11] = [
        MoodCategory::Happy,
        MoodCategory::Sad,
        MoodCategory::Angry,
        MoodCategory::Calm,
        MoodCategory::Excited,
        MoodCategory::Anxious,
        MoodCategory::Confident,
        MoodCategory::Lonely,
        MoodCategory::Nostalgic,
        MoodCategory::Romantic,
        MoodCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoodCategory::Happy => "Happy",
            MoodCategory::Sad => "Sad",
            MoodCategory::Angry => "Angry",
            MoodCategory::Calm => "Calm",
            MoodCategory::Excited => "Excited",
            MoodCategory::Anxious => "Anxious",
            MoodCategory::Confident => "Confident",
            MoodCategory::Lonely => "Lonely",
            MoodCategory::Nostalgic => "Nostalgic",
            MoodCategory::Romantic => "Romantic",
            MoodCategory::Other => "Other",
        }
    }

    /// Case-exact lookup of a label. `"happy"` is not `Happy`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }

    /// Comma-separated label list, as embedded in classification prompts.
    pub fn label_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Season / time of day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Northern-hemisphere meteorological season for a month (1-12).
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    /// Case-exact lookup of a stored label.
    pub fn from_label(label: &str) -> Option<Self> {
        [Season::Spring, Season::Summer, Season::Fall, Season::Winter]
            .into_iter()
            .find(|s| s.as_str() == label)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Season and time of day derived from one wall-clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MomentContext {
    pub season: Season,
    pub time_of_day: TimeOfDay,
}

impl MomentContext {
    pub fn at<T: Datelike + Timelike>(moment: &T) -> Self {
        Self {
            season: Season::from_month(moment.month()),
            time_of_day: TimeOfDay::from_hour(moment.hour()),
        }
    }

    /// Context for the server's local clock.
    pub fn now() -> Self {
        Self::at(&chrono::Local::now())
    }
}
