//! Daily mood records, the mood level scale and the mood factor tags.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::generate_id;

/// One step of the 1-5 mood scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodLevelInfo {
    pub id: u8,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Something the user marks as having influenced their mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodFactorInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// Mood levels, highest first
pub const MOOD_LEVELS: [MoodLevelInfo; 5] = [
    MoodLevelInfo {
        id: 5,
        label: "Very Happy",
        icon: "😄",
        color: "#34A853",
    },
    MoodLevelInfo {
        id: 4,
        label: "Happy",
        icon: "🙂",
        color: "#93C47D",
    },
    MoodLevelInfo {
        id: 3,
        label: "Neutral",
        icon: "😐",
        color: "#FBBC05",
    },
    MoodLevelInfo {
        id: 2,
        label: "Sad",
        icon: "🙁",
        color: "#F29871",
    },
    MoodLevelInfo {
        id: 1,
        label: "Very Sad",
        icon: "😢",
        color: "#EA4335",
    },
];

pub const MOOD_FACTORS: [MoodFactorInfo; 7] = [
    MoodFactorInfo {
        id: "sleep",
        label: "Sleep",
        icon: "😴",
    },
    MoodFactorInfo {
        id: "stress",
        label: "Stress",
        icon: "😰",
    },
    MoodFactorInfo {
        id: "nutrition",
        label: "Nutrition",
        icon: "🍎",
    },
    MoodFactorInfo {
        id: "exercise",
        label: "Exercise",
        icon: "🏃‍♂️",
    },
    MoodFactorInfo {
        id: "social",
        label: "Social Interaction",
        icon: "👥",
    },
    MoodFactorInfo {
        id: "work",
        label: "Work Satisfaction",
        icon: "💼",
    },
    MoodFactorInfo {
        id: "weather",
        label: "Weather",
        icon: "🌦️",
    },
];

/// Mood levels ordered from 5 (very happy) down to 1 (very sad)
pub fn mood_level_catalog() -> &'static [MoodLevelInfo] {
    &MOOD_LEVELS
}

/// Exact lookup by level id; anything outside 1-5 is a miss
pub fn lookup_mood_level(id: i64) -> Option<&'static MoodLevelInfo> {
    MOOD_LEVELS.iter().find(|level| i64::from(level.id) == id)
}

pub fn mood_factor_catalog() -> &'static [MoodFactorInfo] {
    &MOOD_FACTORS
}

pub fn lookup_mood_factor(id: &str) -> Option<&'static MoodFactorInfo> {
    MOOD_FACTORS.iter().find(|factor| factor.id == id)
}

/// The mood entry for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mood {
    /// Unique identifier for the entry
    pub id: String,
    /// Mood level, 1 to 5
    pub level: u8,
    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Factor ids from [`MOOD_FACTORS`]
    #[serde(default)]
    pub factors: Vec<String>,
    /// Calendar day the entry belongs to
    pub date: NaiveDate,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Mood {
    /// Creates a new mood entry.
    ///
    /// A blank note is stored as `None` and repeated factor ids are dropped,
    /// keeping the first occurrence. No other validation happens here.
    pub fn new(level: u8, note: Option<String>, factors: Vec<String>, date: NaiveDate) -> Self {
        let now = Utc::now();

        let note = note.filter(|n| !n.trim().is_empty());

        let mut unique_factors: Vec<String> = Vec::with_capacity(factors.len());
        for factor in factors {
            if !unique_factors.contains(&factor) {
                unique_factors.push(factor);
            }
        }

        Mood {
            id: generate_id(now),
            level,
            note,
            factors: unique_factors,
            date,
            created_at: now,
        }
    }

    pub fn level_info(&self) -> Option<&'static MoodLevelInfo> {
        lookup_mood_level(i64::from(self.level))
    }
}

/// Builds a [`Mood`] with a fresh id and creation timestamp
pub fn make_mood(level: u8, note: Option<String>, factors: Vec<String>, date: NaiveDate) -> Mood {
    Mood::new(level, note, factors, date)
}
