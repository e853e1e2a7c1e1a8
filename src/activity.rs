//! Activity records and the fixed activity category catalog.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display information for one activity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    /// Identifier stored on activities (e.g. `self_care`)
    pub id: &'static str,
    /// Human readable name
    pub label: &'static str,
    /// Emoji shown next to the label
    pub icon: &'static str,
    /// Hex color used for charts
    pub color: &'static str,
}

/// Label shown for activities whose category is not in the catalog
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown";

/// All activity categories in declaration order
pub const CATEGORIES: [CategoryInfo; 9] = [
    CategoryInfo {
        id: "work",
        label: "Work",
        icon: "💼",
        color: "#4285F4",
    },
    CategoryInfo {
        id: "exercise",
        label: "Exercise",
        icon: "🏃‍♂️",
        color: "#34A853",
    },
    CategoryInfo {
        id: "leisure",
        label: "Leisure",
        icon: "🎮",
        color: "#FBBC05",
    },
    CategoryInfo {
        id: "social",
        label: "Social",
        icon: "👥",
        color: "#EA4335",
    },
    CategoryInfo {
        id: "self_care",
        label: "Self Care",
        icon: "🧘‍♂️",
        color: "#8E44AD",
    },
    CategoryInfo {
        id: "sleep",
        label: "Sleep",
        icon: "😴",
        color: "#3498DB",
    },
    CategoryInfo {
        id: "learning",
        label: "Learning",
        icon: "📚",
        color: "#F39C12",
    },
    CategoryInfo {
        id: "chores",
        label: "Chores",
        icon: "🧹",
        color: "#7F8C8D",
    },
    CategoryInfo {
        id: "other",
        label: "Other",
        icon: "❓",
        color: "#95A5A6",
    },
];

/// Returns every activity category in declaration order
pub fn category_catalog() -> &'static [CategoryInfo] {
    &CATEGORIES
}

/// Looks up a category by identifier, ignoring ASCII case.
///
/// A miss is an ordinary outcome: activities may carry ids the catalog does
/// not know, and callers are expected to fall back to [`UNKNOWN_CATEGORY_LABEL`].
pub fn lookup_category(id: &str) -> Option<&'static CategoryInfo> {
    CATEGORIES
        .iter()
        .find(|category| category.id.eq_ignore_ascii_case(id))
}

/// Resolves a category id to its display label, or "Unknown"
pub fn category_label(id: &str) -> &'static str {
    lookup_category(id)
        .map(|category| category.label)
        .unwrap_or(UNKNOWN_CATEGORY_LABEL)
}

/// A single logged activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique identifier for the activity
    pub id: String,
    /// Category id, normally one of [`CATEGORIES`]
    pub category: String,
    /// Free-form description
    pub description: String,
    /// Duration in minutes
    pub duration: u32,
    /// Calendar day the activity belongs to
    pub date: NaiveDate,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Creates a new activity. Inputs are taken as already validated.
    pub fn new(category: String, description: String, duration: u32, date: NaiveDate) -> Self {
        let now = Utc::now();

        Activity {
            id: generate_id(now),
            category,
            description,
            duration,
            date,
            created_at: now,
        }
    }

    /// Catalog entry for this activity's category, if it is a known one
    pub fn category_info(&self) -> Option<&'static CategoryInfo> {
        lookup_category(&self.category)
    }
}

/// Builds an [`Activity`] with a fresh id and creation timestamp
pub fn make_activity(
    category: impl Into<String>,
    description: impl Into<String>,
    duration: u32,
    date: NaiveDate,
) -> Activity {
    Activity::new(category.into(), description.into(), duration, date)
}

/// Record id built from the creation time plus a random suffix
pub(crate) fn generate_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now.timestamp_millis(), &suffix[..8])
}
