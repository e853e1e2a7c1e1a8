//! Shared types for the lifelog application.
//!
//! This module holds the crate-wide `Result` alias, the small value types
//! produced by the aggregation functions and the CLI subcommands.
use std::fmt;

use clap::Subcommand;
use serde::Serialize;

use crate::{Activity, CategoryInfo, LifeLogError};

/// A specialized Result type for lifelog operations.
pub type Result<T> = std::result::Result<T, LifeLogError>;

/// A span of minutes split into whole hours and the remaining minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TotalTime {
    pub hours: u32,
    pub minutes: u32,
}

impl TotalTime {
    pub fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }
}

impl fmt::Display for TotalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Activities of one category, as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    /// Category id as stored on the activities
    pub category: String,
    /// Catalog entry, `None` for unknown ids
    pub info: Option<&'static CategoryInfo>,
    /// Activities in insertion order
    pub activities: Vec<Activity>,
    /// Sum of the activities' durations
    pub total_minutes: u32,
}

/// Minutes spent on one category over a range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub info: Option<&'static CategoryInfo>,
    pub minutes: u32,
    /// Minutes per day, aligned with the report's dates
    pub daily_minutes: Vec<u32>,
}

/// Available subcommands for the lifelog application
#[derive(Subcommand)]
pub enum Commands {
    /// Log an activity
    Activity {
        /// Category id (see `catalog`)
        #[clap(short, long)]
        category: String,

        /// What you did
        #[clap(short, long)]
        description: String,

        /// Duration in minutes
        #[clap(short = 'm', long)]
        duration: u32,

        /// Day of the activity (YYYY-MM-DD), defaults to today
        #[clap(long)]
        date: Option<String>,
    },

    /// Record the mood for a day, replacing any earlier entry for that day
    Mood {
        /// Mood level from 1 (very sad) to 5 (very happy)
        #[clap(short, long)]
        level: u8,

        /// Optional note
        #[clap(short, long)]
        note: Option<String>,

        /// Contributing factors (comma-separated)
        #[clap(short, long)]
        factors: Option<String>,

        /// Day of the entry (YYYY-MM-DD), defaults to today
        #[clap(long)]
        date: Option<String>,
    },

    /// Show the activities and mood of one day
    Today {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[clap(long)]
        date: Option<String>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Summarize the last few days
    Insights {
        /// Number of days to include, ending today
        #[clap(short, long)]
        range: Option<u32>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List categories, mood levels and mood factors
    Catalog,

    /// Show the active configuration
    Config {
        /// Reset the configuration file to defaults
        #[clap(short, long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_time_splits_hours_and_minutes() {
        assert_eq!(TotalTime::from_minutes(75).to_string(), "1h 15m");
        assert_eq!(TotalTime::from_minutes(0).to_string(), "0h 0m");
        assert_eq!(TotalTime::from_minutes(120).to_string(), "2h 0m");
        assert_eq!(TotalTime::from_minutes(59), TotalTime { hours: 0, minutes: 59 });
    }
}
