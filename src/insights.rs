//! Aggregations over journal records.
//!
//! The free functions here are pure folds over data already fetched by
//! [`JournalStorage`]; they never touch the store and never fail. Missing
//! data shows up as `None` or an empty collection, never as a zero that
//! could be mistaken for a real value.
//!
//! [`DailySummary`] and [`InsightsReport`] combine the storage reads and
//! these folds into the views the dashboard and insights screens display.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, trace};
use serde::Serialize;

use crate::{
    format_short, iso_date_string, lookup_category, lookup_mood_level, past_days_from,
    ActivitiesByDate, Activity, CategoryGroup, CategoryTotal, JournalStorage, KeyValueStore,
    Mood, MoodLevelInfo, MoodsByDate, TotalTime,
};

/// Summed minutes per category id across every activity in the range.
///
/// Categories with no activities are absent rather than zero. Ids missing
/// from the catalog accumulate under their raw value.
pub fn category_totals(activities: &ActivitiesByDate) -> BTreeMap<String, u32> {
    let mut totals = BTreeMap::new();

    for activity in activities.values().flatten() {
        let total = totals.entry(activity.category.clone()).or_insert(0u32);
        *total = total.saturating_add(activity.duration);
    }

    trace!("Computed totals for {} categories", totals.len());
    totals
}

/// Mood level for each date, `None` where no mood was recorded.
/// The result has one entry per date, in the same order.
pub fn mood_series(dates: &[NaiveDate], moods: &MoodsByDate) -> Vec<Option<u8>> {
    dates
        .iter()
        .map(|date| moods.get(&iso_date_string(*date)).map(|mood| mood.level))
        .collect()
}

/// Mean of the recorded mood levels, or `None` when there are none.
pub fn average_mood(moods: &MoodsByDate) -> Option<f64> {
    if moods.is_empty() {
        return None;
    }

    let sum: u64 = moods.values().map(|mood| u64::from(mood.level)).sum();
    Some(sum as f64 / moods.len() as f64)
}

/// All minutes in the totals, split into hours and minutes
pub fn total_time(totals: &BTreeMap<String, u32>) -> TotalTime {
    TotalTime::from_minutes(sum_minutes(totals.values().copied()))
}

/// Adds up minutes, stopping at `u32::MAX` instead of overflowing
pub fn sum_minutes(minutes: impl IntoIterator<Item = u32>) -> u32 {
    minutes.into_iter().fold(0, u32::saturating_add)
}

/// The mood level nearest to an average, e.g. 3.0 -> Neutral.
///
/// Halves round up. Returns `None` when there is no average or the rounded
/// value is not a level on the scale.
pub fn closest_mood_level(average: Option<f64>) -> Option<&'static MoodLevelInfo> {
    let average = average?;
    if !average.is_finite() {
        return None;
    }
    lookup_mood_level(average.round() as i64)
}

/// Average mood to one decimal place, or "N/A"
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(value) => format!("{:.1}", value),
        None => "N/A".to_string(),
    }
}

/// Groups a day's activities by category, in order of first appearance.
pub fn group_by_category(activities: &[Activity]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for activity in activities {
        match groups
            .iter_mut()
            .find(|group| group.category == activity.category)
        {
            Some(group) => {
                group.total_minutes = group.total_minutes.saturating_add(activity.duration);
                group.activities.push(activity.clone());
            }
            None => groups.push(CategoryGroup {
                category: activity.category.clone(),
                info: lookup_category(&activity.category),
                activities: vec![activity.clone()],
                total_minutes: activity.duration,
            }),
        }
    }

    groups
}

/// Minutes of one category on each date, zero where nothing was logged
pub fn daily_category_minutes(
    dates: &[NaiveDate],
    activities: &ActivitiesByDate,
    category: &str,
) -> Vec<u32> {
    dates
        .iter()
        .map(|date| {
            activities
                .get(&iso_date_string(*date))
                .map(|day| {
                    sum_minutes(
                        day.iter()
                            .filter(|activity| activity.category == category)
                            .map(|activity| activity.duration),
                    )
                })
                .unwrap_or(0)
        })
        .collect()
}

/// Everything the dashboard shows for a single day
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub activity_count: usize,
    pub total_time: TotalTime,
    pub mood: Option<Mood>,
    pub mood_level: Option<&'static MoodLevelInfo>,
    pub groups: Vec<CategoryGroup>,
}

impl DailySummary {
    pub fn for_date<S: KeyValueStore>(storage: &JournalStorage<S>, date: NaiveDate) -> Self {
        let activities = storage.activities_on(date);
        let mood = storage.mood_on(date);

        let minutes = sum_minutes(activities.iter().map(|activity| activity.duration));
        let mood_level = mood.as_ref().and_then(Mood::level_info);

        debug!(
            "Daily summary for {}: {} activities, mood recorded: {}",
            date,
            activities.len(),
            mood.is_some()
        );

        Self {
            date,
            activity_count: activities.len(),
            total_time: TotalTime::from_minutes(minutes),
            mood,
            mood_level,
            groups: group_by_category(&activities),
        }
    }
}

/// Aggregated view of a rolling window of days
#[derive(Debug, Clone, Serialize)]
pub struct InsightsReport {
    /// ISO keys of every day in the window, oldest first
    pub dates: Vec<String>,
    /// Short display labels aligned with `dates`
    pub labels: Vec<String>,
    /// Per-category totals, largest first
    pub categories: Vec<CategoryTotal>,
    /// Mood level per day, aligned with `dates`
    pub mood_series: Vec<Option<u8>>,
    pub average_mood: Option<f64>,
    pub closest_mood_level: Option<&'static MoodLevelInfo>,
    pub total_time: TotalTime,
    /// Number of days with a recorded mood
    pub mood_days: usize,
    /// Number of days with at least one activity
    pub active_days: usize,
}

impl InsightsReport {
    /// Builds the report for the `days` days ending at `today`.
    pub fn build<S: KeyValueStore>(storage: &JournalStorage<S>, today: NaiveDate, days: u32) -> Self {
        let window = past_days_from(today, days);

        let (activities, moods) = match (window.first(), window.last()) {
            (Some(start), Some(end)) => (
                storage.activities_in_range(*start, *end),
                storage.moods_in_range(*start, *end),
            ),
            _ => (ActivitiesByDate::new(), MoodsByDate::new()),
        };

        Self::from_records(&window, &activities, &moods)
    }

    /// Builds the report from records already fetched for `window`.
    pub fn from_records(
        window: &[NaiveDate],
        activities: &ActivitiesByDate,
        moods: &MoodsByDate,
    ) -> Self {
        let totals = category_totals(activities);
        let average = average_mood(moods);

        let mut categories: Vec<CategoryTotal> = totals
            .iter()
            .map(|(category, minutes)| CategoryTotal {
                category: category.clone(),
                info: lookup_category(category),
                minutes: *minutes,
                daily_minutes: daily_category_minutes(window, activities, category),
            })
            .collect();
        categories.sort_by(|a, b| b.minutes.cmp(&a.minutes).then(a.category.cmp(&b.category)));

        debug!(
            "Insights over {} days: {} categories, {} mood entries",
            window.len(),
            categories.len(),
            moods.len()
        );

        Self {
            dates: window.iter().map(|d| iso_date_string(*d)).collect(),
            labels: window.iter().map(|d| format_short(*d)).collect(),
            categories,
            mood_series: mood_series(window, moods),
            average_mood: average,
            closest_mood_level: closest_mood_level(average),
            total_time: total_time(&totals),
            mood_days: moods.len(),
            active_days: activities.len(),
        }
    }
}
