use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use chrono::NaiveDate;
use log::{debug, error, info, trace, warn};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    date_range, iso_date_string, Activity, KeyValueStore, LifeLogError, Mood, Result,
};

/// Storage key of the activities-by-date document
pub const ACTIVITIES_KEY: &str = "lifelog_activities";

/// Storage key of the moods-by-date document
pub const MOODS_KEY: &str = "lifelog_moods";

/// Activities grouped under their ISO date key, in insertion order per day
pub type ActivitiesByDate = BTreeMap<String, Vec<Activity>>;

/// At most one mood per ISO date key
pub type MoodsByDate = BTreeMap<String, Mood>;

/// Reads and writes journal records through a [`KeyValueStore`].
///
/// Every public operation absorbs storage failures: writes report them as
/// `false`, reads fall back to empty or absent values. Each save is a
/// read-modify-write of a whole document and runs under the store lock, so
/// concurrent callers sharing one `JournalStorage` cannot lose updates.
pub struct JournalStorage<S: KeyValueStore> {
    /// Underlying document store
    store: Mutex<S>,

    /// Whether documents are written with indentation
    pretty_json: bool,
}

impl<S: KeyValueStore> JournalStorage<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
            pretty_json: false,
        }
    }

    /// Write indented JSON documents
    pub fn with_pretty_json(mut self, pretty_json: bool) -> Self {
        self.pretty_json = pretty_json;
        self
    }

    /// Gives back the underlying store
    pub fn into_inner(self) -> S {
        self.store
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends an activity to the list stored for its date.
    ///
    /// Returns `false` if the store could not be read or written. A document
    /// that exists but cannot be parsed is left untouched rather than replaced.
    pub fn save_activity(&self, activity: &Activity) -> bool {
        info!("Saving activity: {}", activity.id);

        match self.append_activity(activity) {
            Ok(count) => {
                info!(
                    "Activity {} saved ({} logged on {})",
                    activity.id, count, activity.date
                );
                true
            }
            Err(e) => {
                error!("Failed to save activity {}: {}", activity.id, e);
                false
            }
        }
    }

    /// Stores the mood for its date, replacing any earlier entry for that day.
    pub fn save_mood(&self, mood: &Mood) -> bool {
        info!("Saving mood: {}", mood.id);

        match self.replace_mood(mood) {
            Ok(Some(previous)) => {
                info!("Mood for {} replaced (was {})", mood.date, previous.id);
                true
            }
            Ok(None) => {
                info!("Mood for {} saved", mood.date);
                true
            }
            Err(e) => {
                error!("Failed to save mood {}: {}", mood.id, e);
                false
            }
        }
    }

    /// Activities logged on `date`, in insertion order
    pub fn activities_on(&self, date: NaiveDate) -> Vec<Activity> {
        let mut activities: ActivitiesByDate = self.load_or_default(ACTIVITIES_KEY);
        activities
            .remove(&iso_date_string(date))
            .unwrap_or_default()
    }

    pub fn mood_on(&self, date: NaiveDate) -> Option<Mood> {
        let mut moods: MoodsByDate = self.load_or_default(MOODS_KEY);
        moods.remove(&iso_date_string(date))
    }

    /// Activities for every date in `[start, end]` that has at least one.
    pub fn activities_in_range(&self, start: NaiveDate, end: NaiveDate) -> ActivitiesByDate {
        if start > end {
            debug!("Empty activity range: {} is after {}", start, end);
            return ActivitiesByDate::new();
        }

        let mut all: ActivitiesByDate = self.load_or_default(ACTIVITIES_KEY);
        let mut result = ActivitiesByDate::new();

        for day in date_range(start, end) {
            let key = iso_date_string(day);
            if let Some(activities) = all.remove(&key) {
                if !activities.is_empty() {
                    result.insert(key, activities);
                }
            }
        }

        debug!(
            "Found activities on {} day(s) between {} and {}",
            result.len(),
            start,
            end
        );
        result
    }

    /// Moods for every date in `[start, end]` that has one.
    pub fn moods_in_range(&self, start: NaiveDate, end: NaiveDate) -> MoodsByDate {
        if start > end {
            debug!("Empty mood range: {} is after {}", start, end);
            return MoodsByDate::new();
        }

        let mut all: MoodsByDate = self.load_or_default(MOODS_KEY);
        let result: MoodsByDate = date_range(start, end)
            .into_iter()
            .filter_map(|day| {
                let key = iso_date_string(day);
                all.remove(&key).map(|mood| (key, mood))
            })
            .collect();

        debug!(
            "Found moods on {} day(s) between {} and {}",
            result.len(),
            start,
            end
        );
        result
    }

    fn append_activity(&self, activity: &Activity) -> Result<usize> {
        let mut store = self.lock_store()?;

        let mut activities: ActivitiesByDate =
            read_document(&*store, ACTIVITIES_KEY)?.unwrap_or_default();

        let day = activities.entry(iso_date_string(activity.date)).or_default();
        day.push(activity.clone());
        let count = day.len();

        self.write_document(&mut *store, ACTIVITIES_KEY, &activities)?;
        Ok(count)
    }

    fn replace_mood(&self, mood: &Mood) -> Result<Option<Mood>> {
        let mut store = self.lock_store()?;

        let mut moods: MoodsByDate = read_document(&*store, MOODS_KEY)?.unwrap_or_default();
        let previous = moods.insert(iso_date_string(mood.date), mood.clone());

        self.write_document(&mut *store, MOODS_KEY, &moods)?;
        Ok(previous)
    }

    /// Reads a whole document, treating any failure as "nothing stored"
    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let loaded = self
            .lock_store()
            .and_then(|store| read_document(&*store, key));

        match loaded {
            Ok(Some(document)) => document,
            Ok(None) => {
                trace!("No document stored under {}", key);
                T::default()
            }
            Err(e) => {
                warn!("Ignoring unreadable document {}: {}", key, e);
                T::default()
            }
        }
    }

    fn write_document<T: Serialize>(&self, store: &mut S, key: &str, document: &T) -> Result<()> {
        trace!("Serializing document {}", key);
        let json = if self.pretty_json {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };

        store.set(key, &json)
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, S>> {
        self.store
            .lock()
            .map_err(|e| LifeLogError::LockAcquisitionFailed {
                message: format!("Failed to acquire lock on journal store: {}", e),
            })
    }
}

fn read_document<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(json) => {
            let document = serde_json::from_str(&json).map_err(|e| {
                error!("Malformed document under {}: {}", key, e);
                LifeLogError::Serialization(e)
            })?;
            Ok(Some(document))
        }
        None => Ok(None),
    }
}
