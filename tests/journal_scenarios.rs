use chrono::NaiveDate;

use lifelog::{
    average_mood, category_totals, closest_mood_level, iso_date_string, make_activity, make_mood,
    past_days_from, total_time, FileStore, InsightsReport, JournalStorage, KeyValueStore,
    ACTIVITIES_KEY, MOODS_KEY,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn single_day_activity_totals() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JournalStorage::new(FileStore::new(dir.path()));
    let day = date(2024, 3, 10);

    let work = make_activity("work", "Quarterly report", 45, day);
    let exercise = make_activity("exercise", "Evening run", 30, day);
    assert!(storage.save_activity(&work));
    assert!(storage.save_activity(&exercise));

    assert_eq!(storage.activities_on(day), vec![work, exercise]);

    let totals = category_totals(&storage.activities_in_range(day, day));
    assert_eq!(totals.get("work"), Some(&45));
    assert_eq!(totals.get("exercise"), Some(&30));
    assert_eq!(total_time(&totals).to_string(), "1h 15m");
}

#[test]
fn average_of_two_moods_resolves_to_neutral() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JournalStorage::new(FileStore::new(dir.path()));

    assert!(storage.save_mood(&make_mood(4, None, vec![], date(2024, 3, 9))));
    assert!(storage.save_mood(&make_mood(2, None, vec![], date(2024, 3, 10))));

    let moods = storage.moods_in_range(date(2024, 3, 9), date(2024, 3, 10));
    let average = average_mood(&moods);

    assert_eq!(average, Some(3.0));
    assert_eq!(closest_mood_level(average).map(|l| l.label), Some("Neutral"));
}

#[test]
fn records_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let day = date(2024, 3, 10);

    {
        let storage = JournalStorage::new(FileStore::new(dir.path())).with_pretty_json(true);
        assert!(storage.save_activity(&make_activity("learning", "Rust book", 60, day)));
        assert!(storage.save_mood(&make_mood(
            5,
            Some("Great day".to_string()),
            vec!["sleep".to_string()],
            day
        )));
    }

    let storage = JournalStorage::new(FileStore::new(dir.path()));
    assert_eq!(storage.activities_on(day).len(), 1);
    let mood = storage.mood_on(day).unwrap();
    assert_eq!(mood.note.as_deref(), Some("Great day"));
    assert_eq!(mood.factors, vec!["sleep".to_string()]);

    let store = storage.into_inner();
    assert!(store.get(ACTIVITIES_KEY).unwrap().is_some());
    assert!(store.get(MOODS_KEY).unwrap().is_some());
}

#[test]
fn corrupt_file_degrades_to_empty_reads() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", MOODS_KEY)), "not json").unwrap();
    let storage = JournalStorage::new(FileStore::new(dir.path()));

    assert!(storage.mood_on(date(2024, 3, 10)).is_none());
    assert!(storage
        .moods_in_range(date(2024, 3, 1), date(2024, 3, 10))
        .is_empty());
}

#[test]
fn thirty_day_window_report() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JournalStorage::new(FileStore::new(dir.path()));
    let today = date(2024, 3, 10);

    for day in past_days_from(today, 30).into_iter().step_by(3) {
        assert!(storage.save_activity(&make_activity("sleep", "Night", 480, day)));
    }
    assert!(storage.save_activity(&make_activity("social", "Dinner", 90, date(2024, 2, 1))));

    let report = InsightsReport::build(&storage, today, 30);

    assert_eq!(report.dates.len(), 30);
    assert_eq!(report.dates.first(), Some(&iso_date_string(date(2024, 2, 10))));
    assert_eq!(report.active_days, 10);
    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].minutes, 4800);
    assert_eq!(report.total_time.to_string(), "80h 0m");
    assert!(report.mood_series.iter().all(Option::is_none));
    assert_eq!(report.average_mood, None);
}
