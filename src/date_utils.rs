//! Calendar date helpers: the canonical "today", rolling windows and the
//! `YYYY-MM-DD` keys used throughout storage.
use chrono::{Duration, Local, NaiveDate};
use log::debug;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// The current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The last `n` days ending today, oldest first
pub fn past_days(n: u32) -> Vec<NaiveDate> {
    past_days_from(today(), n)
}

/// The last `n` days ending at `today`, oldest first: `[today - (n-1), ..., today]`.
/// `n == 0`, or a window reaching before the earliest representable date,
/// gives an empty window.
pub fn past_days_from(today: NaiveDate, n: u32) -> Vec<NaiveDate> {
    if n == 0 {
        return Vec::new();
    }

    match today.checked_sub_signed(Duration::days(i64::from(n) - 1)) {
        Some(start) => date_range(start, today),
        None => {
            debug!("Window of {} days before {} is out of range", n, today);
            Vec::new()
        }
    }
}

/// Every date from `start` to `end`, both inclusive. Empty when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Storage key for a date
pub fn iso_date_string(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}

/// e.g. "Sunday, March 10, 2024"
pub fn format_long(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// e.g. "Mar 10"
pub fn format_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn past_three_days() {
        let days = past_days_from(date(2024, 3, 10), 3);
        let keys: Vec<String> = days.iter().map(|d| iso_date_string(*d)).collect();

        assert_eq!(keys, vec!["2024-03-08", "2024-03-09", "2024-03-10"]);
    }

    #[test]
    fn window_is_contiguous_and_ends_today() {
        let today = date(2024, 3, 2);
        for n in [1, 2, 7, 14, 30, 366] {
            let days = past_days_from(today, n);
            assert_eq!(days.len(), n as usize);
            assert_eq!(days.last(), Some(&today));
            for pair in days.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
        }
    }

    #[test]
    fn window_crosses_leap_day() {
        let days = past_days_from(date(2024, 3, 1), 2);
        assert_eq!(days, vec![date(2024, 2, 29), date(2024, 3, 1)]);
    }

    #[test]
    fn zero_days_is_empty() {
        assert!(past_days_from(date(2024, 3, 10), 0).is_empty());
    }

    #[test]
    fn oversized_window_is_empty() {
        assert!(past_days_from(date(2024, 3, 10), u32::MAX).is_empty());
    }

    #[test]
    fn live_window_ends_today() {
        let days = past_days(5);
        assert_eq!(days.len(), 5);
        assert_eq!(days.last(), Some(&today()));
    }

    #[test]
    fn reversed_range_is_empty() {
        assert!(date_range(date(2024, 3, 10), date(2024, 3, 9)).is_empty());
        assert_eq!(
            date_range(date(2024, 3, 10), date(2024, 3, 10)),
            vec![date(2024, 3, 10)]
        );
    }

    #[test]
    fn iso_string_round_trips() {
        for d in [date(2024, 1, 1), date(1999, 12, 31), date(2024, 2, 29)] {
            let key = iso_date_string(d);
            assert_eq!(parse_iso_date(&key).map(iso_date_string), Some(key));
        }
        assert!(parse_iso_date("2024-13-01").is_none());
        assert!(parse_iso_date("10/03/2024").is_none());
    }

    #[test]
    fn display_formats() {
        assert_eq!(format_long(date(2024, 3, 10)), "Sunday, March 10, 2024");
        assert_eq!(format_short(date(2024, 3, 1)), "Mar 1");
    }
}
