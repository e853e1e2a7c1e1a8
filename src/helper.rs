use chrono::NaiveDate;

use crate::{parse_iso_date, LifeLogError, Result};

// Helper method for parsing comma-separated factor ids
pub fn parse_factors(factors: Option<String>) -> Vec<String> {
    factors
        .map(|f| {
            f.split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Parses an optional `YYYY-MM-DD` argument, defaulting to `today`
pub fn parse_date_arg(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match value {
        Some(raw) => parse_iso_date(raw).ok_or_else(|| LifeLogError::InvalidDate {
            value: raw.to_string(),
        }),
        None => Ok(today),
    }
}
