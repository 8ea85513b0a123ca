//! Windowed totals over the three entry stores.
//!
//! The window ends on the current date in UTC (a fixed reference zone,
//! so client timezones cannot skew the boundaries) and extends `days`
//! days back, both ends inclusive: an entry dated exactly `days` days
//! before today is counted, one dated `days + 1` days before is not.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store;

pub const DEFAULT_WINDOW_DAYS: i64 = 7;
pub const MAX_WINDOW_DAYS: i64 = 365;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatistics {
    pub total_exercise_minutes: f64,
    pub total_calories_burned: f64,
    pub total_sleep_hours: f64,
    pub total_calories_consumed: f64,
}

/// Inclusive window boundaries for a trailing `days`-day window ending
/// on `end`.
pub fn window_bounds(end: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    (end - Duration::days(days), end)
}

pub async fn compute(db: &PgPool, user_id: Uuid, days: Option<i64>) -> AppResult<HealthStatistics> {
    let days = days.unwrap_or(DEFAULT_WINDOW_DAYS);
    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(AppError::Validation {
            message: format!("days must be between 1 and {MAX_WINDOW_DAYS}"),
            fields: vec!["days".into()],
        });
    }

    let today = Utc::now().date_naive();
    let (start_date, end_date) = window_bounds(today, days);

    let (total_exercise_minutes, total_calories_burned) =
        store::exercise::totals(db, user_id, start_date, end_date).await?;
    let total_sleep_hours = store::sleep::total_hours(db, user_id, start_date, end_date).await?;
    let total_calories_consumed =
        store::diet::total_calories(db, user_id, start_date, end_date).await?;

    Ok(HealthStatistics {
        total_exercise_minutes,
        total_calories_burned,
        total_sleep_hours,
        total_calories_consumed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let end = date(2024, 1, 10);
        let (start, end) = window_bounds(end, 7);

        assert_eq!(start, date(2024, 1, 3));
        assert_eq!(end, date(2024, 1, 10));

        // Exactly `days` days back is inside the window
        let boundary = date(2024, 1, 3);
        assert!(boundary >= start && boundary <= end);
        // `days + 1` days back is outside
        let outside = date(2024, 1, 2);
        assert!(outside < start);
    }

    #[test]
    fn test_window_bounds_single_day() {
        let end = date(2024, 3, 15);
        let (start, _) = window_bounds(end, 1);
        assert_eq!(start, date(2024, 3, 14));
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let end = date(2024, 3, 2);
        let (start, _) = window_bounds(end, 7);
        assert_eq!(start, date(2024, 2, 24));
    }

    #[test]
    fn test_statistics_serializes_zeros_explicitly() {
        let stats = HealthStatistics {
            total_exercise_minutes: 0.0,
            total_calories_burned: 0.0,
            total_sleep_hours: 0.0,
            total_calories_consumed: 0.0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        // Zero totals are real zeros, never null or omitted
        assert_eq!(json["total_sleep_hours"], 0.0);
        assert_eq!(json["total_calories_consumed"], 0.0);
    }
}
