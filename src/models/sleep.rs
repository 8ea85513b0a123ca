use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SleepEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub sleep_duration_hours: f64,
    pub sleep_quality: String,
    pub bed_time: Option<DateTime<Utc>>,
    pub wake_time: Option<DateTime<Utc>>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSleepEntry {
    #[validate(range(min = 0.0, max = 24.0))]
    pub sleep_duration_hours: f64,
    #[validate(length(min = 1))]
    pub sleep_quality: String,
    pub bed_time: Option<DateTime<Utc>>,
    pub wake_time: Option<DateTime<Utc>>,
    pub date: NaiveDate,
    pub notes: Option<String>,
}
