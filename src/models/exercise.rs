use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exercise_type: String,
    pub duration_minutes: f64,
    pub calories_burned: Option<f64>,
    pub distance_km: Option<f64>,
    pub intensity: Option<String>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExerciseEntry {
    #[validate(length(min = 1))]
    pub exercise_type: String,
    #[validate(range(min = 0.0))]
    pub duration_minutes: f64,
    #[validate(range(min = 0.0))]
    pub calories_burned: Option<f64>,
    #[validate(range(min = 0.0))]
    pub distance_km: Option<f64>,
    pub intensity: Option<String>,
    pub date: NaiveDate,
    pub notes: Option<String>,
}
