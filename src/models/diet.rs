use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DietEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_type: String,
    pub food_name: String,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fats_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDietEntry {
    #[validate(length(min = 1))]
    pub meal_type: String,
    #[validate(length(min = 1))]
    pub food_name: String,
    #[validate(range(min = 0.0))]
    pub calories: f64,
    #[validate(range(min = 0.0))]
    pub protein_g: Option<f64>,
    #[validate(range(min = 0.0))]
    pub carbs_g: Option<f64>,
    #[validate(range(min = 0.0))]
    pub fats_g: Option<f64>,
    #[validate(range(min = 0.0))]
    pub fiber_g: Option<f64>,
    pub date: NaiveDate,
    pub notes: Option<String>,
}
