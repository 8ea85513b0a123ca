use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// The one mutable entity: created once, then updated in place by its
/// owner (status and content fields only).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HealthPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_days: Option<i32>,
    pub calories_target: Option<f64>,
    pub exercise_minutes_per_day: Option<f64>,
    pub weekly_exercise_days: Option<i32>,
    pub exercise_plan: Option<String>,
    pub diet_suggestions: Option<String>,
    pub status: PlanStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "plan_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Active,
    Completed,
    Paused,
}

impl Default for PlanStatus {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHealthPlanRequest {
    #[validate(length(min = 1))]
    pub plan_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration_days: Option<i32>,
    #[validate(range(min = 0.0))]
    pub calories_target: Option<f64>,
    #[validate(range(min = 0.0))]
    pub exercise_minutes_per_day: Option<f64>,
    #[validate(range(min = 0, max = 7))]
    pub weekly_exercise_days: Option<i32>,
    pub exercise_plan: Option<String>,
    pub diet_suggestions: Option<String>,
    pub status: Option<PlanStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHealthPlanRequest {
    pub status: Option<PlanStatus>,
    pub exercise_plan: Option<String>,
    pub diet_suggestions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub status_filter: Option<PlanStatus>,
}
