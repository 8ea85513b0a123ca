use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::plan::{
    CreateHealthPlanRequest, HealthPlan, PlanStatus, UpdateHealthPlanRequest,
};

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    body: &CreateHealthPlanRequest,
) -> AppResult<HealthPlan> {
    let plan = sqlx::query_as::<_, HealthPlan>(
        r#"
        INSERT INTO health_plans
            (id, user_id, plan_type, title, description, duration_days, calories_target,
             exercise_minutes_per_day, weekly_exercise_days, exercise_plan, diet_suggestions,
             status, start_date, end_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&body.plan_type)
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.duration_days)
    .bind(body.calories_target)
    .bind(body.exercise_minutes_per_day)
    .bind(body.weekly_exercise_days)
    .bind(&body.exercise_plan)
    .bind(&body.diet_suggestions)
    .bind(body.status.unwrap_or_default())
    .bind(body.start_date)
    .bind(body.end_date)
    .fetch_one(db)
    .await?;

    Ok(plan)
}

pub async fn list(
    db: &PgPool,
    user_id: Uuid,
    status_filter: Option<PlanStatus>,
) -> AppResult<Vec<HealthPlan>> {
    let plans = sqlx::query_as::<_, HealthPlan>(
        r#"
        SELECT * FROM health_plans
        WHERE user_id = $1 AND ($2::plan_status IS NULL OR status = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(status_filter)
    .fetch_all(db)
    .await?;

    Ok(plans)
}

pub async fn get(db: &PgPool, user_id: Uuid, plan_id: Uuid) -> AppResult<HealthPlan> {
    sqlx::query_as::<_, HealthPlan>("SELECT * FROM health_plans WHERE id = $1 AND user_id = $2")
        .bind(plan_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or(AppError::NotFound("Health plan not found".into()))
}

/// Partial update of status/content fields, scoped to the owner.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    plan_id: Uuid,
    body: &UpdateHealthPlanRequest,
) -> AppResult<HealthPlan> {
    sqlx::query_as::<_, HealthPlan>(
        r#"
        UPDATE health_plans SET
            status = COALESCE($3, status),
            exercise_plan = COALESCE($4, exercise_plan),
            diet_suggestions = COALESCE($5, diet_suggestions),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(plan_id)
    .bind(user_id)
    .bind(body.status)
    .bind(&body.exercise_plan)
    .bind(&body.diet_suggestions)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound("Health plan not found".into()))
}
