use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::diet::{CreateDietEntry, DietEntry};

pub async fn create(db: &PgPool, user_id: Uuid, body: &CreateDietEntry) -> AppResult<DietEntry> {
    let entry = sqlx::query_as::<_, DietEntry>(
        r#"
        INSERT INTO diet_entries
            (id, user_id, meal_type, food_name, calories, protein_g, carbs_g, fats_g, fiber_g, date, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&body.meal_type)
    .bind(&body.food_name)
    .bind(body.calories)
    .bind(body.protein_g)
    .bind(body.carbs_g)
    .bind(body.fats_g)
    .bind(body.fiber_g)
    .bind(body.date)
    .bind(&body.notes)
    .fetch_one(db)
    .await?;

    Ok(entry)
}

pub async fn list_range(
    db: &PgPool,
    user_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> AppResult<Vec<DietEntry>> {
    let entries = sqlx::query_as::<_, DietEntry>(
        r#"
        SELECT * FROM diet_entries
        WHERE user_id = $1
          AND ($2::date IS NULL OR date >= $2)
          AND ($3::date IS NULL OR date <= $3)
        ORDER BY date DESC
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(db)
    .await?;

    Ok(entries)
}

/// Windowed total of calories consumed; empty window yields 0.
pub async fn total_calories(
    db: &PgPool,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AppResult<f64> {
    let total = sqlx::query_scalar::<_, f64>(
        r#"
        SELECT COALESCE(SUM(calories), 0)::double precision
        FROM diet_entries
        WHERE user_id = $1 AND date BETWEEN $2 AND $3
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(db)
    .await?;

    Ok(total)
}
