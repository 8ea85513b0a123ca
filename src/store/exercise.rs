use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::exercise::{CreateExerciseEntry, ExerciseEntry};

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    body: &CreateExerciseEntry,
) -> AppResult<ExerciseEntry> {
    let entry = sqlx::query_as::<_, ExerciseEntry>(
        r#"
        INSERT INTO exercise_entries
            (id, user_id, exercise_type, duration_minutes, calories_burned, distance_km, intensity, date, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&body.exercise_type)
    .bind(body.duration_minutes)
    .bind(body.calories_burned)
    .bind(body.distance_km)
    .bind(&body.intensity)
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
) -> AppResult<Vec<ExerciseEntry>> {
    let entries = sqlx::query_as::<_, ExerciseEntry>(
        r#"
        SELECT * FROM exercise_entries
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

/// Windowed totals: (sum of duration_minutes, sum of calories_burned).
/// Null calories count as zero; an empty window yields (0, 0).
pub async fn totals(
    db: &PgPool,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AppResult<(f64, f64)> {
    let totals = sqlx::query_as::<_, (f64, f64)>(
        r#"
        SELECT
            COALESCE(SUM(duration_minutes), 0)::double precision,
            COALESCE(SUM(calories_burned), 0)::double precision
        FROM exercise_entries
        WHERE user_id = $1 AND date BETWEEN $2 AND $3
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(db)
    .await?;

    Ok(totals)
}
