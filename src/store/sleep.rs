use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::sleep::{CreateSleepEntry, SleepEntry};

pub async fn create(db: &PgPool, user_id: Uuid, body: &CreateSleepEntry) -> AppResult<SleepEntry> {
    let entry = sqlx::query_as::<_, SleepEntry>(
        r#"
        INSERT INTO sleep_entries
            (id, user_id, sleep_duration_hours, sleep_quality, bed_time, wake_time, date, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(body.sleep_duration_hours)
    .bind(&body.sleep_quality)
    .bind(body.bed_time)
    .bind(body.wake_time)
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
) -> AppResult<Vec<SleepEntry>> {
    let entries = sqlx::query_as::<_, SleepEntry>(
        r#"
        SELECT * FROM sleep_entries
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

/// Windowed total of sleep hours; empty window yields 0.
pub async fn total_hours(
    db: &PgPool,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AppResult<f64> {
    let total = sqlx::query_scalar::<_, f64>(
        r#"
        SELECT COALESCE(SUM(sleep_duration_hours), 0)::double precision
        FROM sleep_entries
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
