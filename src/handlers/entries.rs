//! Typed entry endpoints, one create/list pair per store.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::diet::{CreateDietEntry, DietEntry};
use crate::models::exercise::{CreateExerciseEntry, ExerciseEntry};
use crate::models::sleep::{CreateSleepEntry, SleepEntry};
use crate::models::RangeQuery;
use crate::store;
use crate::AppState;

pub async fn create_exercise(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateExerciseEntry>,
) -> AppResult<(StatusCode, Json<ExerciseEntry>)> {
    body.validate()?;
    let entry = store::exercise::create(&state.db, auth_user.id, &body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_exercise(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<ExerciseEntry>>> {
    let entries =
        store::exercise::list_range(&state.db, auth_user.id, query.start_date, query.end_date)
            .await?;
    Ok(Json(entries))
}

pub async fn create_diet(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateDietEntry>,
) -> AppResult<(StatusCode, Json<DietEntry>)> {
    body.validate()?;
    let entry = store::diet::create(&state.db, auth_user.id, &body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_diet(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<DietEntry>>> {
    let entries =
        store::diet::list_range(&state.db, auth_user.id, query.start_date, query.end_date).await?;
    Ok(Json(entries))
}

pub async fn create_sleep(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateSleepEntry>,
) -> AppResult<(StatusCode, Json<SleepEntry>)> {
    body.validate()?;
    let entry = store::sleep::create(&state.db, auth_user.id, &body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_sleep(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<SleepEntry>>> {
    let entries =
        store::sleep::list_range(&state.db, auth_user.id, query.start_date, query.end_date)
            .await?;
    Ok(Json(entries))
}
