use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::plan::{
    CreateHealthPlanRequest, HealthPlan, PlanQuery, UpdateHealthPlanRequest,
};
use crate::store;
use crate::AppState;

pub async fn create_plan(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateHealthPlanRequest>,
) -> AppResult<(StatusCode, Json<HealthPlan>)> {
    body.validate()?;
    let plan = store::plans::create(&state.db, auth_user.id, &body).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn list_plans(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<PlanQuery>,
) -> AppResult<Json<Vec<HealthPlan>>> {
    let plans = store::plans::list(&state.db, auth_user.id, query.status_filter).await?;
    Ok(Json(plans))
}

pub async fn get_plan(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
) -> AppResult<Json<HealthPlan>> {
    let plan = store::plans::get(&state.db, auth_user.id, plan_id).await?;
    Ok(Json(plan))
}

pub async fn update_plan(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(plan_id): Path<Uuid>,
    Json(body): Json<UpdateHealthPlanRequest>,
) -> AppResult<Json<HealthPlan>> {
    let plan = store::plans::update(&state.db, auth_user.id, plan_id, &body).await?;
    Ok(Json(plan))
}
