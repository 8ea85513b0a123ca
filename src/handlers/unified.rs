//! Unified data endpoints and the statistics reducer endpoint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::unified::{UnifiedQuery, UnifiedRecord};
use crate::services::{aggregator, stats};
use crate::AppState;

/// Unified create: the payload carries a `data_type` discriminant and
/// is routed to the matching typed store.
pub async fn create_health_data(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<UnifiedRecord>)> {
    let record = aggregator::create_unified(&state.db, auth_user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Unified read across all entry types, optionally filtered by type
/// and inclusive date range, ordered by date descending.
pub async fn list_health_data(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<UnifiedQuery>,
) -> AppResult<Json<Vec<UnifiedRecord>>> {
    let records = aggregator::list_unified(
        &state.db,
        auth_user.id,
        query.data_type,
        query.start_date,
        query.end_date,
    )
    .await?;
    Ok(Json(records))
}

pub async fn get_statistics(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<stats::StatsQuery>,
) -> AppResult<Json<stats::HealthStatistics>> {
    let statistics = stats::compute(&state.db, auth_user.id, query.days).await?;
    Ok(Json(statistics))
}
