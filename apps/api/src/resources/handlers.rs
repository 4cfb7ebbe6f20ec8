//! Axum route handlers for the Learning Resources API.
//! Reads go through the Redis response cache.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::cache::cache_key;
use crate::errors::AppError;
use crate::models::resource::LearningResourceRow;
use crate::resources::filters::{ResourceFilter, ResourceListQuery};
use crate::resources::store;
use crate::resources::validation::{validate_new_resource, CreateResourceRequest};
use crate::state::AppState;

/// GET /api/resources
pub async fn handle_list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceListQuery>,
) -> Result<Json<Vec<LearningResourceRow>>, AppError> {
    let filter = ResourceFilter::from(query);
    let key = cache_key("resources:list", &filter.cache_parts());

    if let Some(cached) = state.cache.get_json::<Vec<LearningResourceRow>>(&key).await {
        return Ok(Json(cached));
    }

    let resources = store::list_resources(&state.db, &filter).await?;
    state.cache.put_json(&key, &resources).await;
    Ok(Json(resources))
}

/// GET /api/resources/:id
pub async fn handle_get_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LearningResourceRow>, AppError> {
    let key = format!("resources:detail:{id}");

    if let Some(cached) = state.cache.get_json::<LearningResourceRow>(&key).await {
        return Ok(Json(cached));
    }

    let resource = store::get_resource(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resource {id} not found")))?;
    state.cache.put_json(&key, &resource).await;
    Ok(Json(resource))
}

/// POST /api/resources
pub async fn handle_create_resource(
    State(state): State<AppState>,
    Json(request): Json<CreateResourceRequest>,
) -> Result<(StatusCode, Json<LearningResourceRow>), AppError> {
    let new_resource = validate_new_resource(request)?;
    let resource = store::create_resource(&state.db, new_resource).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}
