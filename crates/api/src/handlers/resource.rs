//! Handlers for learning resources attached to topics.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use kb_core::error::CoreError;
use kb_core::resource::{CreateResource, ResourceType, UpdateResource};
use kb_core::roles::Action;
use kb_core::validation::validate_id;
use kb_db::repositories::ResourceRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const RESOURCE: &str = "Resource";

/// GET /resources
pub async fn list_resources(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewResources)?;
    let resources = ResourceRepo::list(&state.store).await?;
    Ok(Json(DataResponse { data: resources }))
}

/// POST /resources
///
/// The referenced topic must exist.
pub async fn create_resource(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateResource>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::CreateResources)?;
    input.validate().map_err(CoreError::from)?;
    state.topics.get_topic(&input.topic_id).await?;

    let resource = ResourceRepo::create(&state.store, &input).await?;

    tracing::info!(
        user_id = %auth.user_id,
        resource_id = %resource.id,
        topic_id = %resource.topic_id,
        "Resource created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: resource })))
}

/// GET /resources/{id}
pub async fn get_resource(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewResources)?;
    validate_id(&id, "Resource ID")?;
    let resource = ResourceRepo::find_by_id(&state.store, &id)
        .await?
        .ok_or_else(|| CoreError::not_found(RESOURCE, &id))?;
    Ok(Json(DataResponse { data: resource }))
}

/// PUT /resources/{id}
///
/// Moving a resource to another topic requires that topic to exist.
pub async fn update_resource(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateResource>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::UpdateResources)?;
    validate_id(&id, "Resource ID")?;
    if input.is_empty() {
        return Err(CoreError::Validation(
            "At least one field (topic_id, url, description, type) must be provided".into(),
        )
        .into());
    }
    input.validate().map_err(CoreError::from)?;
    if let Some(topic_id) = input.topic_id.as_deref() {
        state.topics.get_topic(topic_id).await?;
    }

    let resource = ResourceRepo::update(&state.store, &id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found(RESOURCE, &id))?;

    tracing::info!(user_id = %auth.user_id, resource_id = %id, "Resource updated");

    Ok(Json(DataResponse { data: resource }))
}

/// DELETE /resources/{id}
pub async fn delete_resource(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth.require(Action::DeleteResources)?;
    validate_id(&id, "Resource ID")?;

    if !ResourceRepo::delete(&state.store, &id).await? {
        return Err(CoreError::not_found(RESOURCE, &id).into());
    }

    tracing::info!(user_id = %auth.user_id, resource_id = %id, "Resource deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /resources/topic/{topic_id}
pub async fn list_by_topic(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewResources)?;
    state.topics.get_topic(&topic_id).await?;
    let resources = ResourceRepo::list_by_topic(&state.store, &topic_id).await?;
    Ok(Json(DataResponse { data: resources }))
}

/// GET /resources/type/{type}
pub async fn list_by_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(resource_type): Path<String>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewResources)?;
    let resource_type = ResourceType::from_name(&resource_type)?;
    let resources = ResourceRepo::list_by_type(&state.store, resource_type).await?;
    Ok(Json(DataResponse { data: resources }))
}
