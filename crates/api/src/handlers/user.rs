//! Handlers for user management.
//!
//! `POST /users/setup` is the only unauthenticated endpoint; it exists so a
//! fresh install can create its first administrator.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use kb_core::error::CoreError;
use kb_core::roles::Action;
use kb_core::user::{CreateUser, UpdateUser};
use kb_core::validation::validate_id;
use kb_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const USER: &str = "User";

/// POST /users/setup
///
/// Create a user without authentication.
pub async fn setup_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(CoreError::from)?;

    let user = UserRepo::create(&state.store, &input).await?;

    tracing::info!(user_id = %user.id, role = %user.role, "User created via setup");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /users
pub async fn list_users(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewUsers)?;
    let users = UserRepo::list(&state.store).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /users
pub async fn create_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::CreateUsers)?;
    input.validate().map_err(CoreError::from)?;

    let user = UserRepo::create(&state.store, &input).await?;

    tracing::info!(
        user_id = %auth.user_id,
        created_user_id = %user.id,
        role = %user.role,
        "User created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /users/{id}
pub async fn get_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewUsers)?;
    validate_id(&id, "User ID")?;
    let user = UserRepo::find_by_id(&state.store, &id)
        .await?
        .ok_or_else(|| CoreError::not_found(USER, &id))?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /users/email/{email}
pub async fn get_user_by_email(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewUsers)?;
    let user = UserRepo::find_by_email(&state.store, &email)
        .await?
        .ok_or_else(|| CoreError::not_found(USER, &email))?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /users/{id}
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::UpdateUsers)?;
    validate_id(&id, "User ID")?;
    if input.is_empty() {
        return Err(CoreError::Validation(
            "At least one field (name, email, role) must be provided".into(),
        )
        .into());
    }
    input.validate().map_err(CoreError::from)?;

    let user = UserRepo::update(&state.store, &id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found(USER, &id))?;

    tracing::info!(user_id = %auth.user_id, updated_user_id = %id, "User updated");

    Ok(Json(DataResponse { data: user }))
}

/// DELETE /users/{id}
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth.require(Action::DeleteUsers)?;
    validate_id(&id, "User ID")?;

    if !UserRepo::delete(&state.store, &id).await? {
        return Err(CoreError::not_found(USER, &id).into());
    }

    tracing::info!(user_id = %auth.user_id, deleted_user_id = %id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
