//! Header-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kb_core::error::CoreError;
use kb_core::roles::{Action, Role};
use kb_core::types::EntityId;
use kb_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user resolved from the `x-user-id` header.
///
/// The header must name an existing user; otherwise the request is
/// rejected with 401.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     auth.require(Action::ViewTopics)?;
///     tracing::info!(user_id = %auth.user_id, role = %auth.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: EntityId,
    pub role: Role,
}

impl AuthUser {
    /// Reject with 403 unless the caller's role grants `action`.
    pub fn require(&self, action: Action) -> AppResult<()> {
        if self.role.can(action) {
            return Ok(());
        }
        tracing::debug!(user_id = %self.user_id, role = %self.role, action = action.as_str(), "Permission denied");
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Insufficient permissions. Required: {}",
            action.as_str()
        ))))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Authentication required. Provide the x-user-id header".into(),
                ))
            })?;

        let user = UserRepo::find_by_id(&state.store, user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid user".into())))?;

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}
