//! Capability summary for the calling user.

use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use kb_core::roles::{PermissionSummary, Role};
use kb_core::types::EntityId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct CallerInfo {
    pub id: EntityId,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct PermissionCheck {
    pub user: CallerInfo,
    pub permissions: PermissionSummary,
}

/// GET /permissions/check
///
/// Any authenticated user may ask what their role allows.
pub async fn check_permissions(auth: AuthUser) -> AppResult<impl IntoResponse> {
    let permissions = PermissionSummary::for_role(auth.role);
    Ok(Json(DataResponse {
        data: PermissionCheck {
            user: CallerInfo {
                id: auth.user_id,
                role: auth.role,
            },
            permissions,
        },
    }))
}
