//! Route definitions for permission introspection, registered under
//! `/permissions`.

use axum::routing::get;
use axum::Router;

use crate::handlers::permission;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/check", get(permission::check_permissions))
}
