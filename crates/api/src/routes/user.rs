//! Route definitions for users, registered under `/users`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// ```text
/// POST   /setup                 setup_user (no auth)
/// GET    /                      list_users
/// POST   /                      create_user
/// GET    /email/{email}         get_user_by_email
/// GET    /{id}                  get_user
/// PUT    /{id}                  update_user
/// DELETE /{id}                  delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/setup", post(user::setup_user))
        .route("/", get(user::list_users).post(user::create_user))
        .route("/email/{email}", get(user::get_user_by_email))
        .route(
            "/{id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
}
