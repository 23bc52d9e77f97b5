pub mod health;
pub mod permission;
pub mod resource;
pub mod topic;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/setup                                     bootstrap user (public)
/// /users                                           list, create
/// /users/email/{email}                             get by email
/// /users/{id}                                      get, update, delete
///
/// /topics                                          list (?name=, ?roots=), create
/// /topics/path/{start_id}/{end_id}                 shortest path
/// /topics/{id}                                     get, update, delete
/// /topics/{id}/children                            direct children
/// /topics/{id}/tree                                nested subtree
/// /topics/{id}/versions                            version history
/// /topics/{id}/versions/{version}                  one version
/// /topics/{id}/snapshots                           record snapshot (POST)
///
/// /resources                                       list, create
/// /resources/topic/{topic_id}                      by topic
/// /resources/type/{type}                           by type
/// /resources/{id}                                  get, update, delete
///
/// /permissions/check                               capability summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user::router())
        .nest("/topics", topic::router())
        .nest("/resources", resource::router())
        .nest("/permissions", permission::router())
}
