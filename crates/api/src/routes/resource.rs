//! Route definitions for resources, registered under `/resources`.

use axum::routing::get;
use axum::Router;

use crate::handlers::resource;
use crate::state::AppState;

/// ```text
/// GET    /                      list_resources
/// POST   /                      create_resource
/// GET    /topic/{topic_id}      list_by_topic
/// GET    /type/{type}           list_by_type
/// GET    /{id}                  get_resource
/// PUT    /{id}                  update_resource
/// DELETE /{id}                  delete_resource
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(resource::list_resources).post(resource::create_resource),
        )
        .route("/topic/{topic_id}", get(resource::list_by_topic))
        .route("/type/{resource_type}", get(resource::list_by_type))
        .route(
            "/{id}",
            get(resource::get_resource)
                .put(resource::update_resource)
                .delete(resource::delete_resource),
        )
}
