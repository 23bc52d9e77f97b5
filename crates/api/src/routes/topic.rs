//! Route definitions for topics, registered under `/topics`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::topic;
use crate::state::AppState;

/// ```text
/// GET    /                                list_topics
/// POST   /                                create_topic
/// GET    /path/{start_id}/{end_id}        find_shortest_path
/// GET    /{id}                            get_topic
/// PUT    /{id}                            update_topic
/// DELETE /{id}                            delete_topic
/// GET    /{id}/children                   list_children
/// GET    /{id}/tree                       get_topic_tree
/// GET    /{id}/versions                   list_versions
/// GET    /{id}/versions/{version}         get_version
/// POST   /{id}/snapshots                  create_snapshot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(topic::list_topics).post(topic::create_topic))
        .route("/path/{start_id}/{end_id}", get(topic::find_shortest_path))
        .route(
            "/{id}",
            get(topic::get_topic)
                .put(topic::update_topic)
                .delete(topic::delete_topic),
        )
        .route("/{id}/children", get(topic::list_children))
        .route("/{id}/tree", get(topic::get_topic_tree))
        .route("/{id}/versions", get(topic::list_versions))
        .route("/{id}/versions/{version}", get(topic::get_version))
        .route("/{id}/snapshots", post(topic::create_snapshot))
}
