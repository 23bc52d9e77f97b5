//! Handlers for topics: CRUD, hierarchy queries and version history.
//!
//! Every handler resolves the caller with [`AuthUser`] and checks the
//! matching [`Action`] before touching the engine.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use kb_core::error::CoreError;
use kb_core::roles::Action;
use kb_core::topic::{CreateTopic, UpdateTopic};
use kb_core::validation::validate_id;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DataWithMeta};
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response types
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct ListTopicsParams {
    /// Case-insensitive name fragment.
    pub name: Option<String>,
    /// Only return topics without a parent.
    #[serde(default)]
    pub roots: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SnapshotRequest {
    pub version: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct VersionListMeta {
    pub current_version: i32,
    pub count: usize,
}

fn parse_version(raw: &str) -> AppResult<i32> {
    raw.trim().parse::<i32>().map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "Version must be an integer, got '{raw}'"
        )))
    })
}

/* --------------------------------------------------------------------------
CRUD
-------------------------------------------------------------------------- */

/// GET /topics
///
/// List topics, optionally filtered by `?name=` or restricted to roots with
/// `?roots=true`.
pub async fn list_topics(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListTopicsParams>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewTopics)?;

    let topics = match params.name.as_deref() {
        Some(name) => {
            let mut hits = state.topics.find_by_name(name).await?;
            if params.roots {
                hits.retain(|t| t.parent_topic_id.is_none());
            }
            hits
        }
        None if params.roots => state.topics.list_children(None).await?,
        None => state.topics.list_topics().await?,
    };

    Ok(Json(DataResponse { data: topics }))
}

/// POST /topics
pub async fn create_topic(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTopic>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::CreateTopics)?;

    let topic = state.topics.create_topic(input).await?;

    tracing::info!(
        user_id = %auth.user_id,
        topic_id = %topic.id,
        parent_topic_id = ?topic.parent_topic_id,
        "Topic created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: topic })))
}

/// GET /topics/{id}
pub async fn get_topic(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewTopics)?;
    let topic = state.topics.get_topic(&id).await?;
    Ok(Json(DataResponse { data: topic }))
}

/// PUT /topics/{id}
///
/// Partial update. `parent_topic_id: null` detaches the topic to a root.
pub async fn update_topic(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTopic>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::UpdateTopics)?;

    let topic = state.topics.update_topic(&id, input).await?;

    tracing::info!(
        user_id = %auth.user_id,
        topic_id = %topic.id,
        version = topic.version,
        "Topic updated"
    );

    Ok(Json(DataResponse { data: topic }))
}

/// DELETE /topics/{id}
///
/// Removes the topic and its version history. Children are not touched.
pub async fn delete_topic(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    auth.require(Action::DeleteTopics)?;

    state.topics.delete_topic(&id).await?;

    tracing::info!(user_id = %auth.user_id, topic_id = %id, "Topic deleted");

    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Hierarchy
-------------------------------------------------------------------------- */

/// GET /topics/{id}/children
pub async fn list_children(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewTopics)?;
    state.topics.get_topic(&id).await?;
    let children = state.topics.list_children(Some(&id)).await?;
    Ok(Json(DataResponse { data: children }))
}

/// GET /topics/{id}/tree
pub async fn get_topic_tree(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::AccessTopicTree)?;
    let tree = state.topics.get_topic_tree(&id).await?;
    let meta = tree.metadata();
    Ok(Json(DataWithMeta { data: tree, meta }))
}

/// GET /topics/path/{start_id}/{end_id}
///
/// Always 200 for well-formed ids; `found: false` when no path exists.
pub async fn find_shortest_path(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((start_id, end_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::AccessShortestPath)?;
    let path = state.topics.find_shortest_path(&start_id, &end_id).await?;
    Ok(Json(DataResponse { data: path }))
}

/* --------------------------------------------------------------------------
Versions
-------------------------------------------------------------------------- */

/// GET /topics/{id}/versions
///
/// Newest first, with the topic's current version in `meta`.
pub async fn list_versions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewTopicVersions)?;
    let (topic, versions) = state.topics.get_topic_history(&id).await?;
    let meta = VersionListMeta {
        current_version: topic.version,
        count: versions.len(),
    };
    Ok(Json(DataWithMeta {
        data: versions,
        meta,
    }))
}

/// GET /topics/{id}/versions/{version}
pub async fn get_version(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, version)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::ViewTopicVersions)?;
    validate_id(&id, "Topic ID")?;
    let version = parse_version(&version)?;
    let snapshot = state.topics.get_topic_version(&id, version).await?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /topics/{id}/snapshots
///
/// Record the topic's current state as a version. Body: `{ "version"?: n }`.
pub async fn create_snapshot(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SnapshotRequest>,
) -> AppResult<impl IntoResponse> {
    auth.require(Action::UpdateTopics)?;

    let snapshot = state.topics.create_snapshot(&id, input.version).await?;

    tracing::info!(
        user_id = %auth.user_id,
        topic_id = %id,
        version = snapshot.version,
        "Topic snapshot created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: snapshot })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_path_segment_must_be_numeric() {
        assert_eq!(parse_version("3").unwrap(), 3);
        assert!(parse_version("three").is_err());
        assert_eq!(parse_version("0").unwrap(), 0);
    }
}
