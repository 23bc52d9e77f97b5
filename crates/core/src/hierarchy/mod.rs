//! Topic hierarchy engine.
//!
//! [`TopicHierarchy`] owns every topic mutation and the graph queries
//! (tree, shortest path) over the parent-pointer forest. Storage is
//! injected through [`TopicStore`] / [`TopicVersionStore`].
//!
//! Mutations hold an internal write lock for their whole read-modify-write
//! cycle, so version numbers advance by exactly one per update and the
//! acyclicity check always sees the latest collection. Reads take one
//! snapshot via `load_all` and compute on it without locking.

pub mod graph;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use validator::Validate;

use crate::error::CoreError;
use crate::store::memory::{InMemoryTopicStore, InMemoryTopicVersionStore};
use crate::store::{TopicStore, TopicVersionStore};
use crate::topic::{CreateTopic, Topic, TopicPath, TopicTree, TopicVersion, UpdateTopic};
use crate::types::new_id;
use crate::validation::{validate_id, validate_version_number};
use crate::version_factory::TopicVersionFactory;

pub use graph::TopicGraph;

const TOPIC: &str = "Topic";
const PARENT_TOPIC: &str = "Parent topic";
const TOPIC_VERSION: &str = "Topic version";

pub struct TopicHierarchy {
    topics: Arc<dyn TopicStore>,
    versions: Arc<dyn TopicVersionStore>,
    write_lock: Mutex<()>,
}

impl TopicHierarchy {
    pub fn new(topics: Arc<dyn TopicStore>, versions: Arc<dyn TopicVersionStore>) -> Self {
        Self {
            topics,
            versions,
            write_lock: Mutex::new(()),
        }
    }

    /// An engine backed by empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryTopicStore::new()),
            Arc::new(InMemoryTopicVersionStore::new()),
        )
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a topic at version 1 and record its initial snapshot.
    pub async fn create_topic(&self, input: CreateTopic) -> Result<Topic, CoreError> {
        input.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut all = self.topics.load_all().await?;

        if let Some(parent_id) = input.parent_topic_id.as_deref() {
            if !all.iter().any(|t| t.id == parent_id) {
                return Err(CoreError::not_found(PARENT_TOPIC, parent_id));
            }
        }

        let now = Utc::now();
        let topic = Topic {
            id: new_id(),
            name: input.name,
            content: input.content,
            version: 1,
            parent_topic_id: input.parent_topic_id,
            created_at: now,
            updated_at: now,
        };
        let snapshot = TopicVersionFactory::for_initial_creation(&topic)?;

        all.push(topic.clone());
        self.topics.persist_all(&all).await?;
        self.versions.append(snapshot.into_version(now)).await?;

        tracing::debug!(topic_id = %topic.id, parent_topic_id = ?topic.parent_topic_id, "Topic created");
        Ok(topic)
    }

    /// Apply a partial update, bump the version and record the new snapshot.
    ///
    /// Every check runs before anything is written. The snapshot is appended
    /// before the topic collection is persisted.
    pub async fn update_topic(&self, id: &str, input: UpdateTopic) -> Result<Topic, CoreError> {
        validate_id(id, "Topic ID")?;
        if input.is_empty() {
            return Err(CoreError::Validation(
                "At least one field (name, content, parent_topic_id) must be provided".into(),
            ));
        }
        input.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut all = self.topics.load_all().await?;

        let (snapshot, updated) = {
            let graph = TopicGraph::new(&all);
            let current = graph.get(id).ok_or_else(|| CoreError::not_found(TOPIC, id))?;

            if let Some(new_parent) = input.new_parent() {
                if current.parent_topic_id.as_deref() != Some(new_parent) {
                    if !graph.contains(new_parent) {
                        return Err(CoreError::not_found(PARENT_TOPIC, new_parent));
                    }
                    if new_parent == id {
                        return Err(CoreError::CircularReference(
                            "A topic cannot be its own parent".into(),
                        ));
                    }
                    if graph.would_create_cycle(id, new_parent) {
                        tracing::warn!(topic_id = %id, parent_topic_id = %new_parent, "Rejected re-parent: cycle");
                        return Err(CoreError::CircularReference(format!(
                            "Setting '{new_parent}' as parent of '{id}' would create a cycle"
                        )));
                    }
                }
            }

            let new_version = current.version + 1;
            let snapshot = TopicVersionFactory::for_update(current, &input, new_version)?;
            let updated = Topic {
                version: new_version,
                updated_at: Utc::now(),
                ..input.apply(current)
            };
            (snapshot, updated)
        };

        if self.versions.find(id, updated.version).await?.is_some() {
            return Err(CoreError::Conflict(format!(
                "Version {} already exists for topic '{id}'",
                updated.version
            )));
        }
        self.versions
            .append(snapshot.into_version(updated.updated_at))
            .await?;

        if let Some(slot) = all.iter_mut().find(|t| t.id == id) {
            *slot = updated.clone();
        }
        self.topics.persist_all(&all).await?;

        tracing::debug!(topic_id = %id, version = updated.version, "Topic updated");
        Ok(updated)
    }

    /// Remove a topic and all of its snapshots.
    ///
    /// Children are left in place with their parent link pointing at the
    /// removed id.
    pub async fn delete_topic(&self, id: &str) -> Result<(), CoreError> {
        validate_id(id, "Topic ID")?;

        let _guard = self.write_lock.lock().await;
        let mut all = self.topics.load_all().await?;
        let position = all
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found(TOPIC, id))?;

        all.remove(position);
        let orphaned = all
            .iter()
            .filter(|t| t.parent_topic_id.as_deref() == Some(id))
            .count();
        self.topics.persist_all(&all).await?;
        let removed_versions = self.versions.delete_by_topic(id).await?;

        if orphaned > 0 {
            tracing::warn!(topic_id = %id, orphaned, "Deleted topic still had children");
        }
        tracing::debug!(topic_id = %id, removed_versions, "Topic deleted");
        Ok(())
    }

    /// Record a snapshot of the topic's current state.
    ///
    /// Uses the topic's own version number unless `version` overrides it.
    /// An override may not run ahead of the topic's version, and each
    /// version number can be recorded only once per topic.
    pub async fn create_snapshot(
        &self,
        id: &str,
        version: Option<i32>,
    ) -> Result<TopicVersion, CoreError> {
        validate_id(id, "Topic ID")?;
        if let Some(v) = version {
            validate_version_number(v)?;
        }

        let _guard = self.write_lock.lock().await;
        let all = self.topics.load_all().await?;
        let topic = all
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found(TOPIC, id))?;

        if let Some(v) = version.filter(|&v| v > topic.version) {
            return Err(CoreError::Validation(format!(
                "Snapshot version {v} is ahead of the topic's current version {}",
                topic.version
            )));
        }

        let snapshot = TopicVersionFactory::for_snapshot(topic, version)?;
        if self.versions.find(id, snapshot.version).await?.is_some() {
            return Err(CoreError::Conflict(format!(
                "Version {} already exists for topic '{id}'",
                snapshot.version
            )));
        }

        let stored = self.versions.append(snapshot.into_version(Utc::now())).await?;
        tracing::debug!(topic_id = %id, version = stored.version, "Topic snapshot recorded");
        Ok(stored)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub async fn list_topics(&self) -> Result<Vec<Topic>, CoreError> {
        self.topics.load_all().await
    }

    pub async fn get_topic(&self, id: &str) -> Result<Topic, CoreError> {
        validate_id(id, "Topic ID")?;
        self.topics
            .load_all()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found(TOPIC, id))
    }

    /// Direct children of `parent`, or the root topics when `parent` is
    /// `None`.
    pub async fn list_children(&self, parent: Option<&str>) -> Result<Vec<Topic>, CoreError> {
        Ok(self
            .topics
            .load_all()
            .await?
            .into_iter()
            .filter(|t| t.parent_topic_id.as_deref() == parent)
            .collect())
    }

    /// Topics whose name contains `fragment`, ignoring case.
    pub async fn find_by_name(&self, fragment: &str) -> Result<Vec<Topic>, CoreError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .topics
            .load_all()
            .await?
            .into_iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// The subtree rooted at `root_id`.
    pub async fn get_topic_tree(&self, root_id: &str) -> Result<TopicTree, CoreError> {
        validate_id(root_id, "Topic ID")?;
        let all = self.topics.load_all().await?;
        TopicGraph::new(&all)
            .build_tree(root_id)
            .ok_or_else(|| CoreError::not_found(TOPIC, root_id))
    }

    /// Fewest-edges path between two topics. Unknown or disconnected
    /// endpoints yield `found = false` rather than an error.
    pub async fn find_shortest_path(
        &self,
        start_id: &str,
        end_id: &str,
    ) -> Result<TopicPath, CoreError> {
        validate_id(start_id, "Start Topic ID")?;
        validate_id(end_id, "End Topic ID")?;
        let all = self.topics.load_all().await?;
        Ok(TopicGraph::new(&all).shortest_path(start_id, end_id))
    }

    /// Every snapshot of a topic, newest first.
    pub async fn get_topic_versions(&self, topic_id: &str) -> Result<Vec<TopicVersion>, CoreError> {
        self.get_topic_history(topic_id)
            .await
            .map(|(_, versions)| versions)
    }

    /// The topic together with its snapshots (newest first), both taken
    /// from the same read of the topic collection.
    pub async fn get_topic_history(
        &self,
        topic_id: &str,
    ) -> Result<(Topic, Vec<TopicVersion>), CoreError> {
        let topic = self.get_topic(topic_id).await?;
        let versions = self.versions.list_by_topic(topic_id).await?;
        Ok((topic, versions))
    }

    pub async fn get_topic_version(
        &self,
        topic_id: &str,
        version: i32,
    ) -> Result<TopicVersion, CoreError> {
        validate_version_number(version)?;
        self.ensure_exists(topic_id).await?;
        self.versions
            .find(topic_id, version)
            .await?
            .ok_or_else(|| CoreError::not_found(TOPIC_VERSION, format!("{topic_id} v{version}")))
    }

    async fn ensure_exists(&self, topic_id: &str) -> Result<(), CoreError> {
        validate_id(topic_id, "Topic ID")?;
        let all = self.topics.load_all().await?;
        if all.iter().any(|t| t.id == topic_id) {
            Ok(())
        } else {
            Err(CoreError::not_found(TOPIC, topic_id))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
