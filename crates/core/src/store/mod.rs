//! Storage seams for the hierarchy engine.
//!
//! The engine only talks to these traits. `kb-db` provides the JSON-file
//! implementation; [`memory`] provides in-process stores for tests.
//!
//! | Trait | Method | Purpose |
//! |-------|--------|---------|
//! | [`TopicStore`] | `load_all` | Every topic, in insertion order |
//! | [`TopicStore`] | `persist_all` | Replace the whole collection |
//! | [`TopicVersionStore`] | `append` | Add one snapshot |
//! | [`TopicVersionStore`] | `list_by_topic` | Snapshots of a topic, newest first |
//! | [`TopicVersionStore`] | `find` | One snapshot by topic and version |
//! | [`TopicVersionStore`] | `delete_by_topic` | Drop every snapshot of a topic |

pub mod memory;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::topic::{Topic, TopicVersion};

#[async_trait]
pub trait TopicStore: Send + Sync {
    /// All topics, in insertion order.
    async fn load_all(&self) -> Result<Vec<Topic>, CoreError>;

    /// Replace the stored collection with `topics`.
    async fn persist_all(&self, topics: &[Topic]) -> Result<(), CoreError>;
}

#[async_trait]
pub trait TopicVersionStore: Send + Sync {
    async fn append(&self, version: TopicVersion) -> Result<TopicVersion, CoreError>;

    /// Snapshots of `topic_id`, ordered by version descending.
    async fn list_by_topic(&self, topic_id: &str) -> Result<Vec<TopicVersion>, CoreError>;

    async fn find(&self, topic_id: &str, version: i32)
        -> Result<Option<TopicVersion>, CoreError>;

    /// Remove every snapshot of `topic_id`, returning how many were removed.
    async fn delete_by_topic(&self, topic_id: &str) -> Result<usize, CoreError>;
}
