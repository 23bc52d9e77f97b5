//! Construction of topic version snapshots.
//!
//! Every path that writes a [`TopicVersion`] goes through
//! [`TopicVersionFactory`], which checks the snapshot is well formed
//! before it reaches a store.

use crate::error::CoreError;
use crate::topic::{Topic, TopicVersion, UpdateTopic};
use crate::types::{new_id, EntityId, Timestamp};

/// A version snapshot that has not been assigned an id or timestamps yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopicVersion {
    pub topic_id: EntityId,
    pub name: String,
    pub content: String,
    pub version: i32,
    pub parent_topic_id: Option<EntityId>,
}

impl NewTopicVersion {
    /// Materialize the snapshot with a fresh id, stamped at `now`.
    pub fn into_version(self, now: Timestamp) -> TopicVersion {
        TopicVersion {
            id: new_id(),
            topic_id: self.topic_id,
            name: self.name,
            content: self.content,
            version: self.version,
            parent_topic_id: self.parent_topic_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn checked(self) -> Result<Self, CoreError> {
        if self.topic_id.is_empty() || self.name.is_empty() || self.content.is_empty() {
            return Err(CoreError::Internal(format!(
                "Incomplete version snapshot for topic '{}'",
                self.topic_id
            )));
        }
        if self.version <= 0 {
            return Err(CoreError::Internal(format!(
                "Non-positive version {} for topic '{}'",
                self.version, self.topic_id
            )));
        }
        Ok(self)
    }
}

pub struct TopicVersionFactory;

impl TopicVersionFactory {
    /// Version 1, mirroring a freshly created topic.
    pub fn for_initial_creation(topic: &Topic) -> Result<NewTopicVersion, CoreError> {
        NewTopicVersion {
            topic_id: topic.id.clone(),
            name: topic.name.clone(),
            content: topic.content.clone(),
            version: 1,
            parent_topic_id: topic.parent_topic_id.clone(),
        }
        .checked()
    }

    /// The state `current` will have after `update` is applied, numbered
    /// `new_version`.
    pub fn for_update(
        current: &Topic,
        update: &UpdateTopic,
        new_version: i32,
    ) -> Result<NewTopicVersion, CoreError> {
        let merged = update.apply(current);
        NewTopicVersion {
            topic_id: merged.id,
            name: merged.name,
            content: merged.content,
            version: new_version,
            parent_topic_id: merged.parent_topic_id,
        }
        .checked()
    }

    /// The topic's current state, numbered with its own version unless
    /// `version` overrides it.
    pub fn for_snapshot(topic: &Topic, version: Option<i32>) -> Result<NewTopicVersion, CoreError> {
        NewTopicVersion {
            topic_id: topic.id.clone(),
            name: topic.name.clone(),
            content: topic.content.clone(),
            version: version.unwrap_or(topic.version),
            parent_topic_id: topic.parent_topic_id.clone(),
        }
        .checked()
    }
}
