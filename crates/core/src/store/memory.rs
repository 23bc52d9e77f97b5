//! In-memory store implementations, used by unit tests and anywhere a
//! throwaway engine is handy.
//!
//! Collections live in a `Vec` behind `std::sync::RwLock`; no lock is held
//! across an await point.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::CoreError;
use crate::topic::{Topic, TopicVersion};

use super::{TopicStore, TopicVersionStore};

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, CoreError> {
    lock.read()
        .map_err(|_| CoreError::Storage("in-memory store lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, CoreError> {
    lock.write()
        .map_err(|_| CoreError::Storage("in-memory store lock poisoned".into()))
}

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryTopicStore {
    topics: RwLock<Vec<Topic>>,
}

impl InMemoryTopicStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TopicStore for InMemoryTopicStore {
    async fn load_all(&self) -> Result<Vec<Topic>, CoreError> {
        Ok(read(&self.topics)?.clone())
    }

    async fn persist_all(&self, topics: &[Topic]) -> Result<(), CoreError> {
        *write(&self.topics)? = topics.to_vec();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Versions
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryTopicVersionStore {
    versions: RwLock<Vec<TopicVersion>>,
}

impl InMemoryTopicVersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of snapshots across all topics.
    pub fn len(&self) -> usize {
        self.versions.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TopicVersionStore for InMemoryTopicVersionStore {
    async fn append(&self, version: TopicVersion) -> Result<TopicVersion, CoreError> {
        write(&self.versions)?.push(version.clone());
        Ok(version)
    }

    async fn list_by_topic(&self, topic_id: &str) -> Result<Vec<TopicVersion>, CoreError> {
        let mut matching: Vec<TopicVersion> = read(&self.versions)?
            .iter()
            .filter(|v| v.topic_id == topic_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(matching)
    }

    async fn find(
        &self,
        topic_id: &str,
        version: i32,
    ) -> Result<Option<TopicVersion>, CoreError> {
        Ok(read(&self.versions)?
            .iter()
            .find(|v| v.topic_id == topic_id && v.version == version)
            .cloned())
    }

    async fn delete_by_topic(&self, topic_id: &str) -> Result<usize, CoreError> {
        let mut versions = write(&self.versions)?;
        let before = versions.len();
        versions.retain(|v| v.topic_id != topic_id);
        Ok(before - versions.len())
    }
}
