//! [`TopicVersionStore`] over `topic-versions.json`.
//!
//! Snapshots are append-only; the only removal is the bulk delete that
//! accompanies a topic delete.

use async_trait::async_trait;
use kb_core::error::CoreError;
use kb_core::store::TopicVersionStore;
use kb_core::topic::TopicVersion;

use crate::DataStore;

#[async_trait]
impl TopicVersionStore for DataStore {
    async fn append(&self, version: TopicVersion) -> Result<TopicVersion, CoreError> {
        let stored = version.clone();
        self.topic_versions
            .modify(move |all| {
                all.push(version);
                Ok(())
            })
            .await?;
        Ok(stored)
    }

    async fn list_by_topic(&self, topic_id: &str) -> Result<Vec<TopicVersion>, CoreError> {
        let mut versions: Vec<TopicVersion> = self
            .topic_versions
            .read_all()
            .await?
            .into_iter()
            .filter(|v| v.topic_id == topic_id)
            .collect();
        versions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(versions)
    }

    async fn find(
        &self,
        topic_id: &str,
        version: i32,
    ) -> Result<Option<TopicVersion>, CoreError> {
        Ok(self
            .topic_versions
            .read_all()
            .await?
            .into_iter()
            .find(|v| v.topic_id == topic_id && v.version == version))
    }

    async fn delete_by_topic(&self, topic_id: &str) -> Result<usize, CoreError> {
        let removed = self
            .topic_versions
            .modify(|all| {
                let before = all.len();
                all.retain(|v| v.topic_id != topic_id);
                Ok(before - all.len())
            })
            .await?;
        Ok(removed)
    }
}
