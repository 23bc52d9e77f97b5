//! [`TopicStore`] over `topics.json`.

use async_trait::async_trait;
use kb_core::error::CoreError;
use kb_core::store::TopicStore;
use kb_core::topic::Topic;

use crate::DataStore;

#[async_trait]
impl TopicStore for DataStore {
    async fn load_all(&self) -> Result<Vec<Topic>, CoreError> {
        Ok(self.topics.read_all().await?)
    }

    async fn persist_all(&self, topics: &[Topic]) -> Result<(), CoreError> {
        self.topics.write_all(topics).await?;
        tracing::debug!(count = topics.len(), "Persisted topics");
        Ok(())
    }
}
