//! Repository for `resources.json`.
//!
//! Topic existence is checked by the caller; this layer only stores records.

use chrono::Utc;
use kb_core::resource::{CreateResource, Resource, ResourceType, UpdateResource};
use kb_core::types::new_id;

use crate::{DataStore, DbError};

/// Provides CRUD operations for learning resources.
pub struct ResourceRepo;

impl ResourceRepo {
    pub async fn create(store: &DataStore, input: &CreateResource) -> Result<Resource, DbError> {
        let now = Utc::now();
        let resource = Resource {
            id: new_id(),
            topic_id: input.topic_id.clone(),
            url: input.url.clone(),
            description: input.description.clone(),
            resource_type: input.resource_type,
            created_at: now,
            updated_at: now,
        };
        let created = resource.clone();
        store
            .resources
            .modify(move |all| {
                all.push(resource);
                Ok(())
            })
            .await?;
        Ok(created)
    }

    pub async fn list(store: &DataStore) -> Result<Vec<Resource>, DbError> {
        store.resources.read_all().await
    }

    pub async fn find_by_id(store: &DataStore, id: &str) -> Result<Option<Resource>, DbError> {
        Ok(store
            .resources
            .read_all()
            .await?
            .into_iter()
            .find(|r| r.id == id))
    }

    /// Resources attached to `topic_id`, in insertion order.
    pub async fn list_by_topic(store: &DataStore, topic_id: &str) -> Result<Vec<Resource>, DbError> {
        Ok(store
            .resources
            .read_all()
            .await?
            .into_iter()
            .filter(|r| r.topic_id == topic_id)
            .collect())
    }

    pub async fn list_by_type(
        store: &DataStore,
        resource_type: ResourceType,
    ) -> Result<Vec<Resource>, DbError> {
        Ok(store
            .resources
            .read_all()
            .await?
            .into_iter()
            .filter(|r| r.resource_type == resource_type)
            .collect())
    }

    /// Apply a partial update. Returns `None` if no resource has `id`.
    pub async fn update(
        store: &DataStore,
        id: &str,
        input: &UpdateResource,
    ) -> Result<Option<Resource>, DbError> {
        store
            .resources
            .modify(|all| {
                let Some(resource) = all.iter_mut().find(|r| r.id == id) else {
                    return Ok(None);
                };
                if let Some(topic_id) = &input.topic_id {
                    resource.topic_id = topic_id.clone();
                }
                if let Some(url) = &input.url {
                    resource.url = url.clone();
                }
                if let Some(description) = &input.description {
                    resource.description = description.clone();
                }
                if let Some(resource_type) = input.resource_type {
                    resource.resource_type = resource_type;
                }
                resource.updated_at = Utc::now();
                Ok(Some(resource.clone()))
            })
            .await
    }

    /// Delete a resource. Returns `true` if a record was removed.
    pub async fn delete(store: &DataStore, id: &str) -> Result<bool, DbError> {
        store
            .resources
            .modify(|all| {
                let before = all.len();
                all.retain(|r| r.id != id);
                Ok(all.len() < before)
            })
            .await
    }
}
