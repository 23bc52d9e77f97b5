//! Learning resources attached to topics.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Resource type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Video,
    Article,
    Pdf,
    Link,
}

/// All resource types, in display order.
pub const VALID_RESOURCE_TYPES: &[ResourceType] = &[
    ResourceType::Video,
    ResourceType::Article,
    ResourceType::Pdf,
    ResourceType::Link,
];

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Article => "article",
            Self::Pdf => "pdf",
            Self::Link => "link",
        }
    }

    /// Parse from the wire name (e.g. a path segment).
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        VALID_RESOURCE_TYPES
            .iter()
            .copied()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| {
                let valid: Vec<&str> = VALID_RESOURCE_TYPES.iter().map(|t| t.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid resource type '{name}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Records and DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: EntityId,
    pub topic_id: EntityId,
    pub url: String,
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateResource {
    #[serde(default)]
    #[validate(length(min = 1, message = "Topic ID must be a valid string"))]
    pub topic_id: EntityId,
    #[serde(default)]
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 500,
        message = "Description must be between 1 and 500 characters"
    ))]
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateResource {
    #[validate(length(min = 1, message = "Topic ID must be a valid string"))]
    pub topic_id: Option<EntityId>,
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,
    #[validate(length(
        min = 1,
        max = 500,
        message = "Description must be between 1 and 500 characters"
    ))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,
}

impl UpdateResource {
    pub fn is_empty(&self) -> bool {
        self.topic_id.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.resource_type.is_none()
    }
}
