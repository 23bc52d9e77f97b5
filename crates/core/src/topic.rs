//! Topic domain model: persisted records, request DTOs, and the derived
//! tree / path shapes returned by the hierarchy engine.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A topic in the knowledge base.
///
/// `parent_topic_id` of `None` marks a root. Parent links across the whole
/// collection form a forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: EntityId,
    pub name: String,
    pub content: String,
    pub version: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_topic_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An immutable snapshot of a topic at a given version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicVersion {
    pub id: EntityId,
    pub topic_id: EntityId,
    pub name: String,
    pub content: String,
    pub version: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_topic_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a topic.
///
/// Missing `name` / `content` deserialize as empty strings so they surface
/// as validation errors rather than body rejections.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTopic {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 10000,
        message = "Content must be between 1 and 10000 characters"
    ))]
    pub content: String,
    pub parent_topic_id: Option<EntityId>,
}

/// DTO for updating a topic. Every field is optional.
///
/// `parent_topic_id` is tri-state:
/// - absent: keep the current parent
/// - `null`: detach, the topic becomes a root
/// - a value: re-parent under that topic
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTopic {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[validate(length(
        min = 1,
        max = 10000,
        message = "Content must be between 1 and 10000 characters"
    ))]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub parent_topic_id: Option<Option<EntityId>>,
}

impl UpdateTopic {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none() && self.parent_topic_id.is_none()
    }

    /// The new parent id, if the update re-parents under a concrete topic.
    pub fn new_parent(&self) -> Option<&str> {
        match &self.parent_topic_id {
            Some(Some(id)) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Merge the supplied fields over `topic`.
    ///
    /// Only `name`, `content` and `parent_topic_id` change; version and
    /// timestamps are left for the caller.
    pub fn apply(&self, topic: &Topic) -> Topic {
        Topic {
            name: self.name.clone().unwrap_or_else(|| topic.name.clone()),
            content: self.content.clone().unwrap_or_else(|| topic.content.clone()),
            parent_topic_id: match &self.parent_topic_id {
                Some(parent) => parent.clone(),
                None => topic.parent_topic_id.clone(),
            },
            ..topic.clone()
        }
    }
}

/// Wraps any present value (including `null`) in `Some`, so a missing key
/// and an explicit `null` stay distinguishable.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Derived shapes
// ---------------------------------------------------------------------------

/// A topic with its recursively nested children. Rebuilt on demand.
///
/// Trees are cut off at [`MAX_TREE_DEPTH`] levels; a node whose children
/// were left out carries `truncated: true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicTree {
    #[serde(flatten)]
    pub topic: Topic,
    pub children: Vec<TopicTree>,
    #[serde(skip_serializing_if = "is_false")]
    pub truncated: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Deepest tree (in nodes, root included) that is built and serialized.
pub const MAX_TREE_DEPTH: usize = 256;

/// Aggregates computed from a [`TopicTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeMetadata {
    pub total_topics: usize,
    pub depth: usize,
    pub truncated: bool,
}

impl TopicTree {
    /// Every node with its level (root = 1), parents before children.
    /// Walks an explicit stack, not the call stack.
    fn nodes(&self) -> impl Iterator<Item = (&TopicTree, usize)> + '_ {
        let mut stack = vec![(self, 1)];
        std::iter::from_fn(move || {
            let (node, level) = stack.pop()?;
            stack.extend(node.children.iter().rev().map(|c| (c, level + 1)));
            Some((node, level))
        })
    }

    /// 1 + the number of descendants.
    pub fn total_topics(&self) -> usize {
        self.nodes().count()
    }

    /// Number of nodes on the longest root-to-leaf path (a lone node is 1).
    pub fn depth(&self) -> usize {
        self.nodes().map(|(_, level)| level).max().unwrap_or(1)
    }

    pub fn metadata(&self) -> TreeMetadata {
        let mut meta = TreeMetadata {
            total_topics: 0,
            depth: 0,
            truncated: false,
        };
        for (node, level) in self.nodes() {
            meta.total_topics += 1;
            meta.depth = meta.depth.max(level);
            meta.truncated |= node.truncated;
        }
        meta
    }
}

/// Result of a shortest-path query between two topics.
///
/// When no path exists, `found` is false, `path` is empty and `distance`
/// is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicPath {
    pub start_topic_id: EntityId,
    pub end_topic_id: EntityId,
    pub path: Vec<EntityId>,
    pub path_names: Vec<String>,
    pub distance: usize,
    pub found: bool,
}

impl TopicPath {
    pub fn not_found(start_id: &str, end_id: &str) -> Self {
        Self {
            start_topic_id: start_id.to_string(),
            end_topic_id: end_id.to_string(),
            path: Vec::new(),
            path_names: Vec::new(),
            distance: 0,
            found: false,
        }
    }

    /// Build a found path from the ordered topics along it.
    pub fn from_hops(start_id: &str, end_id: &str, hops: &[&Topic]) -> Self {
        Self {
            start_topic_id: start_id.to_string(),
            end_topic_id: end_id.to_string(),
            path: hops.iter().map(|t| t.id.clone()).collect(),
            path_names: hops.iter().map(|t| t.name.clone()).collect(),
            distance: hops.len().saturating_sub(1),
            found: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
