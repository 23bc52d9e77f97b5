use std::sync::Arc;

use kb_core::hierarchy::TopicHierarchy;
use kb_db::DataStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// JSON record files (users, resources; also backs the topic engine).
    pub store: Arc<DataStore>,
    /// Topic hierarchy engine running on `store`.
    pub topics: Arc<TopicHierarchy>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<DataStore>, config: ServerConfig) -> Self {
        let topics = TopicHierarchy::new(store.clone(), store.clone());
        Self {
            store,
            topics: Arc::new(topics),
            config: Arc::new(config),
        }
    }
}
