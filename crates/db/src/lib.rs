//! JSON-file persistence for the knowledge base.
//!
//! A [`DataStore`] owns one data directory containing four record files:
//!
//! | File | Records |
//! |------|---------|
//! | `topics.json` | [`Topic`](kb_core::topic::Topic) |
//! | `topic-versions.json` | [`TopicVersion`](kb_core::topic::TopicVersion) |
//! | `users.json` | [`User`](kb_core::user::User) |
//! | `resources.json` | [`Resource`](kb_core::resource::Resource) |
//!
//! Topics and versions are reached through the `kb_core::store` traits,
//! users and resources through the repositories in [`repositories`].

pub mod error;
pub mod json_file;
pub mod repositories;

use std::path::{Path, PathBuf};

use kb_core::resource::Resource;
use kb_core::topic::{Topic, TopicVersion};
use kb_core::user::User;

pub use error::DbError;
use json_file::JsonFile;

pub const TOPICS_FILE: &str = "topics.json";
pub const TOPIC_VERSIONS_FILE: &str = "topic-versions.json";
pub const USERS_FILE: &str = "users.json";
pub const RESOURCES_FILE: &str = "resources.json";

pub struct DataStore {
    dir: PathBuf,
    pub(crate) topics: JsonFile<Topic>,
    pub(crate) topic_versions: JsonFile<TopicVersion>,
    pub(crate) users: JsonFile<User>,
    pub(crate) resources: JsonFile<Resource>,
}

impl DataStore {
    /// Bind a store to `dir` without touching the file system.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            topics: JsonFile::new(dir.join(TOPICS_FILE)),
            topic_versions: JsonFile::new(dir.join(TOPIC_VERSIONS_FILE)),
            users: JsonFile::new(dir.join(USERS_FILE)),
            resources: JsonFile::new(dir.join(RESOURCES_FILE)),
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the data directory and any missing record file.
    pub async fn ensure_data_files(&self) -> Result<(), DbError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DbError::io(&self.dir, e))?;
        self.topics.ensure_exists().await?;
        self.topic_versions.ensure_exists().await?;
        self.users.ensure_exists().await?;
        self.resources.ensure_exists().await?;
        Ok(())
    }
}

/// Open (and initialize if needed) the data directory at `dir`.
pub async fn open_store(dir: impl AsRef<Path>) -> Result<DataStore, DbError> {
    let store = DataStore::new(dir.as_ref());
    store.ensure_data_files().await?;
    tracing::info!(dir = %store.dir().display(), "Data store ready");
    Ok(store)
}

/// Verify the data directory is still reachable.
pub async fn health_check(store: &DataStore) -> Result<(), DbError> {
    let meta = tokio::fs::metadata(store.dir())
        .await
        .map_err(|e| DbError::io(store.dir(), e))?;
    if !meta.is_dir() {
        return Err(DbError::io(
            store.dir(),
            std::io::Error::other("data path is not a directory"),
        ));
    }
    tokio::fs::read_dir(store.dir())
        .await
        .map_err(|e| DbError::io(store.dir(), e))?;
    Ok(())
}
