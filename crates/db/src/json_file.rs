//! A single JSON array file holding one record collection.
//!
//! Writes go to a sibling temp file that is then renamed over the target,
//! so readers always see either the old or the new collection in full.
//! Read-modify-write cycles on one file are serialized by an async mutex.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::DbError;

pub struct JsonFile<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with an empty array if it does not exist yet.
    pub async fn ensure_exists(&self) -> Result<(), DbError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "Creating empty data file");
                self.write_unlocked(&[]).await
            }
            Err(e) => Err(DbError::io(&self.path, e)),
        }
    }

    /// Every record in file order. A missing or blank file reads as empty.
    pub async fn read_all(&self) -> Result<Vec<T>, DbError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DbError::io(&self.path, e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| DbError::Serialization {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the whole collection.
    pub async fn write_all(&self, records: &[T]) -> Result<(), DbError> {
        let _guard = self.write_lock.lock().await;
        self.write_unlocked(records).await
    }

    /// Load, mutate and store the collection as one serialized step.
    ///
    /// Nothing is written when `f` returns an error.
    pub async fn modify<R, F>(&self, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, DbError> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let out = f(&mut records)?;
        self.write_unlocked(&records).await?;
        Ok(out)
    }

    async fn write_unlocked(&self, records: &[T]) -> Result<(), DbError> {
        let body =
            serde_json::to_vec_pretty(records).map_err(|source| DbError::Serialization {
                path: self.path.clone(),
                source,
            })?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| DbError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| DbError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u32,
        label: String,
    }

    fn row(id: u32) -> Row {
        Row {
            id,
            label: format!("row-{id}"),
        }
    }

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file: JsonFile<Row> = JsonFile::new(dir.path().join("rows.json"));
        assert!(file.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ensure_exists_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let file: JsonFile<Row> = JsonFile::new(dir.path().join("rows.json"));
        file.ensure_exists().await.unwrap();
        let raw = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[tokio::test]
    async fn ensure_exists_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("rows.json"));
        file.write_all(&[row(1)]).await.unwrap();
        file.ensure_exists().await.unwrap();
        assert_eq!(file.read_all().await.unwrap(), vec![row(1)]);
    }

    #[tokio::test]
    async fn write_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("rows.json"));
        file.write_all(&[row(3), row(1), row(2)]).await.unwrap();
        let ids: Vec<u32> = file.read_all().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(!dir.path().join("rows.json.tmp").exists());
    }

    #[tokio::test]
    async fn modify_error_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("rows.json"));
        file.write_all(&[row(1)]).await.unwrap();

        let result: Result<(), DbError> = file
            .modify(|rows| {
                rows.clear();
                Err(DbError::Conflict("nope".into()))
            })
            .await;
        assert_matches!(result, Err(DbError::Conflict(_)));
        assert_eq!(file.read_all().await.unwrap(), vec![row(1)]);
    }

    #[tokio::test]
    async fn malformed_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, "{not json").unwrap();
        let file: JsonFile<Row> = JsonFile::new(path);
        assert_matches!(file.read_all().await, Err(DbError::Serialization { .. }));
    }
}
