use std::path::PathBuf;

use kb_core::error::CoreError;

/// Errors raised by the JSON data store.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data in {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Conflict(String),
}

impl DbError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DbError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Conflict(msg) => CoreError::Conflict(msg),
            other => CoreError::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn io_maps_to_storage() {
        let err = DbError::io(
            "data/topics.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_matches!(CoreError::from(err), CoreError::Storage(msg) if msg.contains("topics.json"));
    }

    #[test]
    fn conflict_passes_through() {
        let err = DbError::Conflict("Email already exists".into());
        assert_matches!(CoreError::from(err), CoreError::Conflict(msg) if msg == "Email already exists");
    }

    #[test]
    fn malformed_file_maps_to_storage() {
        let source = serde_json::from_str::<Vec<u8>>("[{").unwrap_err();
        let err = DbError::Serialization {
            path: "data/users.json".into(),
            source,
        };
        assert_matches!(CoreError::from(err), CoreError::Storage(msg) if msg.starts_with("Malformed data"));
    }
}
