/// All record identifiers are UUID v4 strings.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh record identifier.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}
