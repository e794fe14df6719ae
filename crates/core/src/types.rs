/// Todo identifiers are random v4 UUIDs, exposed as both `id` and `todoID`.
pub type TodoId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
