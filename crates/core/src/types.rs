/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Version numbers are per-content PostgreSQL INTEGER values starting at 1.
pub type VersionNumber = i32;
