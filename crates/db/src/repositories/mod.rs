//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Reads
//! accept any `PgExecutor` (a pool or an open transaction); writes that must
//! be atomic with the version history take `&mut Transaction` explicitly.

pub mod content_repo;
pub mod content_version_repo;

pub use content_repo::ContentRepo;
pub use content_version_repo::ContentVersionRepo;
