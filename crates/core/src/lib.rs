//! Domain rules for the folio content versioning engine.
//!
//! This crate has zero internal dependencies so the database layer, the HTTP
//! layer, and any future tooling can share the same rules.

pub mod content;
pub mod diff;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod versioning;
