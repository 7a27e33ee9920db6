//! Storage crate: authorization persistence and repository abstractions.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – AuthorizationRecord, AuthorizationStatus
//! - [`repository`] – Repository trait
//! - [`authorization_repo`] – AuthorizationRepository (SQLite), an [`fbot_core::AuthorizationStore`]
//! - [`sqlite_pool`] – SqlitePoolManager

mod authorization_repo;
mod error;
mod models;
mod repository;
mod sqlite_pool;


pub use authorization_repo::AuthorizationRepository;
pub use error::StorageError;
pub use models::{AuthorizationRecord, AuthorizationStatus};
pub use repository::Repository;
pub use sqlite_pool::SqlitePoolManager;
