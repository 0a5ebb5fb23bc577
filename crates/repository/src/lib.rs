//! Package ingestion and metadata pipeline for Berth.
//!
//! This crate orchestrates the repository core:
//! - Ingestion of pushed packages into the object store
//! - The per-package versions index
//! - Registration metadata documents for the read side

pub mod error;
pub mod registration;
pub mod repository;
pub mod versions;

pub use error::{RepositoryError, RepositoryResult};
pub use registration::{
    CatalogEntry, ContentLocation, Registration, RegistrationIndex, RegistrationLeaf,
    RegistrationPage,
};
pub use repository::Repository;
pub use versions::Versions;
