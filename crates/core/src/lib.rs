//! Core domain types and shared logic for the Berth NuGet repository.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Package identifiers and identities with their storage keys
//! - SemVer 2.0 version parsing, normalization and ordering
//! - Nupkg archive and nuspec manifest readers
//! - SHA-512 package hashes
//! - Configuration types

pub mod config;
pub mod error;
pub mod hash;
pub mod id;
pub mod nupkg;
pub mod nuspec;
pub mod version;

pub use error::{Error, Result};
pub use hash::Hash;
pub use id::{PackageId, PackageIdentity};
pub use nupkg::Nupkg;
pub use nuspec::Nuspec;
pub use version::Version;
