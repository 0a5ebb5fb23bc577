//! NuGet registration metadata documents.
//!
//! See the registration-base-url resource in the NuGet v3 protocol. A
//! single page suffices here; pagination is not implemented.

use crate::error::RepositoryResult;
use crate::repository::Repository;
use berth_core::{PackageId, PackageIdentity};
use serde::Serialize;
use std::sync::Arc;

/// Supplies the absolute download URL for a stored package.
pub trait ContentLocation: Send + Sync {
    /// The `packageContent` URL for an identity.
    fn url(&self, identity: &PackageIdentity) -> String;
}

/// The registration index document.
#[derive(Debug, Serialize)]
pub struct RegistrationIndex {
    /// Number of pages.
    pub count: usize,
    /// Registration pages, ascending.
    pub items: Vec<RegistrationPage>,
}

/// A registration page covering a contiguous version range.
#[derive(Debug, Serialize)]
pub struct RegistrationPage {
    #[serde(rename = "@id")]
    pub id: String,
    /// Number of leaves in this page.
    pub count: usize,
    /// Normalized form of the smallest version.
    pub lower: String,
    /// Normalized form of the largest version.
    pub upper: String,
    /// One leaf per version, ascending.
    pub items: Vec<RegistrationLeaf>,
}

/// A registration leaf describing one package version.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationLeaf {
    #[serde(rename = "@id")]
    pub id: String,
    pub package_content: String,
    pub listed: bool,
    pub catalog_entry: CatalogEntry,
}

/// The catalog entry embedded in a registration leaf.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(rename = "@id")]
    pub entry_id: String,
    /// Package id with the casing found in its `.nuspec`.
    pub id: String,
    /// Normalized version.
    pub version: String,
    pub listed: bool,
    pub package_content: String,
}

/// Produces registration documents from stored package metadata.
#[derive(Clone)]
pub struct Registration {
    repository: Arc<Repository>,
    content: Arc<dyn ContentLocation>,
    base_url: String,
}

impl Registration {
    /// Create a registration view. `base_url` is the public base URL
    /// without a trailing slash.
    pub fn new(
        repository: Arc<Repository>,
        content: Arc<dyn ContentLocation>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            content,
            base_url: base_url.into(),
        }
    }

    /// The registration index for a package. With no stored versions the
    /// document has zero pages.
    pub async fn index(&self, id: &PackageId) -> RepositoryResult<RegistrationIndex> {
        let versions = self.repository.versions(id).await?;
        if versions.is_empty() {
            return Ok(RegistrationIndex {
                count: 0,
                items: Vec::new(),
            });
        }

        let mut leaves = Vec::with_capacity(versions.all().len());
        for version in versions.all() {
            let identity = PackageIdentity::new(id.clone(), version.clone());
            // The leaf carries the id casing from the stored manifest, not
            // from the request path.
            let display_id = self.repository.nuspec(&identity).await?.package_id()?;
            let leaf_url = self.leaf_url(&identity);
            leaves.push(RegistrationLeaf {
                id: leaf_url.clone(),
                package_content: self.content.url(&identity),
                listed: true,
                catalog_entry: CatalogEntry {
                    entry_id: leaf_url,
                    id: display_id.as_str().to_string(),
                    version: version.normalized(),
                    listed: true,
                    package_content: self.content.url(&identity),
                },
            });
        }

        let page = RegistrationPage {
            id: format!(
                "{}/registrations/{}/index.json",
                self.base_url,
                id.normalized()
            ),
            count: leaves.len(),
            lower: versions.all().first().map(|v| v.normalized()).unwrap_or_default(),
            upper: versions.all().last().map(|v| v.normalized()).unwrap_or_default(),
            items: leaves,
        };

        Ok(RegistrationIndex {
            count: 1,
            items: vec![page],
        })
    }

    fn leaf_url(&self, identity: &PackageIdentity) -> String {
        format!(
            "{}/registrations/{}/{}.json",
            self.base_url,
            identity.id().normalized(),
            identity.version().normalized()
        )
    }
}
