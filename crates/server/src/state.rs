//! Application state shared across handlers.

use berth_core::config::AppConfig;
use berth_core::PackageIdentity;
use berth_repository::{ContentLocation, Registration, Repository};
use berth_storage::ObjectStore;
use std::sync::Arc;

/// Content location pointing at this server's flat-container endpoint.
pub struct FlatContainerLocation {
    base_url: String,
}

impl FlatContainerLocation {
    /// Create a location rooted at the public base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl ContentLocation for FlatContainerLocation {
    fn url(&self, identity: &PackageIdentity) -> String {
        format!("{}/content/{}", self.base_url, identity.nupkg_key())
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Package repository.
    pub repository: Arc<Repository>,
    /// Registration metadata view.
    pub registration: Registration,
}

impl AppState {
    /// Create a new application state over the given store.
    pub fn new(config: AppConfig, store: Arc<dyn ObjectStore>) -> Self {
        let repository = Arc::new(Repository::new(store));
        let base_url = config.public_base_url();
        let registration = Registration::new(
            repository.clone(),
            Arc::new(FlatContainerLocation::new(base_url.clone())),
            base_url,
        );
        Self {
            config: Arc::new(config),
            repository,
            registration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_core::{PackageId, Version};

    #[test]
    fn test_flat_container_location_urls() {
        let location = FlatContainerLocation::new("https://nuget.example.com");
        let identity = PackageIdentity::new(
            PackageId::parse("My.Lib").unwrap(),
            Version::parse("1.0.0").unwrap(),
        );
        assert_eq!(
            location.url(&identity),
            "https://nuget.example.com/content/my.lib/1.0.0/my.lib.1.0.0.nupkg"
        );
    }
}
