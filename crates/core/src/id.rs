//! Package identifiers, identities and their storage keys.

use crate::version::Version;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A NuGet package identifier.
///
/// Identifiers are case-insensitive: equality and all storage keys use the
/// lower-cased normalized form, while the casing found in the `.nuspec` is
/// retained for display in metadata documents.
#[derive(Clone)]
pub struct PackageId {
    original: String,
    normalized: String,
}

impl PackageId {
    /// Parse a package id, validating the id grammar.
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let original = id.into();
        if original.is_empty() {
            return Err(Error::InvalidPackageId("id is empty".to_string()));
        }
        for c in original.chars() {
            if !matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-') {
                return Err(Error::InvalidPackageId(format!(
                    "invalid character {c:?} in id: {original}"
                )));
            }
        }
        let normalized = original.to_ascii_lowercase();
        Ok(Self {
            original,
            normalized,
        })
    }

    /// The id as found in the manifest, casing preserved.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// The lower-cased form used for equality and storage keys.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Root key of the package namespace.
    pub fn root_key(&self) -> String {
        self.normalized.clone()
    }

    /// Key of the versions index document.
    pub fn versions_key(&self) -> String {
        format!("{}/index.json", self.normalized)
    }
}

impl PartialEq for PackageId {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for PackageId {}

impl std::hash::Hash for PackageId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl fmt::Debug for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackageId({})", self.original)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

impl Serialize for PackageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for PackageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PackageId::parse(raw).map_err(serde::de::Error::custom)
    }
}

/// A (package id, version) pair identifying one stored package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageIdentity {
    id: PackageId,
    version: Version,
}

impl PackageIdentity {
    /// Create an identity from its components.
    pub fn new(id: PackageId, version: Version) -> Self {
        Self { id, version }
    }

    /// The package id.
    pub fn id(&self) -> &PackageId {
        &self.id
    }

    /// The package version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Root key of the per-version directory.
    pub fn root_key(&self) -> String {
        format!("{}/{}", self.id.normalized(), self.version.normalized())
    }

    /// Key of the package blob.
    pub fn nupkg_key(&self) -> String {
        format!("{}/{}.nupkg", self.root_key(), self.file_stem())
    }

    /// Key of the extracted manifest.
    pub fn nuspec_key(&self) -> String {
        format!("{}/{}.nuspec", self.root_key(), self.file_stem())
    }

    /// Key of the package hash artifact.
    pub fn hash_key(&self) -> String {
        format!("{}/{}.nupkg.sha512", self.root_key(), self.file_stem())
    }

    fn file_stem(&self) -> String {
        format!("{}.{}", self.id.normalized(), self.version.normalized())
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = PackageId::parse("Newtonsoft.Json").unwrap();
        assert_eq!(id.as_str(), "Newtonsoft.Json");
        assert_eq!(id.normalized(), "newtonsoft.json");
    }

    #[test]
    fn test_parse_rejects_empty_id() {
        assert!(PackageId::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_characters() {
        assert!(PackageId::parse("foo/bar").is_err());
        assert!(PackageId::parse("foo bar").is_err());
        assert!(PackageId::parse("foo+bar").is_err());
    }

    #[test]
    fn test_equality_is_case_insensitive() {
        let a = PackageId::parse("Foo.Bar").unwrap();
        let b = PackageId::parse("foo.bar").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_package_keys() {
        let id = PackageId::parse("My.Lib").unwrap();
        assert_eq!(id.root_key(), "my.lib");
        assert_eq!(id.versions_key(), "my.lib/index.json");
    }

    #[test]
    fn test_identity_keys_use_normalized_forms() {
        let id = PackageId::parse("My.Lib").unwrap();
        let version = Version::parse("1.00.0").unwrap();
        let identity = PackageIdentity::new(id, version);

        assert_eq!(identity.root_key(), "my.lib/1.0.0");
        assert_eq!(identity.nupkg_key(), "my.lib/1.0.0/my.lib.1.0.0.nupkg");
        assert_eq!(identity.nuspec_key(), "my.lib/1.0.0/my.lib.1.0.0.nuspec");
        assert_eq!(
            identity.hash_key(),
            "my.lib/1.0.0/my.lib.1.0.0.nupkg.sha512"
        );
    }

    #[test]
    fn test_identity_display() {
        let identity = PackageIdentity::new(
            PackageId::parse("abc").unwrap(),
            Version::parse("0.0.1").unwrap(),
        );
        assert_eq!(identity.to_string(), "abc:0.0.1");
    }
}
