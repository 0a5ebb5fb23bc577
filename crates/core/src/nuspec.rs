//! Nuspec manifest reader.

use crate::id::{PackageId, PackageIdentity};
use crate::version::Version;
use crate::{Error, Result};
use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A package manifest in `.nuspec` (XML) format.
///
/// Only the identity elements are interpreted here; the document is
/// otherwise opaque and persisted byte-for-byte. Element lookup matches on
/// local names, since nuspec documents appear under several schema
/// namespaces.
#[derive(Clone, Debug)]
pub struct Nuspec {
    content: Bytes,
}

impl Nuspec {
    /// Wrap raw `.nuspec` bytes.
    pub fn new(content: Bytes) -> Self {
        Self { content }
    }

    /// Extract the package identity from the document.
    pub fn identity(&self) -> Result<PackageIdentity> {
        Ok(PackageIdentity::new(self.package_id()?, self.version()?))
    }

    /// Extract the package identifier from the document.
    pub fn package_id(&self) -> Result<PackageId> {
        PackageId::parse(self.single_text(&["package", "metadata", "id"])?)
    }

    /// Extract the package version from the document.
    pub fn version(&self) -> Result<Version> {
        Version::parse(&self.single_text(&["package", "metadata", "version"])?)
    }

    /// The raw manifest bytes.
    pub fn bytes(&self) -> Bytes {
        self.content.clone()
    }

    /// Read the text of the single element at `target`, as a path of local
    /// names from the document root. Zero or multiple matching text nodes
    /// are an error.
    fn single_text(&self, target: &[&str]) -> Result<String> {
        let mut reader = Reader::from_reader(self.content.as_ref());
        reader.config_mut().trim_text(true);

        let mut path: Vec<String> = Vec::new();
        let mut matches: Vec<String> = Vec::new();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                }
                Ok(Event::End(_)) => {
                    path.pop();
                }
                Ok(Event::Text(t)) if path == target => {
                    let text = t
                        .unescape()
                        .map_err(|e| Error::InvalidPackage(format!("bad nuspec text: {e}")))?;
                    matches.push(text.into_owned());
                }
                Ok(Event::CData(t)) if path == target => {
                    matches.push(String::from_utf8_lossy(&t.into_inner()).into_owned());
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(Error::InvalidPackage(format!("malformed nuspec xml: {e}")));
                }
            }
            buf.clear();
        }

        let element = target.join("/");
        match matches.len() {
            0 => Err(Error::InvalidPackage(format!(
                "no value found at {element}"
            ))),
            1 => Ok(matches.remove(0)),
            found => Err(Error::InvalidPackage(format!(
                "{found} values found at {element}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nuspec(content: &str) -> Nuspec {
        Nuspec::new(Bytes::copy_from_slice(content.as_bytes()))
    }

    const SIMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://schemas.microsoft.com/packaging/2013/05/nuspec.xsd">
  <metadata>
    <id>Newtonsoft.Json</id>
    <version>12.0.3</version>
    <authors>James Newton-King</authors>
    <description>Json.NET is a popular high-performance JSON framework for .NET</description>
  </metadata>
</package>"#;

    #[test]
    fn test_reads_identity() {
        let identity = nuspec(SIMPLE).identity().unwrap();
        assert_eq!(identity.id().as_str(), "Newtonsoft.Json");
        assert_eq!(identity.version().normalized(), "12.0.3");
    }

    #[test]
    fn test_namespace_is_ignored() {
        let doc = r#"<ns:package xmlns:ns="urn:whatever">
  <ns:metadata><ns:id>abc</ns:id><ns:version>0.0.1</ns:version></ns:metadata>
</ns:package>"#;
        let identity = nuspec(doc).identity().unwrap();
        assert_eq!(identity.id().as_str(), "abc");
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let doc = "<package><metadata><version>1.0.0</version></metadata></package>";
        match nuspec(doc).package_id() {
            Err(Error::InvalidPackage(msg)) => assert!(msg.contains("no value found")),
            other => panic!("expected InvalidPackage, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let doc = "<package><metadata><id>a</id><id>b</id>\
             <version>1.0.0</version></metadata></package>";
        match nuspec(doc).package_id() {
            Err(Error::InvalidPackage(msg)) => assert!(msg.contains("2 values")),
            other => panic!("expected InvalidPackage, got {other:?}"),
        }
    }

    #[test]
    fn test_id_outside_metadata_does_not_match() {
        let doc = "<package><id>decoy</id><metadata><id>real</id>\
             <version>1.0.0</version></metadata></package>";
        assert_eq!(nuspec(doc).package_id().unwrap().as_str(), "real");
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        let doc = "<package><metadata><id>abc</metadata>";
        assert!(nuspec(doc).package_id().is_err());
    }

    #[test]
    fn test_invalid_version_value() {
        let doc = "<package><metadata><id>abc</id><version>1</version></metadata></package>";
        match nuspec(doc).version() {
            Err(Error::InvalidVersion(s)) => assert_eq!(s, "1"),
            other => panic!("expected InvalidVersion, got {other:?}"),
        }
    }
}
