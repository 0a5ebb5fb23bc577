//! Nupkg archive reader.

use crate::hash::Hash;
use crate::nuspec::Nuspec;
use crate::{Error, Result};
use bytes::Bytes;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// A NuGet package: a ZIP archive carrying one `.nuspec` manifest.
#[derive(Clone)]
pub struct Nupkg {
    content: Bytes,
}

impl Nupkg {
    /// Wrap raw package bytes.
    pub fn new(content: Bytes) -> Self {
        Self { content }
    }

    /// The raw package bytes.
    pub fn bytes(&self) -> Bytes {
        self.content.clone()
    }

    /// Locate and read the single top-level `.nuspec` entry.
    pub fn nuspec(&self) -> Result<Nuspec> {
        let mut archive = ZipArchive::new(Cursor::new(self.content.as_ref()))
            .map_err(|e| Error::InvalidPackage(format!("unreadable archive: {e}")))?;

        let candidates: Vec<String> = archive
            .file_names()
            .filter(|name| {
                !name.contains('/') && name.to_ascii_lowercase().ends_with(".nuspec")
            })
            .map(str::to_string)
            .collect();

        let name = match candidates.as_slice() {
            [single] => single,
            [] => {
                return Err(Error::InvalidPackage(
                    "no .nuspec entry in package".to_string(),
                ));
            }
            many => {
                return Err(Error::InvalidPackage(format!(
                    "{} .nuspec entries in package",
                    many.len()
                )));
            }
        };

        let mut entry = archive
            .by_name(name)
            .map_err(|e| Error::InvalidPackage(format!("unreadable nuspec entry: {e}")))?;
        let mut content = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut content)
            .map_err(|e| Error::InvalidPackage(format!("unreadable nuspec entry: {e}")))?;

        Ok(Nuspec::new(Bytes::from(content)))
    }

    /// The SHA-512 hash of the full package bytes.
    pub fn hash(&self) -> Hash {
        Hash::compute(&self.content)
    }
}
