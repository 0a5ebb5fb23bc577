//! Test fixtures: in-memory packages and multipart bodies.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Boundary used for multipart push bodies.
pub const BOUNDARY: &str = "berth-test-boundary";

/// Build a minimal well-formed `.nupkg` in memory.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub fn nupkg_bytes(id: &str, version: &str) -> Vec<u8> {
    let nuspec = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://schemas.microsoft.com/packaging/2013/05/nuspec.xsd">
  <metadata>
    <id>{id}</id>
    <version>{version}</version>
    <authors>tester</authors>
    <description>test package</description>
  </metadata>
</package>"#
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file(format!("{id}.nuspec"), SimpleFileOptions::default())
        .unwrap();
    zip.write_all(nuspec.as_bytes()).unwrap();
    zip.start_file("lib/netstandard2.0/placeholder.dll", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"not really a dll").unwrap();
    zip.finish().unwrap().into_inner()
}

/// Build a ZIP archive with no `.nuspec` entry.
#[allow(dead_code)]
pub fn zip_without_nuspec() -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("readme.txt", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"nothing to see here").unwrap();
    zip.finish().unwrap().into_inner()
}

/// Wrap package bytes in a single-part multipart/form-data body.
/// Returns the Content-Type header value and the body.
#[allow(dead_code)]
pub fn multipart_push_body(content: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"package\"; filename=\"package.nupkg\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
