//! Package hash type and encodings.

use crate::{Error, Result};
use sha2::{Digest, Sha512};
use std::fmt;

/// A package content hash holding raw digest bytes.
///
/// [`Hash::compute`] always yields a SHA-512 digest; the width is not fixed
/// in the type so digests can also be reconstructed from stored material.
/// The persisted artifact body is the standard-alphabet base64 of the raw
/// digest bytes, without wrapping.
#[derive(Clone, PartialEq, Eq)]
pub struct Hash(Vec<u8>);

impl Hash {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Compute the SHA-512 digest of data.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha512::new();
        hasher.update(data);
        Self(hasher.finalize().to_vec())
    }

    /// Parse digest bytes from a hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() % 2 != 0 {
            return Err(Error::InvalidHash(format!(
                "expected an even number of hex chars, got {}",
                s.len()
            )));
        }
        let mut bytes = Vec::with_capacity(s.len() / 2);
        for chunk in s.as_bytes().chunks(2) {
            let pair =
                std::str::from_utf8(chunk).map_err(|e| Error::InvalidHash(e.to_string()))?;
            bytes.push(
                u8::from_str_radix(pair, 16).map_err(|e| Error::InvalidHash(e.to_string()))?,
            );
        }
        Ok(Self(bytes))
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encode as base64, the format of the stored `.sha512` artifact.
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.0)
    }

    /// Encode as lowercase hex.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Hash({})", &hex[..hex.len().min(16)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known SHA-512 of the empty input.
    const EMPTY_SHA512_HEX: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
         47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";

    #[test]
    fn test_compute_matches_known_digest() {
        let computed = Hash::compute(b"");
        let known = Hash::from_hex(EMPTY_SHA512_HEX).unwrap();
        assert_eq!(computed, known);
        assert_eq!(computed.as_bytes().len(), 64);
    }

    #[test]
    fn test_base64_of_known_digest() {
        let hash = Hash::from_hex("0123456789abcdef").unwrap();
        assert_eq!(hash.to_base64(), "ASNFZ4mrze8=");
    }

    #[test]
    fn test_hex_roundtrip() {
        let hash = Hash::compute(b"hello world");
        let back = Hash::from_hex(&hash.to_hex()).unwrap();
        assert_eq!(hash, back);
    }

    #[test]
    fn test_from_hex_rejects_odd_length() {
        assert!(Hash::from_hex("abc").is_err());
        assert!(Hash::from_hex("").is_err());
        assert!(Hash::from_hex("zz").is_err());
    }
}
