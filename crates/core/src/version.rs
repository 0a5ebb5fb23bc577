//! Package version parsing, normalization and ordering.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A package version following SemVer 2.0 with NuGet extensions.
///
/// Between two and four dot-separated numeric release components are
/// accepted (`MAJOR.MINOR[.PATCH[.REVISION]]`), followed by an optional
/// prerelease after `-` and optional build metadata after `+`. Numeric
/// components may be arbitrarily large; leading zeros are tolerated on input
/// and stripped by normalization. Build metadata never participates in
/// ordering.
#[derive(Clone)]
pub struct Version {
    /// The string the version was parsed from.
    original: String,
    /// Release components as digit strings without leading zeros.
    release: Vec<String>,
    /// Prerelease identifiers, verbatim.
    prerelease: Vec<String>,
    /// Build metadata, verbatim.
    build: Option<String>,
}

impl Version {
    /// Parse a version string, validating the full grammar.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion(input.to_string());

        // Build metadata comes after the first '+'; a second '+' is not
        // part of any valid identifier.
        let (rest, build) = match input.split_once('+') {
            Some((rest, build)) => {
                if build.contains('+') {
                    return Err(invalid());
                }
                validate_identifiers(build, false).ok_or_else(invalid)?;
                (rest, Some(build.to_string()))
            }
            None => (input, None),
        };

        // The prerelease starts at the first '-'; identifiers themselves may
        // contain further dashes.
        let (release_part, prerelease) = match rest.split_once('-') {
            Some((release, pre)) => {
                let idents = validate_identifiers(pre, true).ok_or_else(invalid)?;
                (release, idents)
            }
            None => (rest, Vec::new()),
        };

        let components: Vec<&str> = release_part.split('.').collect();
        if !(2..=4).contains(&components.len()) {
            return Err(invalid());
        }
        let mut release = Vec::with_capacity(components.len());
        for component in components {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            release.push(strip_leading_zeros(component).to_string());
        }

        Ok(Self {
            original: input.to_string(),
            release,
            prerelease,
            build,
        })
    }

    /// The canonical representation: release components without leading
    /// zeros, a trailing zero fourth component dropped, build metadata
    /// removed, prerelease preserved verbatim.
    pub fn normalized(&self) -> String {
        let mut release: &[String] = &self.release;
        if release.len() == 4 && release[3] == "0" {
            release = &release[..3];
        }
        let mut out = release.join(".");
        if !self.prerelease.is_empty() {
            out.push('-');
            out.push_str(&self.prerelease.join("."));
        }
        out
    }

    /// The string this version was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Whether this is a prerelease version.
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Build metadata, if any was present on input.
    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }
}

/// Strip leading zeros from a digit string, leaving at least one digit.
fn strip_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

/// Split a prerelease or build section into identifiers, validating each.
///
/// Identifiers are non-empty and limited to `[0-9A-Za-z-]`. When
/// `reject_numeric_leading_zeros` is set, purely numeric identifiers with a
/// leading zero are rejected (the prerelease rule; build metadata has no
/// such restriction).
fn validate_identifiers(section: &str, reject_numeric_leading_zeros: bool) -> Option<Vec<String>> {
    let mut idents = Vec::new();
    for ident in section.split('.') {
        if ident.is_empty() {
            return None;
        }
        if !ident
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            return None;
        }
        if reject_numeric_leading_zeros && is_numeric(ident) && ident.len() > 1 && ident.starts_with('0')
        {
            return None;
        }
        idents.push(ident.to_string());
    }
    Some(idents)
}

fn is_numeric(ident: &str) -> bool {
    ident.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two leading-zero-free digit strings by numeric value.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_prerelease(a: &[String], b: &[String]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = match (is_numeric(x), is_numeric(y)) {
            (true, true) => cmp_numeric(x, y),
            // Numeric identifiers always sort below alphanumeric ones.
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => x.as_str().cmp(y.as_str()),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // Missing trailing release components count as zero, so 1.0,
        // 1.0.0 and 1.0.0.0 compare equal.
        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            let a = self.release.get(i).map(String::as_str).unwrap_or("0");
            let b = other.release.get(i).map(String::as_str).unwrap_or("0");
            let ord = cmp_numeric(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => cmp_prerelease(&self.prerelease, &other.prerelease),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({})", self.original)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.normalized())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Version::parse(&raw).map_err(serde::de::Error::custom)
    }
}
