//! Short content-derived paste references.
//!
//! A reference is the first [`REFERENCE_LEN`] characters of the URL-safe
//! base64 encoding of the SHA-1 digest of a paste body. Two different bodies
//! may share a reference; the later write wins.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use sha1::{Digest, Sha1};

/// Number of characters in a reference.
pub const REFERENCE_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference(String);

impl Reference {
    /// Derive the reference for a paste body.
    pub fn derive(body: &str) -> Self {
        let digest = Sha1::digest(body.as_bytes());
        let mut encoded = URL_SAFE.encode(digest);
        encoded.truncate(REFERENCE_LEN);
        Self(encoded)
    }

    /// Take the reference from the leading characters of a request path.
    ///
    /// Returns `None` when the path is too short to hold a full reference.
    /// Anything after the reference is ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        rest.get(..REFERENCE_LEN).map(|r| Self(r.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
