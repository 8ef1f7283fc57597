// src/detect/fingerprint.rs

use std::fmt;

use sha2::{Digest, Sha256};

use crate::detect::normalize::normalize;
use crate::types::HashAlgorithm;

/// Lowercase hex digest of normalized requirements content.
///
/// Two fingerprints are only comparable when produced by the same
/// [`HashAlgorithm`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hash `text` as is.
    pub fn of(algorithm: HashAlgorithm, text: &str) -> Self {
        Self(hex_digest(algorithm, text.as_bytes()))
    }

    /// Normalize raw file content, then hash it.
    pub fn of_content(algorithm: HashAlgorithm, raw: &str) -> Self {
        Self::of(algorithm, &normalize(raw))
    }

    /// Interpret the contents of a snapshot file.
    ///
    /// Surrounding whitespace is ignored and an empty snapshot counts as no
    /// previous fingerprint. Anything else is kept verbatim so a corrupted or
    /// foreign value simply compares unequal.
    pub fn from_stored(stored: &str) -> Option<Self> {
        let trimmed = stored.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn hex_digest(algorithm: HashAlgorithm, bytes: &[u8]) -> String {
    match algorithm {
        HashAlgorithm::Blake3 => blake3::hash(bytes).to_hex().to_string(),
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
    }
}
