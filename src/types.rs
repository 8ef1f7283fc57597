use std::str::FromStr;
use serde::Deserialize;

/// Hash function used for content fingerprints and environment keys.
///
/// - `Blake3`: default; 64 hex characters.
/// - `Sha256`: 64 hex characters, for hosts that want a FIPS-family digest.
///
/// Both are stable across processes and platforms, so snapshot files written
/// by one run are comparable with the next. Switching algorithms changes
/// every fingerprint and every snapshot file name, so the first run after a
/// switch starts from a fresh baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Blake3,
    Sha256,
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blake3" => Ok(HashAlgorithm::Blake3),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            other => Err(format!(
                "invalid algorithm: {other} (expected \"blake3\" or \"sha256\")"
            )),
        }
    }
}

/// What `has_changed` reports when no snapshot exists yet for a
/// (file, environment) pair.
///
/// - `Unchanged` (default): the first observation only records a baseline.
/// - `Changed`: treat the first observation as a change, which forces a
///   recreation the first time a file is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstSightPolicy {
    #[default]
    Unchanged,
    Changed,
}

impl FromStr for FirstSightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unchanged" => Ok(FirstSightPolicy::Unchanged),
            "changed" => Ok(FirstSightPolicy::Changed),
            other => Err(format!(
                "invalid first_sight: {other} (expected \"unchanged\" or \"changed\")"
            )),
        }
    }
}

/// Knobs passed from the host configuration down to the change detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectorSettings {
    pub algorithm: HashAlgorithm,
    pub first_sight: FirstSightPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_algorithm_names_case_insensitively() {
        assert_eq!("BLAKE3".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Blake3));
        assert_eq!(" sha-256 ".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha256));
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn defaults_record_a_baseline_with_blake3() {
        let settings = DetectorSettings::default();
        assert_eq!(settings.algorithm, HashAlgorithm::Blake3);
        assert_eq!(settings.first_sight, FirstSightPolicy::Unchanged);
        assert_eq!("changed".parse::<FirstSightPolicy>(), Ok(FirstSightPolicy::Changed));
    }
}
