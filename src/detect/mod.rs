// src/detect/mod.rs

//! Content fingerprints and the persisted snapshots they are compared against.
//!
//! Flow for a single watched file:
//! 1. [`normalize`] the text (strip, drop blanks and comments, sort lines),
//! 2. hash it into a [`Fingerprint`],
//! 3. compare with the fingerprint in its snapshot file,
//! 4. overwrite the snapshot with the new fingerprint.

pub mod detector;
pub mod fingerprint;
pub mod normalize;
pub mod snapshot;

pub use detector::{ChangeDetector, Observation};
pub use fingerprint::Fingerprint;
pub use normalize::normalize;
pub use snapshot::{
    SNAPSHOT_SUFFIX, SnapshotLayout, environment_key, load_snapshot, save_snapshot,
    snapshot_file_name,
};
