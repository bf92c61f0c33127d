//! Key file representation and serialization helpers.

use lea_core::KeyHash;
use serde::{Deserialize, Serialize};

use crate::error::CipherError;

/// Format version written by this build.
pub const KEY_FILE_VERSION: u32 = 1;

/// A derived cipher key as stored on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFile {
    /// Version tag for future compatibility changes.
    pub version: u32,
    /// KeyHash digest used as the cipher key.
    pub digest: KeyHash,
}

impl KeyFile {
    /// Wraps a digest with the current version tag.
    pub fn new(digest: KeyHash) -> Self {
        Self {
            version: KEY_FILE_VERSION,
            digest,
        }
    }

    /// Serializes the key file with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CipherError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserializes a key file with `bincode`, rejecting unknown versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        let file: Self = bincode::deserialize(bytes)?;
        if file.version != KEY_FILE_VERSION {
            return Err(CipherError::UnsupportedVersion {
                found: file.version,
                expected: KEY_FILE_VERSION,
            });
        }
        Ok(file)
    }
}
