//! Input fingerprints for log events.
//! Requirement and feedback text never reaches a log line; events carry an [`InputId`] instead.

use sha2::{Digest, Sha256};
use std::fmt;

const FINGERPRINT_BYTES: usize = 6;

/// Stable short fingerprint of user text: the leading bytes of its SHA-256,
/// shown as 12 lowercase hex chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId([u8; FINGERPRINT_BYTES]);

impl InputId {
    pub fn of(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        let mut bytes = [0u8; FINGERPRINT_BYTES];
        bytes.copy_from_slice(&digest[..FINGERPRINT_BYTES]);
        Self(bytes)
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}
