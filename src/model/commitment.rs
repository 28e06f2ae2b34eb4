use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use thiserror::Error;

/// Length of a commitment hash in bytes.
pub const COMMITMENT_LENGTH: usize = 32;

/// An opaque audit artifact accompanying a cast vote, e.g. the digest of
/// an off-chain encrypted ballot. The ledger stores and republishes it
/// verbatim; it never interprets or validates the underlying payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CommitmentHash([u8; COMMITMENT_LENGTH]);

impl CommitmentHash {
    pub fn new(bytes: [u8; COMMITMENT_LENGTH]) -> Self {
        Self(bytes)
    }

    /// SHA-256 of arbitrary payload bytes. A convenience for callers
    /// that hold the off-chain ballot; the ledger itself never hashes
    /// ballot contents.
    pub fn digest(payload: impl AsRef<[u8]>) -> Self {
        Self(Sha256::digest(payload.as_ref()).into())
    }

    pub fn as_bytes(&self) -> &[u8; COMMITMENT_LENGTH] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed commitment hash: expected 64 hex digits")]
pub struct ParseCommitmentError;

impl FromStr for CommitmentHash {
    type Err = ParseCommitmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The `0x` prefix is optional; upstream tooling emits it.
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if hex.len() != 2 * COMMITMENT_LENGTH {
            return Err(ParseCommitmentError);
        }
        let bytes = HEXLOWER_PERMISSIVE
            .decode(hex.as_bytes())
            .map_err(|_| ParseCommitmentError)?;
        let mut hash = [0; COMMITMENT_LENGTH];
        hash.copy_from_slice(&bytes);
        Ok(Self(hash))
    }
}

impl Display for CommitmentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", HEXLOWER.encode(&self.0))
    }
}

impl Serialize for CommitmentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CommitmentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
