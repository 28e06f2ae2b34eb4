use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::model::{Address, CandidateId, CommitmentHash};

/// A SHA-256 chain digest.
pub type Digest = [u8; 32];

/// Chain marker for the first entry: all zeroes means no predecessor.
pub const GENESIS_DIGEST: Digest = [0u8; 32];

/// One audit event per accepted ledger operation. Rejected operations
/// record nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    CandidateAdded {
        id: CandidateId,
        name: String,
    },
    VoterRegistered {
        address: Address,
    },
    VotingPeriodSet {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    VotingPeriodCancelled,
    VoteCast {
        voter: Address,
        candidate: CandidateId,
        commitment: CommitmentHash,
    },
}

impl Event {
    /// Stable byte encoding fed into the chain digest.
    fn hash_material(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        match self {
            Self::CandidateAdded { id, name } => {
                bytes.extend_from_slice(b"candidate-added");
                bytes.extend_from_slice(&id.to_le_bytes());
                bytes.extend_from_slice(name.as_bytes());
            }
            Self::VoterRegistered { address } => {
                bytes.extend_from_slice(b"voter-registered");
                bytes.extend_from_slice(address.as_bytes());
            }
            Self::VotingPeriodSet { start, end } => {
                bytes.extend_from_slice(b"voting-period-set");
                bytes.extend_from_slice(&start.timestamp().to_le_bytes());
                bytes.extend_from_slice(&end.timestamp().to_le_bytes());
            }
            Self::VotingPeriodCancelled => {
                bytes.extend_from_slice(b"voting-period-cancelled");
            }
            Self::VoteCast {
                voter,
                candidate,
                commitment,
            } => {
                bytes.extend_from_slice(b"vote-cast");
                bytes.extend_from_slice(voter.as_bytes());
                bytes.extend_from_slice(&candidate.to_le_bytes());
                bytes.extend_from_slice(commitment.as_bytes());
            }
        }
        bytes
    }
}

/// A sealed entry in the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Position in the log, from 0.
    pub seq: u64,
    /// Clock reading of the call that produced this entry.
    pub recorded_at: DateTime<Utc>,
    /// The recorded operation.
    pub event: Event,
    /// Digest of the previous entry ([`GENESIS_DIGEST`] for seq 0).
    #[serde(with = "serde_digest")]
    pub prev_digest: Digest,
    /// Digest sealing this entry onto the chain.
    #[serde(with = "serde_digest")]
    pub digest: Digest,
}

/// Append-only, hash-chained record of every accepted operation.
///
/// Each entry's digest covers its predecessor's digest, so editing,
/// dropping, or reordering history breaks verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `event` to the chain.
    pub(crate) fn record(&mut self, event: Event, recorded_at: DateTime<Utc>) {
        let seq = self.entries.len() as u64;
        let prev_digest = self
            .entries
            .last()
            .map(|entry| entry.digest)
            .unwrap_or(GENESIS_DIGEST);
        let digest = Self::seal(seq, recorded_at, &event, &prev_digest);
        self.entries.push(LogEntry {
            seq,
            recorded_at,
            event,
            prev_digest,
            digest,
        });
    }

    /// Recompute every digest from the genesis marker; false if any
    /// entry was altered, dropped, or reordered.
    pub fn verify(&self) -> bool {
        let mut prev = GENESIS_DIGEST;
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.seq != index as u64 || entry.prev_digest != prev {
                return false;
            }
            if Self::seal(entry.seq, entry.recorded_at, &entry.event, &prev) != entry.digest {
                return false;
            }
            prev = entry.digest;
        }
        true
    }

    fn seal(seq: u64, recorded_at: DateTime<Utc>, event: &Event, prev_digest: &Digest) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(prev_digest);
        hasher.update(seq.to_le_bytes());
        hasher.update(recorded_at.timestamp_micros().to_le_bytes());
        hasher.update(event.hash_material());
        hasher.finalize().into()
    }
}

/// Hex text form for chain digests.
mod serde_digest {
    use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::Digest;

    pub fn serialize<S: Serializer>(digest: &Digest, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&HEXLOWER.encode(digest))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Digest, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = HEXLOWER_PERMISSIVE
            .decode(s.as_bytes())
            .map_err(de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| de::Error::custom("digest must be 32 bytes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_log() -> EventLog {
        let now: DateTime<Utc> = "2026-06-01T00:00:00Z".parse().unwrap();
        let mut log = EventLog::new();
        log.record(
            Event::CandidateAdded {
                id: 1,
                name: "BJP".to_string(),
            },
            now,
        );
        log.record(
            Event::VoterRegistered {
                address: Address::example_voter1(),
            },
            now,
        );
        log.record(
            Event::VoteCast {
                voter: Address::example_voter1(),
                candidate: 1,
                commitment: CommitmentHash::digest(b"encrypted-vote-1"),
            },
            now,
        );
        log
    }

    #[test]
    fn chain_verifies() {
        let log = example_log();
        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[0].prev_digest, GENESIS_DIGEST);
        assert_eq!(log.entries()[1].prev_digest, log.entries()[0].digest);
        assert!(log.verify());
    }

    #[test]
    fn tampered_event_fails_verification() {
        let mut log = example_log();
        log.entries[0].event = Event::CandidateAdded {
            id: 1,
            name: "Someone Else".to_string(),
        };
        assert!(!log.verify());
    }

    #[test]
    fn dropped_entry_fails_verification() {
        let mut log = example_log();
        log.entries.remove(1);
        assert!(!log.verify());
    }

    #[test]
    fn reordered_entries_fail_verification() {
        let mut log = example_log();
        log.entries.swap(1, 2);
        assert!(!log.verify());
    }

    #[test]
    fn empty_log_verifies() {
        assert!(EventLog::new().verify());
    }

    #[test]
    fn entry_serialises_digests_as_hex() {
        let log = example_log();
        let json = serde_json::to_value(&log.entries()[0]).unwrap();
        let prev = json["prevDigest"].as_str().unwrap();
        assert_eq!(prev, "0".repeat(64));
        let round_trip: LogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(round_trip, log.entries()[0]);
    }
}
