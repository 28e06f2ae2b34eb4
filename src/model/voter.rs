use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Address, CandidateId, CommitmentHash};

/// Per-voter vote state, created alongside the registration record.
///
/// A record exists iff the address is registered; records are never
/// deleted. "Has voted" is not stored separately: a voter has voted iff
/// they hold a current choice, so a record can never claim a vote
/// without naming the candidate it counts towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterRecord {
    /// The voter's identity.
    pub address: Address,
    /// The candidate currently holding this voter's single effective vote.
    pub current_choice: Option<CandidateId>,
    /// Opaque audit artifact from the latest accepted `cast_vote`.
    pub commitment: Option<CommitmentHash>,
}

impl VoterRecord {
    fn new(address: Address) -> Self {
        Self {
            address,
            current_choice: None,
            commitment: None,
        }
    }

    pub fn has_voted(&self) -> bool {
        self.current_choice.is_some()
    }
}

/// Set of identities eligible to vote, with their vote state.
///
/// Vote state is mutated only through the ledger's vote-casting
/// protocol, never directly by external callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRegistry {
    voters: HashMap<Address, VoterRecord>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent registration: returns whether this was a first-time
    /// registration. Re-registering must not fail an administrative
    /// workflow, so an existing record is left untouched.
    pub(crate) fn register(&mut self, address: Address) -> bool {
        match self.voters.entry(address) {
            Entry::Vacant(entry) => {
                entry.insert(VoterRecord::new(address));
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Pure read; unknown addresses are simply not registered.
    pub fn registered(&self, address: &Address) -> bool {
        self.voters.contains_key(address)
    }

    pub fn record(&self, address: &Address) -> Option<&VoterRecord> {
        self.voters.get(address)
    }

    pub(crate) fn record_mut(&mut self, address: &Address) -> Option<&mut VoterRecord> {
        self.voters.get_mut(address)
    }

    pub fn count(&self) -> u64 {
        self.voters.len() as u64
    }

    /// Number of voters currently holding an effective vote.
    pub fn voted_count(&self) -> u64 {
        self.voters.values().filter(|v| v.has_voted()).count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent() {
        let mut registry = VoterRegistry::new();
        let voter = Address::example_voter1();

        assert!(registry.register(voter));
        assert!(!registry.register(voter));
        assert!(registry.registered(&voter));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn re_registration_preserves_vote_state() {
        let mut registry = VoterRegistry::new();
        let voter = Address::example_voter1();
        registry.register(voter);
        registry.record_mut(&voter).unwrap().current_choice = Some(1);

        registry.register(voter);
        assert_eq!(registry.record(&voter).unwrap().current_choice, Some(1));
    }

    #[test]
    fn unknown_address_is_not_registered() {
        let registry = VoterRegistry::new();
        assert!(!registry.registered(&Address::example_voter1()));
        assert!(registry.record(&Address::example_voter1()).is_none());
    }

    #[test]
    fn voted_count_tracks_choices() {
        let mut registry = VoterRegistry::new();
        registry.register(Address::example_voter1());
        registry.register(Address::example_voter2());
        assert_eq!(registry.voted_count(), 0);

        registry
            .record_mut(&Address::example_voter1())
            .unwrap()
            .current_choice = Some(1);
        assert_eq!(registry.voted_count(), 1);
        assert_eq!(registry.count(), 2);
    }
}
