use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Address, CandidateId};

/// Maximum accepted length of a candidate name, in characters.
pub const MAX_CANDIDATE_NAME_LENGTH: usize = 100;

/// An electable option with a running vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate id, dense and sequential from 1.
    pub id: CandidateId,
    /// Candidate name.
    pub name: String,
    /// Number of effective votes currently held.
    pub vote_count: u64,
}

/// Append-only list of candidates with running vote counts.
///
/// Candidate `i` lives at index `i - 1`, so id density and sequencing
/// hold structurally: there is nowhere to put a gap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRegistry {
    candidates: Vec<Candidate>,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `name` and append a new candidate with a zero count,
    /// returning its id. Authority gating happens in the ledger.
    pub(crate) fn add(&mut self, name: &str) -> Result<CandidateId> {
        if name.is_empty() {
            return Err(Error::InvalidCandidateName("name is empty".to_string()));
        }
        if name.chars().count() > MAX_CANDIDATE_NAME_LENGTH {
            return Err(Error::InvalidCandidateName(format!(
                "name exceeds {MAX_CANDIDATE_NAME_LENGTH} characters"
            )));
        }
        if Address::is_address_shaped(name) {
            return Err(Error::InvalidCandidateName(format!(
                "{name:?} looks like an address"
            )));
        }

        let id = self.candidates.len() as CandidateId + 1;
        self.candidates.push(Candidate {
            id,
            name: name.to_string(),
            vote_count: 0,
        });
        Ok(id)
    }

    pub fn get(&self, id: CandidateId) -> Result<&Candidate> {
        id.checked_sub(1)
            .and_then(|index| self.candidates.get(index as usize))
            .ok_or(Error::CandidateNotFound(id))
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.get(id).is_ok()
    }

    pub fn count(&self) -> u32 {
        self.candidates.len() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Internal mutator for the ledger's vote-casting protocol only.
    /// Existence is checked by the ledger before any mutation.
    pub(crate) fn increment_vote(&mut self, id: CandidateId) {
        self.candidates[(id - 1) as usize].vote_count += 1;
    }

    /// Internal mutator for the ledger's vote-casting protocol only.
    /// A zero count here means the vote accounting is broken, so this
    /// asserts rather than returning a user-facing error.
    pub(crate) fn decrement_vote(&mut self, id: CandidateId) {
        let candidate = &mut self.candidates[(id - 1) as usize];
        assert!(
            candidate.vote_count > 0,
            "vote count underflow for candidate {id}"
        );
        candidate.vote_count -= 1;
    }
}
