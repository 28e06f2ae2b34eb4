use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::config::ElectionConfig;
use crate::error::Result;
use crate::ledger::{Ledger, TallyEntry};
use crate::model::{
    Address, Candidate, CandidateId, CommitmentHash, LogEntry, VoterRecord, VotingStatus,
    WindowBounds,
};

/// Thread-safe handle to a [`Ledger`], cheap to clone.
///
/// All mutating operations serialise behind one writer lock, and the
/// clock is read once inside the critical section so a window boundary
/// cannot shift mid-operation. Reads hold the lock only long enough to
/// copy out a consistent snapshot; they never block each other.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub fn from_config(config: &ElectionConfig) -> Result<Self> {
        Ledger::from_config(config, Utc::now()).map(Self::new)
    }

    // A poisoned lock is recovered: the ledger never applies partial
    // mutations, so the guarded state is still consistent after a
    // panicking thread.
    fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Mutations, serialised behind the writer lock.
    // ------------------------------------------------------------------

    pub fn add_candidate(&self, caller: &Address, name: &str) -> Result<CandidateId> {
        let mut ledger = self.write();
        ledger.add_candidate_at(caller, name, Utc::now())
    }

    pub fn register_voter(&self, caller: &Address, address: Address) -> Result<bool> {
        let mut ledger = self.write();
        ledger.register_voter_at(caller, address, Utc::now())
    }

    pub fn set_voting_period(
        &self,
        caller: &Address,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<()> {
        let mut ledger = self.write();
        ledger.set_voting_period_at(caller, start, end, Utc::now())
    }

    pub fn cancel_voting_period(&self, caller: &Address) -> Result<()> {
        let mut ledger = self.write();
        ledger.cancel_voting_period_at(caller, Utc::now())
    }

    pub fn cast_vote(
        &self,
        caller: &Address,
        candidate: CandidateId,
        commitment: CommitmentHash,
    ) -> Result<()> {
        let mut ledger = self.write();
        ledger.cast_vote_at(caller, candidate, commitment, Utc::now())
    }

    // ------------------------------------------------------------------
    // Reads: copy out a snapshot, release the lock.
    // ------------------------------------------------------------------

    pub fn authority(&self) -> Address {
        *self.read().authority()
    }

    pub fn is_authority(&self, caller: &Address) -> bool {
        self.read().is_authority(caller)
    }

    pub fn get_candidate(&self, id: CandidateId) -> Result<Candidate> {
        self.read().get_candidate(id).cloned()
    }

    pub fn candidates_count(&self) -> u32 {
        self.read().candidates_count()
    }

    pub fn registered(&self, address: &Address) -> bool {
        self.read().registered(address)
    }

    pub fn voter(&self, address: &Address) -> Option<VoterRecord> {
        self.read().voter(address).cloned()
    }

    pub fn tally(&self) -> Vec<TallyEntry> {
        self.read().tally()
    }

    /// Status at the current clock reading.
    pub fn status(&self) -> VotingStatus {
        let ledger = self.read();
        ledger.status(Utc::now())
    }

    pub fn window_bounds(&self) -> Option<WindowBounds> {
        self.read().window_bounds()
    }

    pub fn events(&self) -> Vec<LogEntry> {
        self.read().events().to_vec()
    }

    /// A full owned copy of the ledger state, e.g. for persistence.
    pub fn snapshot(&self) -> Ledger {
        self.read().clone()
    }
}
