use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::ElectionConfig;
use crate::error::{Error, Result};
use crate::model::{
    AccessControl, Address, Candidate, CandidateId, CandidateRegistry, CommitmentHash, Event,
    EventLog, LogEntry, VoterRecord, VoterRegistry, VotingStatus, VotingWindow, WindowBounds,
};

/// One row of the running tally, in ascending candidate id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyEntry {
    pub id: CandidateId,
    pub name: String,
    pub votes: u64,
}

/// The transactional core of the election.
///
/// Exclusively owns the authority identity, both registries, the voting
/// window, and the audit log; every mutation goes through its
/// operations and is all-or-nothing: validation happens strictly before
/// any write, so a rejected operation leaves no trace, and an accepted
/// one applies completely and appends exactly one audit event.
///
/// A `Ledger` is a plain single-writer value (`&mut self` mutations).
/// Use [`crate::SharedLedger`] to serve concurrent callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    access: AccessControl,
    candidates: CandidateRegistry,
    voters: VoterRegistry,
    window: VotingWindow,
    log: EventLog,
}

impl Ledger {
    /// Create an empty ledger with `authority` as its fixed authority.
    pub fn new(authority: Address) -> Self {
        Self {
            access: AccessControl::new(authority),
            candidates: CandidateRegistry::new(),
            voters: VoterRegistry::new(),
            window: VotingWindow::new(),
            log: EventLog::new(),
        }
    }

    /// Bootstrap a ledger from config. Seed candidates and the optional
    /// initial window go through the normal validated, event-recording
    /// operations, invoked as the authority.
    pub fn from_config(config: &ElectionConfig, now: DateTime<Utc>) -> Result<Self> {
        let authority = config.authority();
        let mut ledger = Self::new(authority);

        for name in config.candidates() {
            ledger.add_candidate_at(&authority, name, now)?;
        }

        match (config.voting_start(), config.voting_end()) {
            (Some(start), Some(end)) => {
                ledger.set_voting_period_at(&authority, start, end, now)?;
            }
            (None, None) => {}
            _ => {
                return Err(Error::InvalidWindow(
                    "votingStart and votingEnd must be provided together".to_string(),
                ));
            }
        }

        Ok(ledger)
    }

    // ------------------------------------------------------------------
    // Administrative operations (authority only).
    // ------------------------------------------------------------------

    pub fn add_candidate(&mut self, caller: &Address, name: &str) -> Result<CandidateId> {
        self.add_candidate_at(caller, name, Utc::now())
    }

    pub fn add_candidate_at(
        &mut self,
        caller: &Address,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<CandidateId> {
        self.access.require_authority(caller)?;
        let id = self.candidates.add(name)?;
        info!("candidate {id} ({name:?}) added");
        self.log.record(
            Event::CandidateAdded {
                id,
                name: name.to_string(),
            },
            now,
        );
        Ok(id)
    }

    /// Register `address` as eligible to vote. Idempotent: repeat
    /// registrations are accepted no-ops and record no event. Returns
    /// whether this was a first-time registration.
    pub fn register_voter(&mut self, caller: &Address, address: Address) -> Result<bool> {
        self.register_voter_at(caller, address, Utc::now())
    }

    pub fn register_voter_at(
        &mut self,
        caller: &Address,
        address: Address,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        self.access.require_authority(caller)?;
        let first = self.voters.register(address);
        if first {
            info!("voter {address} registered");
            self.log.record(Event::VoterRegistered { address }, now);
        }
        Ok(first)
    }

    pub fn set_voting_period(
        &mut self,
        caller: &Address,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<()> {
        self.set_voting_period_at(caller, start, end, Utc::now())
    }

    pub fn set_voting_period_at(
        &mut self,
        caller: &Address,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.access.require_authority(caller)?;
        self.window.set(start, end, now)?;
        info!("voting period set: {start} to {end}");
        self.log.record(Event::VotingPeriodSet { start, end }, now);
        Ok(())
    }

    pub fn cancel_voting_period(&mut self, caller: &Address) -> Result<()> {
        self.cancel_voting_period_at(caller, Utc::now())
    }

    pub fn cancel_voting_period_at(&mut self, caller: &Address, now: DateTime<Utc>) -> Result<()> {
        self.access.require_authority(caller)?;
        self.window.cancel(now)?;
        info!("voting period cancelled");
        self.log.record(Event::VotingPeriodCancelled, now);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Vote casting.
    // ------------------------------------------------------------------

    pub fn cast_vote(
        &mut self,
        caller: &Address,
        candidate: CandidateId,
        commitment: CommitmentHash,
    ) -> Result<()> {
        self.cast_vote_at(caller, candidate, commitment, Utc::now())
    }

    /// Cast or move `caller`'s single effective vote.
    ///
    /// A revote for the same candidate refreshes the stored commitment
    /// without touching the tally; a revote for a different candidate
    /// moves the one vote unit atomically.
    pub fn cast_vote_at(
        &mut self,
        caller: &Address,
        candidate: CandidateId,
        commitment: CommitmentHash,
        now: DateTime<Utc>,
    ) -> Result<()> {
        // The caller must be a registered voter.
        if !self.voters.registered(caller) {
            return Err(Error::NotRegistered(*caller));
        }
        // The window must be active at this call's clock reading.
        let status = self.window.status(now);
        if status != VotingStatus::Active {
            return Err(Error::VotingInactive(status));
        }
        // The target candidate must exist.
        if !self.candidates.contains(candidate) {
            return Err(Error::CandidateNotFound(candidate));
        }

        // All checks passed; apply the mutation as one unit.
        let record = self
            .voters
            .record_mut(caller)
            .unwrap(); // Registration already checked.
        match record.current_choice {
            None => {
                record.current_choice = Some(candidate);
                record.commitment = Some(commitment);
                self.candidates.increment_vote(candidate);
            }
            Some(previous) if previous == candidate => {
                // Same candidate: new commitment, no count change.
                record.commitment = Some(commitment);
            }
            Some(previous) => {
                record.current_choice = Some(candidate);
                record.commitment = Some(commitment);
                self.candidates.decrement_vote(previous);
                self.candidates.increment_vote(candidate);
            }
        }

        info!("vote cast by {caller} for candidate {candidate}");
        self.log.record(
            Event::VoteCast {
                voter: *caller,
                candidate,
                commitment,
            },
            now,
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads.
    // ------------------------------------------------------------------

    pub fn authority(&self) -> &Address {
        self.access.authority()
    }

    pub fn is_authority(&self, caller: &Address) -> bool {
        self.access.is_authority(caller)
    }

    pub fn get_candidate(&self, id: CandidateId) -> Result<&Candidate> {
        self.candidates.get(id)
    }

    pub fn candidates_count(&self) -> u32 {
        self.candidates.count()
    }

    pub fn registered(&self, address: &Address) -> bool {
        self.voters.registered(address)
    }

    pub fn voter(&self, address: &Address) -> Option<&VoterRecord> {
        self.voters.record(address)
    }

    /// Number of voters currently holding an effective vote. Always
    /// equals the tally total.
    pub fn voted_count(&self) -> u64 {
        self.voters.voted_count()
    }

    pub fn status(&self, now: DateTime<Utc>) -> VotingStatus {
        self.window.status(now)
    }

    pub fn window_bounds(&self) -> Option<WindowBounds> {
        self.window.bounds()
    }

    /// The running tally, in ascending candidate id order.
    pub fn tally(&self) -> Vec<TallyEntry> {
        self.candidates
            .iter()
            .map(|candidate| TallyEntry {
                id: candidate.id,
                name: candidate.name.clone(),
                votes: candidate.vote_count,
            })
            .collect()
    }

    /// The audit log of every accepted operation.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// The audit entries of every accepted operation, oldest first.
    pub fn events(&self) -> &[LogEntry] {
        self.log.entries()
    }
}
