use thiserror::Error;

use crate::model::{Address, CandidateId, VotingStatus};

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when applying an operation to the ledger.
///
/// Every check is performed before any mutation: an error means the
/// ledger, including its event log, is exactly as it was before the
/// call. Each variant carries the input that violated the rule so the
/// presentation layer can build a precise user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A non-authority caller attempted an administrative operation.
    #[error("Unauthorized: {0} is not the election authority")]
    Unauthorized(Address),
    /// Empty, oversized, or address-shaped candidate name.
    #[error("Invalid candidate name: {0}")]
    InvalidCandidateName(String),
    /// Unknown candidate id referenced by a read or a vote.
    #[error("Candidate {0} not found")]
    CandidateNotFound(CandidateId),
    /// Vote attempted by an identity that was never registered.
    #[error("Not registered: {0}")]
    NotRegistered(Address),
    /// Vote attempted outside the Active window.
    #[error("Voting is not active: voting period is {0}")]
    VotingInactive(VotingStatus),
    /// Attempt to set or cancel the window from a disallowed status.
    #[error("Voting period is locked: voting period is {0}")]
    WindowLocked(VotingStatus),
    /// Start not in the future, or end not after start.
    #[error("Invalid voting window: {0}")]
    InvalidWindow(String),
}
