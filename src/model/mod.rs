pub use access::AccessControl;
pub use address::{Address, ParseAddressError, ADDRESS_LENGTH};
pub use candidate::{Candidate, CandidateRegistry, MAX_CANDIDATE_NAME_LENGTH};
pub use commitment::{CommitmentHash, ParseCommitmentError, COMMITMENT_LENGTH};
pub use event::{Digest, Event, EventLog, LogEntry, GENESIS_DIGEST};
pub use voter::{VoterRecord, VoterRegistry};
pub use window::{VotingStatus, VotingWindow, WindowBounds};

mod access;
mod address;
mod candidate;
mod commitment;
mod event;
mod voter;
mod window;

/// Candidate ids are dense integers assigned sequentially from 1.
pub type CandidateId = u32;
