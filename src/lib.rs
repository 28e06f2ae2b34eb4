//! Authoritative ledger core for a single-authority bounded election:
//! candidate and voter administration, a time-boxed voting window, one
//! revisable ballot per registered voter, and a tamper-evident audit
//! log behind a running tally.
//!
//! The HTTP layer, identity verification, and off-chain ballot storage
//! are external collaborators; they drive the operations exposed here
//! and surface the error kinds verbatim.

pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod shared;

pub use config::ElectionConfig;
pub use error::{Error, Result};
pub use ledger::{Ledger, TallyEntry};
pub use shared::SharedLedger;
