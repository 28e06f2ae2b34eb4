use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Address;

/// Bootstrap configuration for an election ledger.
///
/// Deserializable from any serde format the embedding service uses.
/// Seed candidates and the optional initial voting window are applied
/// through the normal validated operations, so a bad config fails
/// loudly at construction rather than producing a half-built ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionConfig {
    authority: Address,
    #[serde(default)]
    candidates: Vec<String>,
    #[serde(default)]
    voting_start: Option<DateTime<Utc>>,
    #[serde(default)]
    voting_end: Option<DateTime<Utc>>,
}

impl ElectionConfig {
    pub fn new(authority: Address) -> Self {
        Self {
            authority,
            candidates: Vec::new(),
            voting_start: None,
            voting_end: None,
        }
    }

    pub fn with_candidates(mut self, candidates: impl IntoIterator<Item = String>) -> Self {
        self.candidates = candidates.into_iter().collect();
        self
    }

    pub fn with_voting_period(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.voting_start = Some(start);
        self.voting_end = Some(end);
        self
    }

    /// The single identity allowed to perform administrative operations.
    pub fn authority(&self) -> Address {
        self.authority
    }

    /// Candidates to create at bootstrap, in id order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Start of the initial voting window, if one is configured.
    pub fn voting_start(&self) -> Option<DateTime<Utc>> {
        self.voting_start
    }

    /// End of the initial voting window, if one is configured.
    pub fn voting_end(&self) -> Option<DateTime<Utc>> {
        self.voting_end
    }
}
