use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Address;

/// Identifies the single authority and gates privileged operations.
///
/// The authority is fixed at construction and immutable for the lifetime
/// of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    authority: Address,
}

impl AccessControl {
    pub fn new(authority: Address) -> Self {
        Self { authority }
    }

    pub fn authority(&self) -> &Address {
        &self.authority
    }

    /// Pure predicate; no side effects on check.
    pub fn is_authority(&self, caller: &Address) -> bool {
        *caller == self.authority
    }

    /// Fail with [`Error::Unauthorized`] unless `caller` is the authority.
    /// Every administrative entry point calls this first.
    pub(crate) fn require_authority(&self, caller: &Address) -> Result<()> {
        if self.is_authority(caller) {
            Ok(())
        } else {
            Err(Error::Unauthorized(*caller))
        }
    }
}
