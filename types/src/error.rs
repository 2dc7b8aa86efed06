//! The ledger's rejection taxonomy.

use thiserror::Error;

/// Why a call was rejected.
///
/// Every entry point validates all preconditions before mutating anything,
/// so a rejection always means the ledger is exactly as it was before the
/// call. [`LedgerError::Internal`] is the one exception to the taxonomy: it
/// surfaces a state-backend failure rather than a rejected input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("caller lacks the required capability")]
    Unauthorized,

    #[error("requested token, artifact, tag, or version does not exist")]
    NotFound,

    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: u32, len: u32 },

    #[error("batched arguments differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("mint would exceed the supply ceiling")]
    SupplyExceeded,

    #[error("minting is disabled")]
    MintingDisabled,

    #[error("payment could not be collected")]
    InsufficientPayment,

    #[error("tag is already registered at another slot")]
    DuplicateTag,

    #[error("address must be non-zero")]
    ZeroAddress,

    #[error("state backend failure: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Checks the arity of a pair of parallel batch arrays.
    pub fn ensure_same_length(left: usize, right: usize) -> Result<(), LedgerError> {
        if left != right {
            return Err(LedgerError::LengthMismatch { left, right });
        }
        Ok(())
    }
}
