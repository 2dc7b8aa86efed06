use super::*;
use scrimshaw_types::MAX_BATCH;

/// Batched entry points cap at [`MAX_BATCH`] entries per call.
fn ensure_batch_size(len: usize) -> Result<(), LedgerError> {
    if len > MAX_BATCH {
        return Err(LedgerError::OutOfRange {
            index: len as u32,
            len: MAX_BATCH as u32,
        });
    }
    Ok(())
}

mod admin;
mod engrave;
mod mint;
mod tags;
mod transfer;
