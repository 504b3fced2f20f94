//! Submission input checks.
//!
//! Each check maps to its own [`Error`] variant and they run in a fixed
//! order, so a request with several problems always reports the same one.
//! Nothing here touches storage or calls a collaborator.

use soroban_sdk::String;

use crate::Error;

/// Upper bound on `purpose`, in bytes.
pub const MAX_PURPOSE_LEN: u32 = 256;

pub fn validate_submission(
    amount: i128,
    recipient_ref: &String,
    purpose: &String,
) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    let purpose_len = purpose.len();
    if purpose_len == 0 || purpose_len > MAX_PURPOSE_LEN {
        return Err(Error::InvalidPurpose);
    }

    // Well-formedness only; verification is the authority's call.
    if recipient_ref.len() == 0 {
        return Err(Error::InvalidRecipient);
    }

    Ok(())
}

/// Timeout windows are ledger counts and must be strictly positive.
pub fn validate_timeouts(claim_timeout: u32, cancel_timeout: u32) -> Result<(), Error> {
    if claim_timeout == 0 || cancel_timeout == 0 {
        return Err(Error::InvalidTimeout);
    }
    Ok(())
}
