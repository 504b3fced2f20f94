//! # Lifecycle
//!
//! The donation state machine and the orchestration around it.
//!
//! ```text
//!            submit
//!   (none) ─────────► Pending ──claim──► Claimed
//!                        └─────cancel──► Cancelled
//! ```
//!
//! Every operation runs validate-then-commit: all guards (input, window,
//! status, caller) are evaluated before the custodian is asked to move
//! value, and the record, audit entry and event are written only after the
//! custodian reports success. A rejected operation leaves no trace.
//!
//! Both windows are anchored at the donation's `created_at` ledger and are
//! inclusive: an action at exactly `created_at + timeout` is still allowed.

use soroban_sdk::{Address, Env, String};

use crate::collaborators::{AuditLogClient, FundCustodianClient, VerificationAuthorityClient};
use crate::events;
use crate::storage;
use crate::types::{Collaborators, DonationStatus, DonationTerms, LifecycleConfig};
use crate::validation::validate_submission;
use crate::Error;

/// A transition out of `Pending`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Claim,
    Cancel,
}

/// `true` when `now` lies in `[created_at, created_at + timeout]`.
pub fn within_window(created_at: u32, timeout: u32, now: u32) -> bool {
    now >= created_at && now <= created_at.saturating_add(timeout)
}

pub fn check_window(
    action: Action,
    created_at: u32,
    config: &LifecycleConfig,
    now: u32,
) -> Result<(), Error> {
    match action {
        Action::Claim if !within_window(created_at, config.claim_timeout, now) => {
            Err(Error::ClaimWindowExpired)
        }
        Action::Cancel if !within_window(created_at, config.cancel_timeout, now) => {
            Err(Error::CancelWindowExpired)
        }
        _ => Ok(()),
    }
}

/// Resolve the status `action` leads to from `current`.
///
/// Terminal states reject everything; this is the double-spend guard.
pub fn transition(current: DonationStatus, action: Action) -> Result<DonationStatus, Error> {
    match (current, action) {
        (DonationStatus::Pending, Action::Claim) => Ok(DonationStatus::Claimed),
        (DonationStatus::Pending, Action::Cancel) => Ok(DonationStatus::Cancelled),
        (DonationStatus::Claimed, Action::Claim) => Err(Error::AlreadyClaimed),
        (DonationStatus::Claimed, Action::Cancel) => Err(Error::CannotCancel),
        (DonationStatus::Cancelled, _) => Err(Error::AlreadyCancelled),
    }
}

/// Check that `caller` may perform `action` on the donation.
///
/// Claims resolve the recipient through the verification authority; the
/// caller never gets to assert who the recipient is. Cancels compare
/// against the stored donor.
fn authorize(
    env: &Env,
    collaborators: &Collaborators,
    terms: &DonationTerms,
    caller: &Address,
    action: Action,
) -> Result<(), Error> {
    match action {
        Action::Claim => {
            let verifier = VerificationAuthorityClient::new(env, &collaborators.verifier);
            match verifier.recipient_address(&terms.recipient_ref) {
                Some(wallet) if wallet == *caller => Ok(()),
                _ => Err(Error::NotRecipient),
            }
        }
        Action::Cancel if terms.donor == *caller => Ok(()),
        Action::Cancel => Err(Error::NotDonor),
    }
}

/// Accept a new donation: validate, verify, lock, persist, audit.
///
/// Returns the assigned id. The id counter only advances once the
/// custodian holds the funds.
pub fn submit(
    env: &Env,
    donor: Address,
    amount: i128,
    recipient_ref: String,
    purpose: String,
) -> Result<u64, Error> {
    let collaborators = storage::load_collaborators(env)?;

    validate_submission(amount, &recipient_ref, &purpose)?;

    let verifier = VerificationAuthorityClient::new(env, &collaborators.verifier);
    if !verifier.is_verified(&recipient_ref) {
        return Err(Error::RecipientNotVerified);
    }

    let id = storage::next_donation_id(env);

    let custodian = FundCustodianClient::new(env, &collaborators.custodian);
    if !custodian.lock(&donor, &amount, &recipient_ref, &id) {
        return Err(Error::LockFailed);
    }

    let terms = DonationTerms {
        id,
        donor,
        amount,
        recipient_ref,
        purpose,
        created_at: env.ledger().sequence(),
    };
    storage::commit_donation(env, &terms);

    AuditLogClient::new(env, &collaborators.audit_log).record_created(
        &id,
        &amount,
        &terms.recipient_ref,
        &terms.purpose,
    );
    events::donation_created(env, &terms);

    Ok(id)
}

/// Release a pending donation to its verified recipient.
pub fn claim(env: &Env, caller: &Address, donation_id: u64) -> Result<(), Error> {
    let terms = settle(env, caller, donation_id, Action::Claim)?;
    events::donation_claimed(env, &terms, caller);
    Ok(())
}

/// Refund a pending donation to its donor.
pub fn cancel(env: &Env, caller: &Address, donation_id: u64) -> Result<(), Error> {
    let terms = settle(env, caller, donation_id, Action::Cancel)?;
    events::donation_cancelled(env, &terms);
    Ok(())
}

/// Shared claim/cancel path. Guards run in a fixed order: existence,
/// window, status, caller. Only then does the custodian move funds.
fn settle(
    env: &Env,
    caller: &Address,
    donation_id: u64,
    action: Action,
) -> Result<DonationTerms, Error> {
    let config = storage::load_config(env)?;
    let collaborators = storage::load_collaborators(env)?;

    let terms = storage::load_terms(env, donation_id)?;
    let mut state = storage::load_state(env, donation_id)?;

    check_window(action, terms.created_at, &config, env.ledger().sequence())?;
    let next = transition(state.status, action)?;
    authorize(env, &collaborators, &terms, caller, action)?;

    let custodian = FundCustodianClient::new(env, &collaborators.custodian);
    let paid_out = match action {
        Action::Claim => custodian.release(&donation_id, caller),
        Action::Cancel => custodian.refund(&donation_id, &terms.donor),
    };
    if !paid_out {
        return Err(Error::NoActiveLock);
    }

    // Commit point: status and lock flag change together, once.
    state.status = next;
    state.locked = false;
    storage::save_state(env, donation_id, &state);

    AuditLogClient::new(env, &collaborators.audit_log).record_status(&donation_id, &next);

    Ok(terms)
}
