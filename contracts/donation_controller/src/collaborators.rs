//! # Collaborator interfaces
//!
//! The controller composes three independently deployed contracts. Each is
//! reached through a generated client; the controller never depends on
//! their internals, only on the signatures below.
//!
//! | Collaborator            | Role                                           |
//! |-------------------------|------------------------------------------------|
//! | `VerificationAuthority` | Is a recipient verified, and which wallet is it |
//! | `FundCustodian`         | Holds locked value keyed by donation id         |
//! | `AuditLog`              | Append-only record of creations and transitions |
//!
//! Failures are reported as values (`bool`, `Option`) so the controller can
//! map each one onto its own [`crate::Error`] variant.

use soroban_sdk::{contractclient, Address, Env, String};

use crate::types::DonationStatus;

#[contractclient(name = "VerificationAuthorityClient")]
pub trait VerificationAuthority {
    /// `true` while `recipient_ref` is currently verified.
    fn is_verified(env: Env, recipient_ref: String) -> bool;

    /// Wallet registered for a currently verified recipient, if any.
    ///
    /// This mapping is the only source of truth for who may claim.
    fn recipient_address(env: Env, recipient_ref: String) -> Option<Address>;
}

#[contractclient(name = "FundCustodianClient")]
pub trait FundCustodian {
    /// Take `amount` from `donor` into a lock keyed by `donation_id`.
    fn lock(
        env: Env,
        donor: Address,
        amount: i128,
        recipient_ref: String,
        donation_id: u64,
    ) -> bool;

    /// Pay the locked value out to `to`. `false` when no lock is active.
    fn release(env: Env, donation_id: u64, to: Address) -> bool;

    /// Return the locked value to `to`. `false` when no lock is active.
    fn refund(env: Env, donation_id: u64, to: Address) -> bool;
}

#[contractclient(name = "AuditLogClient")]
pub trait AuditLog {
    fn record_created(
        env: Env,
        donation_id: u64,
        amount: i128,
        recipient_ref: String,
        purpose: String,
    );

    fn record_status(env: Env, donation_id: u64, status: DonationStatus);
}
