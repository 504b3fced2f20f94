//! # Donation Lifecycle Controller
//!
//! Custody lifecycle for donations earmarked for verified recipients. A
//! donation is locked with an external custodian on submission and leaves
//! that lock exactly once: released to the verified recipient, or refunded
//! to the donor, each inside its own window of ledgers.
//!
//! | Phase        | Entry Point(s)                                   |
//! |--------------|--------------------------------------------------|
//! | Bootstrap    | [`DonationController::init`]                     |
//! | Admin        | `set_admin`, `set_timeouts`                      |
//! | Submission   | [`DonationController::submit`]                   |
//! | Settlement   | [`DonationController::claim`], [`DonationController::cancel`] |
//! | Queries      | `get_donation`, `is_locked`, `get_count`, `get_config`, `get_collaborators` |
//!
//! ## Architecture
//!
//! The state machine and collaborator orchestration live in [`lifecycle`].
//! Admin gating lives in [`admin`]. Storage access is delegated to
//! `storage`. This file contains only the public entry points and the
//! caller authentication each of them requires.
//!
//! The verification authority, fund custodian and audit log are separate
//! contracts, reached through the clients in [`collaborators`].

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String};

pub mod admin;
pub mod collaborators;
pub mod events;
pub mod lifecycle;
mod storage;
mod types;
pub mod validation;

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod test_admin;

pub use types::{Collaborators, Donation, DonationStatus, LifecycleConfig};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized        = 1,
    AlreadyInitialized    = 2,
    InvalidAmount         = 3,
    InvalidPurpose        = 4,
    InvalidRecipient      = 5,
    InvalidTimeout        = 6,
    NotAuthorized         = 7,
    NotRecipient          = 8,
    NotDonor              = 9,
    DonationNotFound      = 10,
    AlreadyClaimed        = 11,
    AlreadyCancelled      = 12,
    CannotCancel          = 13,
    ClaimWindowExpired    = 14,
    CancelWindowExpired   = 15,
    RecipientNotVerified  = 16,
    LockFailed            = 17,
    NoActiveLock          = 18,
}

#[contract]
pub struct DonationController;

#[contractimpl]
impl DonationController {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the controller.
    ///
    /// Must be called exactly once after deployment. Subsequent calls fail
    /// with `Error::AlreadyInitialized`.
    ///
    /// - `admin` must sign and becomes the sole configuration authority.
    /// - `claim_timeout` and `cancel_timeout` are ledger counts, both > 0.
    pub fn init(
        env: Env,
        admin: Address,
        collaborators: Collaborators,
        claim_timeout: u32,
        cancel_timeout: u32,
    ) -> Result<(), Error> {
        admin.require_auth();
        admin::init(&env, admin, collaborators, claim_timeout, cancel_timeout)
    }

    // ─────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────

    /// Hand the admin role to `new_admin`. Takes effect immediately.
    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        caller.require_auth();
        admin::set_admin(&env, &caller, new_admin)
    }

    /// Replace both timeout windows. Applies to all later checks.
    pub fn set_timeouts(
        env: Env,
        caller: Address,
        claim_timeout: u32,
        cancel_timeout: u32,
    ) -> Result<(), Error> {
        caller.require_auth();
        admin::set_timeouts(&env, &caller, claim_timeout, cancel_timeout)
    }

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────

    /// Submit a donation of `amount` for `recipient_ref`.
    ///
    /// `donor` must authorize. The recipient must be verified and the
    /// custodian must accept the lock; only then is an id assigned.
    pub fn submit(
        env: Env,
        donor: Address,
        amount: i128,
        recipient_ref: String,
        purpose: String,
    ) -> Result<u64, Error> {
        donor.require_auth();
        lifecycle::submit(&env, donor, amount, recipient_ref, purpose)
    }

    /// Claim a pending donation. `caller` must be the wallet the
    /// verification authority resolves for the donation's recipient.
    pub fn claim(env: Env, caller: Address, donation_id: u64) -> Result<(), Error> {
        caller.require_auth();
        lifecycle::claim(&env, &caller, donation_id)
    }

    /// Cancel a pending donation and refund the donor. `caller` must be
    /// the original donor.
    pub fn cancel(env: Env, caller: Address, donation_id: u64) -> Result<(), Error> {
        caller.require_auth();
        lifecycle::cancel(&env, &caller, donation_id)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_donation(env: Env, donation_id: u64) -> Option<Donation> {
        storage::load_donation(&env, donation_id)
    }

    /// Whether the custodian still holds funds for `donation_id`.
    /// `false` for unknown ids.
    pub fn is_locked(env: Env, donation_id: u64) -> bool {
        storage::load_state(&env, donation_id)
            .map(|state| state.locked)
            .unwrap_or(false)
    }

    /// Number of donations ever created, which is also the next id.
    pub fn get_count(env: Env) -> u64 {
        storage::next_donation_id(&env)
    }

    pub fn get_config(env: Env) -> Result<LifecycleConfig, Error> {
        storage::load_config(&env)
    }

    pub fn get_collaborators(env: Env) -> Result<Collaborators, Error> {
        storage::load_collaborators(&env)
    }
}
