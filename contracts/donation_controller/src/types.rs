//! # Types
//!
//! Shared data structures used across all modules of the donation controller.
//!
//! ## Design decisions
//!
//! ### Terms / State split
//!
//! A `Donation` is internally stored as two separate ledger entries:
//!
//! - [`DonationTerms`]: written once at submission; never mutated.
//! - [`DonationState`]: rewritten exactly once, on the terminal transition.
//!
//! The public API exposes the reconstructed [`Donation`] struct.
//!
//! ### Status as a Finite-State Machine
//!
//! ```text
//! Pending ──► Claimed
//!    └──────► Cancelled
//! ```
//!
//! `Claimed` and `Cancelled` are terminal. Whether a donation has been
//! claimed is derived from the status tag; there is no second flag that
//! could disagree with it.

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle status of a donation.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DonationStatus {
    /// Funds locked with the custodian, awaiting claim or cancel.
    Pending,
    /// Released to the verified recipient.
    Claimed,
    /// Refunded to the donor.
    Cancelled,
}

impl DonationStatus {
    pub fn is_claimed(&self) -> bool {
        matches!(self, DonationStatus::Claimed)
    }

    /// `Claimed` and `Cancelled` accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DonationStatus::Pending)
    }
}

/// Immutable donation terms, written once at submission.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationTerms {
    pub id: u64,
    pub donor: Address,
    pub amount: i128,
    pub recipient_ref: String,
    pub purpose: String,
    pub created_at: u32,
}

/// Mutable donation state.
///
/// `locked` mirrors whether the custodian still holds the funds; it is
/// cleared in the same write that moves `status` into a terminal state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationState {
    pub status: DonationStatus,
    pub locked: bool,
}

/// Full representation of a donation.
///
/// Used as the public API return type; reconstructed internally from
/// the split `DonationTerms` + `DonationState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Donation {
    /// Sequential identifier, starting at 0.
    pub id: u64,
    /// Address that submitted the donation and receives refunds.
    pub donor: Address,
    /// Locked value, always strictly positive.
    pub amount: i128,
    /// Opaque recipient identifier resolved by the verification authority.
    pub recipient_ref: String,
    /// Free-text description, 1 to 256 bytes.
    pub purpose: String,
    /// Ledger sequence at submission; anchors both timeout windows.
    pub created_at: u32,
    /// Current lifecycle status.
    pub status: DonationStatus,
}

impl Donation {
    pub fn is_claimed(&self) -> bool {
        self.status.is_claimed()
    }
}

/// Administrative configuration held by the controller.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LifecycleConfig {
    /// Sole principal allowed to change this configuration.
    pub admin: Address,
    /// Ledgers after `created_at` during which the recipient may claim.
    pub claim_timeout: u32,
    /// Ledgers after `created_at` during which the donor may cancel.
    pub cancel_timeout: u32,
}

/// Addresses of the external contracts the controller orchestrates.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collaborators {
    pub verifier: Address,
    pub custodian: Address,
    pub audit_log: Address,
}
