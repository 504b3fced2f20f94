//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the
//! controller:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type              | Description                         |
//! |------------------|-------------------|-------------------------------------|
//! | `DonationCount`  | `u64`             | Next donation id / total created    |
//! | `Config`         | `LifecycleConfig` | Admin and timeout windows           |
//! | `Collaborators`  | `Collaborators`   | Verifier, custodian, audit log      |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key          | Type            | Description                     |
//! |--------------|-----------------|---------------------------------|
//! | `Terms(id)`  | `DonationTerms` | Immutable donation terms        |
//! | `State(id)`  | `DonationState` | Status and custodian lock flag  |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Env};

use crate::types::{
    Collaborators, Donation, DonationState, DonationStatus, DonationTerms, LifecycleConfig,
};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Next donation id (Instance).
    DonationCount,
    /// Lifecycle configuration (Instance).
    Config,
    /// Collaborator contract addresses (Instance).
    Collaborators,
    /// Immutable donation terms keyed by id (Persistent).
    Terms(u64),
    /// Mutable donation state keyed by id (Persistent).
    State(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

/// Id the next successful submission will receive.
///
/// Reading does not consume the id; see [`commit_donation`].
pub fn next_donation_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::DonationCount)
        .unwrap_or(0)
}

pub fn load_config(env: &Env) -> Result<LifecycleConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn save_config(env: &Env, config: &LifecycleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn load_collaborators(env: &Env) -> Result<Collaborators, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Collaborators)
        .ok_or(Error::NotInitialized)
}

pub fn save_collaborators(env: &Env, collaborators: &Collaborators) {
    env.storage()
        .instance()
        .set(&DataKey::Collaborators, collaborators);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Persist a freshly locked donation and advance the id counter.
///
/// The counter moves only here, so a submission that fails earlier never
/// consumes an id.
pub fn commit_donation(env: &Env, terms: &DonationTerms) {
    let terms_key = DataKey::Terms(terms.id);
    let state_key = DataKey::State(terms.id);

    let state = DonationState {
        status: DonationStatus::Pending,
        locked: true,
    };

    env.storage().persistent().set(&terms_key, terms);
    env.storage().persistent().set(&state_key, &state);
    bump_persistent(env, &terms_key);
    bump_persistent(env, &state_key);

    env.storage()
        .instance()
        .set(&DataKey::DonationCount, &(terms.id + 1));
    bump_instance(env);
}

pub fn load_terms(env: &Env, id: u64) -> Result<DonationTerms, Error> {
    let key = DataKey::Terms(id);
    let terms: DonationTerms = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::DonationNotFound)?;
    bump_persistent(env, &key);
    Ok(terms)
}

pub fn load_state(env: &Env, id: u64) -> Result<DonationState, Error> {
    let key = DataKey::State(id);
    let state: DonationState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::DonationNotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

pub fn save_state(env: &Env, id: u64, state: &DonationState) {
    let key = DataKey::State(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Load the full `Donation` by combining terms and state.
pub fn load_donation(env: &Env, id: u64) -> Option<Donation> {
    let terms = load_terms(env, id).ok()?;
    let state = load_state(env, id).ok()?;
    Some(Donation {
        id: terms.id,
        donor: terms.donor,
        amount: terms.amount,
        recipient_ref: terms.recipient_ref,
        purpose: terms.purpose,
        created_at: terms.created_at,
        status: state.status,
    })
}
