//! # Events
//!
//! Every committed state change publishes one event, after the custodian
//! and audit log calls have succeeded. Off-chain indexers key on the first
//! topic symbol:
//!
//! | Topic       | Second topic | Data                    |
//! |-------------|--------------|-------------------------|
//! | `init`      | none         | [`ControllerInitialized`] |
//! | `created`   | donation id  | [`DonationCreated`]     |
//! | `claimed`   | donation id  | [`DonationClaimed`]     |
//! | `cancelled` | donation id  | [`DonationCancelled`]   |
//! | `admin_set` | none         | [`AdminChanged`]        |
//! | `timeouts`  | none         | [`TimeoutsUpdated`]     |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::{DonationTerms, LifecycleConfig};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ControllerInitialized {
    pub admin: Address,
    pub claim_timeout: u32,
    pub cancel_timeout: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationCreated {
    pub donation_id: u64,
    pub donor: Address,
    pub recipient_ref: String,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationClaimed {
    pub donation_id: u64,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationCancelled {
    pub donation_id: u64,
    pub donor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChanged {
    pub previous: Address,
    pub new_admin: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeoutsUpdated {
    pub admin: Address,
    pub claim_timeout: u32,
    pub cancel_timeout: u32,
}

pub fn controller_initialized(env: &Env, config: &LifecycleConfig) {
    env.events().publish(
        (symbol_short!("init"),),
        ControllerInitialized {
            admin: config.admin.clone(),
            claim_timeout: config.claim_timeout,
            cancel_timeout: config.cancel_timeout,
        },
    );
}

pub fn donation_created(env: &Env, terms: &DonationTerms) {
    env.events().publish(
        (symbol_short!("created"), terms.id),
        DonationCreated {
            donation_id: terms.id,
            donor: terms.donor.clone(),
            recipient_ref: terms.recipient_ref.clone(),
            amount: terms.amount,
        },
    );
}

pub fn donation_claimed(env: &Env, terms: &DonationTerms, recipient: &Address) {
    env.events().publish(
        (symbol_short!("claimed"), terms.id),
        DonationClaimed {
            donation_id: terms.id,
            recipient: recipient.clone(),
            amount: terms.amount,
        },
    );
}

pub fn donation_cancelled(env: &Env, terms: &DonationTerms) {
    env.events().publish(
        (symbol_short!("cancelled"), terms.id),
        DonationCancelled {
            donation_id: terms.id,
            donor: terms.donor.clone(),
            amount: terms.amount,
        },
    );
}

pub fn admin_changed(env: &Env, previous: &Address, new_admin: &Address) {
    env.events().publish(
        (symbol_short!("admin_set"),),
        AdminChanged {
            previous: previous.clone(),
            new_admin: new_admin.clone(),
        },
    );
}

pub fn timeouts_updated(env: &Env, config: &LifecycleConfig) {
    env.events().publish(
        (symbol_short!("timeouts"),),
        TimeoutsUpdated {
            admin: config.admin.clone(),
            claim_timeout: config.claim_timeout,
            cancel_timeout: config.cancel_timeout,
        },
    );
}
