//! # Administration
//!
//! One administrator, held in [`LifecycleConfig`]. The admin can hand the
//! role to another address in a single step and can retune the claim and
//! cancel windows. Timeout changes apply to every check made afterwards,
//! including checks against donations created before the change.
//!
//! Every gate here is an exact match against the stored admin; a mismatch
//! is always reported as [`Error::NotAuthorized`], never ignored.

use soroban_sdk::{Address, Env};

use crate::events;
use crate::storage;
use crate::types::{Collaborators, LifecycleConfig};
use crate::validation::validate_timeouts;
use crate::Error;

/// Bind the admin, collaborators and initial windows. One-shot.
pub fn init(
    env: &Env,
    admin: Address,
    collaborators: Collaborators,
    claim_timeout: u32,
    cancel_timeout: u32,
) -> Result<(), Error> {
    if storage::is_initialized(env) {
        return Err(Error::AlreadyInitialized);
    }
    validate_timeouts(claim_timeout, cancel_timeout)?;

    let config = LifecycleConfig {
        admin,
        claim_timeout,
        cancel_timeout,
    };
    storage::save_config(env, &config);
    storage::save_collaborators(env, &collaborators);

    events::controller_initialized(env, &config);
    Ok(())
}

/// Load the config and check that `caller` is its admin.
pub fn require_admin(env: &Env, caller: &Address) -> Result<LifecycleConfig, Error> {
    let config = storage::load_config(env)?;
    if config.admin != *caller {
        return Err(Error::NotAuthorized);
    }
    Ok(config)
}

pub fn set_admin(env: &Env, caller: &Address, new_admin: Address) -> Result<(), Error> {
    let mut config = require_admin(env, caller)?;

    let previous = core::mem::replace(&mut config.admin, new_admin);
    storage::save_config(env, &config);

    events::admin_changed(env, &previous, &config.admin);
    Ok(())
}

pub fn set_timeouts(
    env: &Env,
    caller: &Address,
    claim_timeout: u32,
    cancel_timeout: u32,
) -> Result<(), Error> {
    let mut config = require_admin(env, caller)?;
    validate_timeouts(claim_timeout, cancel_timeout)?;

    config.claim_timeout = claim_timeout;
    config.cancel_timeout = cancel_timeout;
    storage::save_config(env, &config);

    events::timeouts_updated(env, &config);
    Ok(())
}
