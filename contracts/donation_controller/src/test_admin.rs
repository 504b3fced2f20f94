extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::mocks::{setup, setup_uninitialized, CANCEL_TIMEOUT, CLAIM_TIMEOUT};
use crate::{Error, LifecycleConfig};

#[test]
fn test_init_stores_config_and_collaborators() {
    let h = setup();

    assert_eq!(
        h.client.get_config(),
        LifecycleConfig {
            admin: h.admin.clone(),
            claim_timeout: CLAIM_TIMEOUT,
            cancel_timeout: CANCEL_TIMEOUT,
        }
    );
    assert_eq!(h.client.get_collaborators(), h.collaborators());
    assert_eq!(h.client.get_count(), 0);
}

#[test]
fn test_double_initialization_fails() {
    let h = setup();
    let other = Address::generate(&h.env);

    let result = h
        .client
        .try_init(&other, &h.collaborators(), &10, &10);
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    assert_eq!(h.client.get_config().admin, h.admin);
}

#[test]
fn test_init_rejects_zero_timeouts() {
    let h = setup_uninitialized();

    assert_eq!(
        h.client.try_init(&h.admin, &h.collaborators(), &0, &10),
        Err(Ok(Error::InvalidTimeout))
    );
    assert_eq!(
        h.client.try_init(&h.admin, &h.collaborators(), &10, &0),
        Err(Ok(Error::InvalidTimeout))
    );

    // Still initialisable after the rejected attempts.
    h.client.init(&h.admin, &h.collaborators(), &10, &10);
}

#[test]
fn test_non_admin_set_timeouts_rejected() {
    let h = setup();
    let intruder = Address::generate(&h.env);
    let before = h.client.get_config();

    let result = h.client.try_set_timeouts(&intruder, &1, &1);
    assert_eq!(result, Err(Ok(Error::NotAuthorized)));
    assert_eq!(h.client.get_config(), before);
}

#[test]
fn test_admin_sets_timeouts() {
    let h = setup();

    h.client.set_timeouts(&h.admin, &500, &250);

    let config = h.client.get_config();
    assert_eq!(config.claim_timeout, 500);
    assert_eq!(config.cancel_timeout, 250);
}

#[test]
fn test_set_timeouts_requires_positive_values() {
    let h = setup();

    assert_eq!(
        h.client.try_set_timeouts(&h.admin, &0, &5),
        Err(Ok(Error::InvalidTimeout))
    );
    assert_eq!(
        h.client.try_set_timeouts(&h.admin, &5, &0),
        Err(Ok(Error::InvalidTimeout))
    );
    assert_eq!(h.client.get_config().claim_timeout, CLAIM_TIMEOUT);
}

#[test]
fn test_admin_transfer() {
    let h = setup();
    let successor = Address::generate(&h.env);

    h.client.set_admin(&h.admin, &successor);
    assert_eq!(h.client.get_config().admin, successor);

    // The previous admin loses every power immediately.
    assert_eq!(
        h.client.try_set_timeouts(&h.admin, &7, &7),
        Err(Ok(Error::NotAuthorized))
    );
    assert_eq!(
        h.client.try_set_admin(&h.admin, &h.admin),
        Err(Ok(Error::NotAuthorized))
    );

    h.client.set_timeouts(&successor, &7, &7);
    assert_eq!(h.client.get_config().claim_timeout, 7);
}

#[test]
fn test_non_admin_set_admin_rejected() {
    let h = setup();
    let intruder = Address::generate(&h.env);

    assert_eq!(
        h.client.try_set_admin(&intruder, &intruder),
        Err(Ok(Error::NotAuthorized))
    );
    assert_eq!(h.client.get_config().admin, h.admin);
}

#[test]
fn test_admin_calls_before_init_fail() {
    let h = setup_uninitialized();

    assert_eq!(
        h.client.try_set_admin(&h.admin, &h.admin),
        Err(Ok(Error::NotInitialized))
    );
    assert_eq!(
        h.client.try_set_timeouts(&h.admin, &1, &1),
        Err(Ok(Error::NotInitialized))
    );
    assert_eq!(
        h.client.try_get_collaborators(),
        Err(Ok(Error::NotInitialized))
    );
}
