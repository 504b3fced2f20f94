//! In-memory collaborator contracts and a shared test harness.
//!
//! The mocks keep just enough state for assertions: which recipients are
//! verified, which locks are active and how they were paid out, and the
//! ordered audit trail.

extern crate std;

use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    Address, Env, String, Vec,
};

use crate::{Collaborators, DonationController, DonationControllerClient, DonationStatus};

pub const START_LEDGER: u32 = 1_000;
pub const CLAIM_TIMEOUT: u32 = 100;
pub const CANCEL_TIMEOUT: u32 = 50;

// ── Verification authority ───────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum VerifierKey {
    Wallet(String),
    Verified(String),
}

#[contract]
pub struct MockVerifier;

#[contractimpl]
impl MockVerifier {
    pub fn register(env: Env, recipient_ref: String, wallet: Address) {
        let storage = env.storage().instance();
        storage.set(&VerifierKey::Wallet(recipient_ref.clone()), &wallet);
        storage.set(&VerifierKey::Verified(recipient_ref), &true);
    }

    pub fn set_verified(env: Env, recipient_ref: String, verified: bool) {
        env.storage()
            .instance()
            .set(&VerifierKey::Verified(recipient_ref), &verified);
    }

    pub fn is_verified(env: Env, recipient_ref: String) -> bool {
        env.storage()
            .instance()
            .get(&VerifierKey::Verified(recipient_ref))
            .unwrap_or(false)
    }

    pub fn recipient_address(env: Env, recipient_ref: String) -> Option<Address> {
        if !Self::is_verified(env.clone(), recipient_ref.clone()) {
            return None;
        }
        env.storage()
            .instance()
            .get(&VerifierKey::Wallet(recipient_ref))
    }
}

// ── Fund custodian ───────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockEntry {
    pub donor: Address,
    pub amount: i128,
    pub recipient_ref: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Payout {
    Released(Address),
    Refunded(Address),
}

#[contracttype]
#[derive(Clone)]
pub enum CustodianKey {
    Lock(u64),
    Payout(u64),
    ActiveLocks,
    RejectLocks,
}

#[contract]
pub struct MockCustodian;

fn pay_out(env: &Env, donation_id: u64, payout: Payout) -> bool {
    let storage = env.storage().instance();
    if !storage.has(&CustodianKey::Lock(donation_id)) {
        return false;
    }
    storage.remove(&CustodianKey::Lock(donation_id));
    storage.set(&CustodianKey::Payout(donation_id), &payout);
    let active: u32 = storage.get(&CustodianKey::ActiveLocks).unwrap_or(0);
    storage.set(&CustodianKey::ActiveLocks, &(active - 1));
    true
}

#[contractimpl]
impl MockCustodian {
    pub fn lock(
        env: Env,
        donor: Address,
        amount: i128,
        recipient_ref: String,
        donation_id: u64,
    ) -> bool {
        let storage = env.storage().instance();
        let rejecting: bool = storage.get(&CustodianKey::RejectLocks).unwrap_or(false);
        if rejecting || storage.has(&CustodianKey::Lock(donation_id)) {
            return false;
        }
        let entry = LockEntry {
            donor,
            amount,
            recipient_ref,
        };
        storage.set(&CustodianKey::Lock(donation_id), &entry);
        let active: u32 = storage.get(&CustodianKey::ActiveLocks).unwrap_or(0);
        storage.set(&CustodianKey::ActiveLocks, &(active + 1));
        true
    }

    pub fn release(env: Env, donation_id: u64, to: Address) -> bool {
        pay_out(&env, donation_id, Payout::Released(to))
    }

    pub fn refund(env: Env, donation_id: u64, to: Address) -> bool {
        pay_out(&env, donation_id, Payout::Refunded(to))
    }

    pub fn reject_locks(env: Env, reject: bool) {
        env.storage()
            .instance()
            .set(&CustodianKey::RejectLocks, &reject);
    }

    /// Forget a lock behind the controller's back.
    pub fn drop_lock(env: Env, donation_id: u64) {
        let storage = env.storage().instance();
        if storage.has(&CustodianKey::Lock(donation_id)) {
            storage.remove(&CustodianKey::Lock(donation_id));
            let active: u32 = storage.get(&CustodianKey::ActiveLocks).unwrap_or(0);
            storage.set(&CustodianKey::ActiveLocks, &(active - 1));
        }
    }

    pub fn active_locks(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&CustodianKey::ActiveLocks)
            .unwrap_or(0)
    }

    pub fn lock_of(env: Env, donation_id: u64) -> Option<LockEntry> {
        env.storage()
            .instance()
            .get(&CustodianKey::Lock(donation_id))
    }

    pub fn payout_of(env: Env, donation_id: u64) -> Option<Payout> {
        env.storage()
            .instance()
            .get(&CustodianKey::Payout(donation_id))
    }
}

// ── Audit log ────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatedEntry {
    pub donation_id: u64,
    pub amount: i128,
    pub recipient_ref: String,
    pub purpose: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusEntry {
    pub donation_id: u64,
    pub status: DonationStatus,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuditEntry {
    Created(CreatedEntry),
    Status(StatusEntry),
}

#[contracttype]
#[derive(Clone)]
pub enum AuditKey {
    Entries,
}

#[contract]
pub struct MockAuditLog;

fn append(env: &Env, entry: AuditEntry) {
    let storage = env.storage().instance();
    let mut entries: Vec<AuditEntry> = storage
        .get(&AuditKey::Entries)
        .unwrap_or_else(|| Vec::new(env));
    entries.push_back(entry);
    storage.set(&AuditKey::Entries, &entries);
}

#[contractimpl]
impl MockAuditLog {
    pub fn record_created(
        env: Env,
        donation_id: u64,
        amount: i128,
        recipient_ref: String,
        purpose: String,
    ) {
        let entry = CreatedEntry {
            donation_id,
            amount,
            recipient_ref,
            purpose,
        };
        append(&env, AuditEntry::Created(entry));
    }

    pub fn record_status(env: Env, donation_id: u64, status: DonationStatus) {
        append(&env, AuditEntry::Status(StatusEntry { donation_id, status }));
    }

    pub fn entries(env: Env) -> Vec<AuditEntry> {
        env.storage()
            .instance()
            .get(&AuditKey::Entries)
            .unwrap_or_else(|| Vec::new(&env))
    }
}

// ── Harness ──────────────────────────────────────────────────────────

pub struct Harness {
    pub env: Env,
    pub client: DonationControllerClient<'static>,
    pub verifier: MockVerifierClient<'static>,
    pub custodian: MockCustodianClient<'static>,
    pub audit: MockAuditLogClient<'static>,
    pub admin: Address,
}

pub fn set_ledger(env: &Env, sequence: u32) {
    env.ledger().with_mut(|li| li.sequence_number = sequence);
}

/// Register the mocks and the controller without initialising it.
pub fn setup_uninitialized() -> Harness {
    let env = Env::default();
    env.mock_all_auths();
    set_ledger(&env, START_LEDGER);

    let verifier = MockVerifierClient::new(&env, &env.register(MockVerifier, ()));
    let custodian = MockCustodianClient::new(&env, &env.register(MockCustodian, ()));
    let audit = MockAuditLogClient::new(&env, &env.register(MockAuditLog, ()));
    let client = DonationControllerClient::new(&env, &env.register(DonationController, ()));
    let admin = Address::generate(&env);

    Harness {
        env,
        client,
        verifier,
        custodian,
        audit,
        admin,
    }
}

pub fn setup() -> Harness {
    let h = setup_uninitialized();
    h.client
        .init(&h.admin, &h.collaborators(), &CLAIM_TIMEOUT, &CANCEL_TIMEOUT);
    h
}

impl Harness {
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            verifier: self.verifier.address.clone(),
            custodian: self.custodian.address.clone(),
            audit_log: self.audit.address.clone(),
        }
    }

    pub fn text(&self, value: &str) -> String {
        String::from_str(&self.env, value)
    }

    /// Register `reference` with the verifier and return it with its wallet.
    pub fn verified_recipient(&self, reference: &str) -> (String, Address) {
        let recipient_ref = self.text(reference);
        let wallet = Address::generate(&self.env);
        self.verifier.register(&recipient_ref, &wallet);
        (recipient_ref, wallet)
    }

    pub fn donate(&self, donor: &Address, amount: i128, recipient_ref: &String) -> u64 {
        self.client
            .submit(donor, &amount, recipient_ref, &self.text("Relief"))
    }
}
