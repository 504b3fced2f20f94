//! Event types published by the donation controller contract.
//!
//! Mirrors `contracts/donation_controller/src/events.rs`: the first topic is
//! a short symbol naming the event, the second (when present) is the
//! donation id.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Controller bound to its admin and collaborators (`init`).
    ControllerInitialized,
    /// Funds locked and a donation record created (`created`).
    DonationCreated,
    /// Recipient claimed a pending donation (`claimed`).
    DonationClaimed,
    /// Donor cancelled a pending donation (`cancelled`).
    DonationCancelled,
    /// Admin role handed over (`admin_set`).
    AdminChanged,
    /// Claim/cancel windows changed (`timeouts`).
    TimeoutsUpdated,
    /// An event from the controller we don't recognise.
    Unknown,
}

impl EventKind {
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "init" => Self::ControllerInitialized,
            "created" => Self::DonationCreated,
            "claimed" => Self::DonationClaimed,
            "cancelled" => Self::DonationCancelled,
            "admin_set" => Self::AdminChanged,
            "timeouts" => Self::TimeoutsUpdated,
            _ => Self::Unknown,
        }
    }

    /// Identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ControllerInitialized => "controller_initialized",
            Self::DonationCreated => "donation_created",
            Self::DonationClaimed => "donation_claimed",
            Self::DonationCancelled => "donation_cancelled",
            Self::AdminChanged => "admin_changed",
            Self::TimeoutsUpdated => "timeouts_updated",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`], used when reading rows back.
    pub fn from_stored(s: &str) -> Self {
        match s {
            "controller_initialized" => Self::ControllerInitialized,
            "donation_created" => Self::DonationCreated,
            "donation_claimed" => Self::DonationClaimed,
            "donation_cancelled" => Self::DonationCancelled,
            "admin_changed" => Self::AdminChanged,
            "timeouts_updated" => Self::TimeoutsUpdated,
            _ => Self::Unknown,
        }
    }
}

/// A decoded controller event, ready to be stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationEvent {
    pub event_type: String,
    pub donation_id: Option<String>,
    /// Donor on `created`/`cancelled`, recipient wallet on `claimed`,
    /// admin on configuration events.
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// An event row as read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub donation_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

impl EventRecord {
    pub fn kind(&self) -> EventKind {
        EventKind::from_stored(&self.event_type)
    }
}
