//! Per-donation lifecycle view rebuilt from indexed events.
//!
//! The controller only emits `claimed`/`cancelled` for a pending donation,
//! so a well-formed trail has at most one terminal event. Anything after a
//! terminal event is logged and ignored rather than trusted.

use serde::Serialize;
use tracing::warn;

use crate::events::{EventKind, EventRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailStatus {
    Pending,
    Claimed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationTrail {
    pub donation_id: String,
    pub status: TrailStatus,
    pub donor: Option<String>,
    /// Wallet that claimed, once claimed.
    pub recipient: Option<String>,
    pub amount: Option<String>,
    pub created_ledger: Option<i64>,
    pub settled_ledger: Option<i64>,
    pub event_count: usize,
}

impl DonationTrail {
    fn new(donation_id: &str) -> Self {
        Self {
            donation_id: donation_id.to_string(),
            status: TrailStatus::Pending,
            donor: None,
            recipient: None,
            amount: None,
            created_ledger: None,
            settled_ledger: None,
            event_count: 0,
        }
    }

    fn settle(&mut self, status: TrailStatus, record: &EventRecord) {
        if self.status != TrailStatus::Pending {
            warn!(
                donation_id = %self.donation_id,
                ledger = record.ledger,
                "ignoring {} after terminal {:?}",
                record.event_type,
                self.status
            );
            return;
        }
        self.status = status;
        self.settled_ledger = Some(record.ledger);
        if self.amount.is_none() {
            self.amount = record.amount.clone();
        }
    }
}

/// Fold `records` (oldest first) into a trail. `None` when there are no
/// lifecycle events for the donation.
pub fn project(donation_id: &str, records: &[EventRecord]) -> Option<DonationTrail> {
    let mut trail: Option<DonationTrail> = None;

    for record in records {
        let kind = record.kind();
        if !matches!(
            kind,
            EventKind::DonationCreated | EventKind::DonationClaimed | EventKind::DonationCancelled
        ) {
            continue;
        }

        let t = trail.get_or_insert_with(|| DonationTrail::new(donation_id));
        t.event_count += 1;

        match kind {
            EventKind::DonationCreated => {
                t.donor = record.actor.clone();
                t.amount = record.amount.clone();
                t.created_ledger = Some(record.ledger);
            }
            EventKind::DonationClaimed => {
                t.settle(TrailStatus::Claimed, record);
                if t.status == TrailStatus::Claimed && t.recipient.is_none() {
                    t.recipient = record.actor.clone();
                }
            }
            EventKind::DonationCancelled => t.settle(TrailStatus::Cancelled, record),
            _ => {}
        }
    }

    trail
}
