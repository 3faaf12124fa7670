//! Entity type definitions
//!
//! propdesk imports three kinds of record:
//!
//! - [`Contact`] - sales leads, deduplicated by normalized mobile number
//! - [`InventoryUnit`] - flats/villas/plots with area, price and availability
//! - [`Partner`] - channel partners (brokers) with license and tier
//!
//! [`Record`] is the tagged union the import pipeline produces.

pub mod contact;
pub mod partner;
pub mod unit;

pub use contact::{Contact, LeadStatus};
pub use partner::{Partner, PartnerTier};
pub use unit::{InventoryUnit, UnitStatus};

use serde::Serialize;

use crate::core::entity::Entity;
use crate::core::identity::{EntityKind, RecordId};

/// A fully-typed record of any importable kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Contact(Contact),
    Unit(InventoryUnit),
    Partner(Partner),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Contact(_) => EntityKind::Contact,
            Record::Unit(_) => EntityKind::Unit,
            Record::Partner(_) => EntityKind::Partner,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            Record::Contact(c) => c.id(),
            Record::Unit(u) => u.id(),
            Record::Partner(p) => p.id(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Record::Contact(c) => c.title(),
            Record::Unit(u) => u.title(),
            Record::Partner(p) => p.title(),
        }
    }

    /// Short per-kind detail for preview tables
    pub fn detail(&self) -> String {
        match self {
            Record::Contact(c) => format!("{} ({})", c.mobile, c.source),
            Record::Unit(u) => format!(
                "{} | {} sq ft | {} | {}",
                u.project, u.area, u.price, u.status
            ),
            Record::Partner(p) => format!("{} | {} | {}", p.mobile, p.license_id, p.tier),
        }
    }
}
