//! Partner entity type - channel partners and brokers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityKind, RecordId};

/// Commission tier of a channel partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerTier {
    #[default]
    Silver,
    Gold,
    Platinum,
}

impl PartnerTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerTier::Silver => "silver",
            PartnerTier::Gold => "gold",
            PartnerTier::Platinum => "platinum",
        }
    }
}

impl std::fmt::Display for PartnerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PartnerTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "silver" => Ok(PartnerTier::Silver),
            "gold" => Ok(PartnerTier::Gold),
            "platinum" => Ok(PartnerTier::Platinum),
            _ => Err(format!(
                "Invalid tier: {}. Use silver, gold, or platinum",
                s
            )),
        }
    }
}

/// License ID recorded when a partner has not supplied one yet
pub const PENDING_LICENSE: &str = "Pending";

/// A channel partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    /// Unique identifier
    pub id: RecordId,

    /// Contact person name
    pub name: String,

    /// Mobile number, normalized to 10 digits
    pub mobile: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Brokerage firm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firm: Option<String>,

    /// RERA / registration number
    pub license_id: String,

    #[serde(default)]
    pub tier: PartnerTier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Who imported the partner
    pub author: String,
}

impl Entity for Partner {
    const KIND: EntityKind = EntityKind::Partner;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &str {
        if self.license_id == PENDING_LICENSE {
            "pending"
        } else {
            "registered"
        }
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}
