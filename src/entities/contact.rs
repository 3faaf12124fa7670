//! Contact entity type - sales leads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityKind, RecordId};

/// Where a lead is in the sales pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    SiteVisit,
    Negotiation,
    Booked,
    Lost,
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::SiteVisit => "site_visit",
            LeadStatus::Negotiation => "negotiation",
            LeadStatus::Booked => "booked",
            LeadStatus::Lost => "lost",
        }
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(' ', "_").as_str() {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "site_visit" => Ok(LeadStatus::SiteVisit),
            "negotiation" => Ok(LeadStatus::Negotiation),
            "booked" => Ok(LeadStatus::Booked),
            "lost" => Ok(LeadStatus::Lost),
            _ => Err(format!("Unknown lead status: {}", s)),
        }
    }
}

/// A Contact entity - a sales lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier
    pub id: RecordId,

    /// Full name
    pub name: String,

    /// Mobile number, normalized to 10 digits
    pub mobile: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Lead source (campaign, portal, walk-in, ...)
    pub source: String,

    /// Project of interest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Budget as entered (free text, e.g. "85 Lakh")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,

    /// Sales agent who owns the lead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    #[serde(default)]
    pub status: LeadStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Who imported the lead
    pub author: String,
}

impl Entity for Contact {
    const KIND: EntityKind = EntityKind::Contact;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &str {
        self.status.as_str()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}
