//! Inventory unit entity type - flats, villas, plots in a project

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityKind, RecordId};

/// Sales availability of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    #[default]
    Available,
    Blocked,
    Booked,
    Sold,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Available => "available",
            UnitStatus::Blocked => "blocked",
            UnitStatus::Booked => "booked",
            UnitStatus::Sold => "sold",
        }
    }
}

impl std::fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UnitStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" | "open" => Ok(UnitStatus::Available),
            "blocked" | "hold" | "on hold" => Ok(UnitStatus::Blocked),
            "booked" => Ok(UnitStatus::Booked),
            "sold" => Ok(UnitStatus::Sold),
            _ => Err(format!(
                "Invalid unit status: {}. Use available, blocked, booked, or sold",
                s
            )),
        }
    }
}

/// An inventory unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryUnit {
    /// Unique identifier
    pub id: RecordId,

    /// Unit / flat number (e.g. "A-1204")
    pub unit_number: String,

    /// Project or tower the unit belongs to
    pub project: String,

    /// Configuration (e.g. "2BHK")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,

    /// Saleable area in square feet
    #[serde(default)]
    pub area: f64,

    /// List price
    #[serde(default)]
    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing: Option<String>,

    #[serde(default)]
    pub status: UnitStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Who imported the unit
    pub author: String,
}

impl Entity for InventoryUnit {
    const KIND: EntityKind = EntityKind::Unit;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.unit_number
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

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    #[test]
    fn test_unit_roundtrip() {
        let unit = InventoryUnit {
            id: RecordId::new(EntityKind::Unit, Ulid::new(), 2),
            unit_number: "A-1204".to_string(),
            project: "Skyline Towers".to_string(),
            configuration: Some("3BHK".to_string()),
            floor: Some(12),
            area: 1450.0,
            price: 12_500_000.0,
            facing: None,
            status: UnitStatus::Blocked,
            created: Utc::now(),
            author: "test".to_string(),
        };

        let yaml = serde_yml::to_string(&unit).unwrap();
        assert!(yaml.contains("status: blocked"));
        let parsed: InventoryUnit = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed, unit);
    }

    #[test]
    fn test_unit_status_parse() {
        assert_eq!("Available".parse::<UnitStatus>().unwrap(), UnitStatus::Available);
        assert_eq!(" SOLD ".parse::<UnitStatus>().unwrap(), UnitStatus::Sold);
        assert_eq!("on hold".parse::<UnitStatus>().unwrap(), UnitStatus::Blocked);
        assert!("reserved?".parse::<UnitStatus>().is_err());
    }
}
