//! Record identity: entity kinds and batch-scoped record IDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Importable record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Sales lead / contact
    Contact,
    /// Inventory unit (flat, villa, plot)
    Unit,
    /// Channel partner / broker
    Partner,
}

impl EntityKind {
    /// ID prefix for records of this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Contact => "LEAD",
            EntityKind::Unit => "UNIT",
            EntityKind::Partner => "CP",
        }
    }

    /// Lowercase name used on the command line and in file names
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Contact => "contact",
            EntityKind::Unit => "unit",
            EntityKind::Partner => "partner",
        }
    }

    /// Human-readable plural, for summaries
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Contact => "contacts",
            EntityKind::Unit => "units",
            EntityKind::Partner => "partners",
        }
    }

    pub fn all() -> &'static [EntityKind] {
        &[EntityKind::Contact, EntityKind::Unit, EntityKind::Partner]
    }

    fn from_prefix(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.prefix() == s)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contact" | "contacts" | "lead" | "leads" => Ok(EntityKind::Contact),
            "unit" | "units" | "inventory" => Ok(EntityKind::Unit),
            "partner" | "partners" | "cp" | "broker" => Ok(EntityKind::Partner),
            _ => Err(IdParseError::InvalidKind(s.to_string())),
        }
    }
}

/// Identifier synthesized for an imported record
///
/// Combines the entity prefix, a ULID shared by every record of one import
/// batch, and the 0-based row index within that batch. Rendered as
/// `UNIT-01J0ABCDEF...-3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId {
    kind: EntityKind,
    batch: Ulid,
    row: usize,
}

impl RecordId {
    pub fn new(kind: EntityKind, batch: Ulid, row: usize) -> Self {
        Self { kind, batch, row }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn batch(&self) -> Ulid {
        self.batch
    }

    /// Row index (0-based, header excluded) the record came from
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.kind.prefix(), self.batch, self.row)
    }
}

impl FromStr for RecordId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let (prefix, batch, row) = match (parts.next(), parts.next(), parts.next()) {
            (Some(p), Some(b), Some(r)) => (p, b, r),
            _ => return Err(IdParseError::MissingDelimiter(s.to_string())),
        };

        let kind = EntityKind::from_prefix(prefix)
            .ok_or_else(|| IdParseError::InvalidPrefix(prefix.to_string()))?;
        let batch = Ulid::from_string(batch)
            .map_err(|e| IdParseError::InvalidUlid(batch.to_string(), e.to_string()))?;
        let row = row
            .parse()
            .map_err(|_| IdParseError::InvalidRow(row.to_string()))?;

        Ok(Self { kind, batch, row })
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing kinds and record IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("unknown record kind: '{0}' (valid: contact, unit, partner)")]
    InvalidKind(String),

    #[error("invalid record prefix: '{0}' (valid: LEAD, UNIT, CP)")]
    InvalidPrefix(String),

    #[error("record ID must look like PREFIX-ULID-ROW: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),

    #[error("invalid row index '{0}'")]
    InvalidRow(String),
}
