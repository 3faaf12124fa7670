//! Entity trait - common interface for imported record types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::{EntityKind, RecordId};

/// Common trait for all propdesk records
pub trait Entity: Serialize + DeserializeOwned {
    /// The record kind
    const KIND: EntityKind;

    /// Get the record's unique ID
    fn id(&self) -> &RecordId;

    /// Get a display title (name, unit number, ...)
    fn title(&self) -> &str;

    /// Get the record's status as a lowercase string
    fn status(&self) -> &str;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Get the author (who imported the record)
    fn author(&self) -> &str;
}

/// Normalize a phone-like value: keep digits only and take the last 10
///
/// Returns `None` unless exactly 10 digits remain, so "987" fails while
/// "+91 98765 43210" and "(987) 654-3210" both normalize to "9876543210".
pub fn normalize_mobile(raw: &str) -> Option<String> {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 10 {
        return None;
    }
    Some(digits[digits.len() - 10..].iter().collect())
}
