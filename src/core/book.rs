//! The in-memory record collections an import merges into
//!
//! The import pipeline only reads and appends to a [`Book`]; storage belongs
//! to the caller. The CLI keeps one YAML file per collection under `data/`.

use miette::{IntoDiagnostic, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::core::entity::normalize_mobile;
use crate::core::identity::EntityKind;
use crate::core::workspace::Workspace;
use crate::entities::{Contact, InventoryUnit, Partner};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    /// Newest first
    pub contacts: Vec<Contact>,
    pub units: Vec<InventoryUnit>,
    pub partners: Vec<Partner>,
}

impl Book {
    /// Load all collections of a workspace; missing files are empty
    pub fn load(workspace: &Workspace) -> Result<Self> {
        Ok(Self {
            contacts: load_collection(&workspace.collection_path(EntityKind::Contact))?,
            units: load_collection(&workspace.collection_path(EntityKind::Unit))?,
            partners: load_collection(&workspace.collection_path(EntityKind::Partner))?,
        })
    }

    /// Write one collection back to the workspace
    pub fn save(&self, workspace: &Workspace, kind: EntityKind) -> Result<()> {
        let path = workspace.collection_path(kind);
        match kind {
            EntityKind::Contact => save_collection(&path, &self.contacts),
            EntityKind::Unit => save_collection(&path, &self.units),
            EntityKind::Partner => save_collection(&path, &self.partners),
        }
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Contact => self.contacts.len(),
            EntityKind::Unit => self.units.len(),
            EntityKind::Partner => self.partners.len(),
        }
    }

    /// Normalized mobiles of existing contacts
    pub fn contact_mobiles(&self) -> HashSet<String> {
        self.contacts
            .iter()
            .filter_map(|c| normalize_mobile(&c.mobile))
            .collect()
    }

    /// Normalized mobiles of existing partners
    pub fn partner_mobiles(&self) -> HashSet<String> {
        self.partners
            .iter()
            .filter_map(|p| normalize_mobile(&p.mobile))
            .collect()
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yml::from_str(&content)
        .map_err(|e| miette::miette!("Failed to parse {}: {}", path.display(), e))
}

fn save_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(records).into_diagnostic()?;
    fs::write(path, yaml).into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::RecordId;
    use crate::entities::LeadStatus;
    use chrono::Utc;
    use tempfile::tempdir;
    use ulid::Ulid;

    fn contact(mobile: &str) -> Contact {
        Contact {
            id: RecordId::new(EntityKind::Contact, Ulid::new(), 0),
            name: "Rahul".to_string(),
            mobile: mobile.to_string(),
            email: None,
            source: "Facebook".to_string(),
            project: None,
            budget: None,
            assigned_to: None,
            remarks: None,
            status: LeadStatus::New,
            created: Utc::now(),
            author: "test".to_string(),
        }
    }

    #[test]
    fn test_load_empty_workspace() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::init(tmp.path()).unwrap();
        let book = Book::load(&workspace).unwrap();
        assert_eq!(book, Book::default());
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::init(tmp.path()).unwrap();

        let mut book = Book::default();
        book.contacts.push(contact("9876543210"));
        book.save(&workspace, EntityKind::Contact).unwrap();

        let reloaded = Book::load(&workspace).unwrap();
        assert_eq!(reloaded.contacts, book.contacts);
        assert_eq!(reloaded.len(EntityKind::Contact), 1);
        assert_eq!(reloaded.len(EntityKind::Unit), 0);
    }

    #[test]
    fn test_contact_mobiles_are_normalized() {
        let mut book = Book::default();
        book.contacts.push(contact("+91 98765 43210"));
        assert!(book.contact_mobiles().contains("9876543210"));
    }

    #[test]
    fn test_corrupt_collection_reports_path() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::init(tmp.path()).unwrap();
        fs::write(workspace.collection_path(EntityKind::Unit), "{not: [yaml").unwrap();
        let err = Book::load(&workspace).unwrap_err();
        assert!(err.to_string().contains("units.yaml"));
    }
}
