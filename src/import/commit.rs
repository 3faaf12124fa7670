//! Commit gate: merge validated records into the destination collection

use std::collections::HashSet;
use tracing::{info, warn};

use crate::core::assign::RoundRobin;
use crate::core::book::Book;
use crate::core::entity::normalize_mobile;
use crate::core::identity::EntityKind;
use crate::entities::{Contact, InventoryUnit, Partner, Record};
use crate::import::report::ValidatedRecord;

/// What a commit did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Records added to the destination
    pub applied: usize,
    /// Records dropped because the destination already had them
    pub skipped_duplicates: usize,
    /// New leads given an agent by round-robin
    pub assigned: usize,
}

/// Merge records of `kind` into `book`
///
/// Contacts are prepended in file order (newest first) after round-robin
/// assignment; they were already checked for duplicates during validation.
/// Units whose ID already exists and partners whose normalized mobile
/// already exists are dropped; the rest are appended. Duplicate checks run
/// against the destination as it was before the commit.
pub fn commit(
    kind: EntityKind,
    records: &[ValidatedRecord],
    book: &mut Book,
    assigner: &mut RoundRobin,
) -> CommitReport {
    let mut report = CommitReport::default();

    match kind {
        EntityKind::Contact => {
            let mut fresh: Vec<Contact> = records
                .iter()
                .filter_map(|r| match &r.record {
                    Record::Contact(c) => Some(c.clone()),
                    _ => None,
                })
                .collect();
            report.assigned = assigner.assign(&mut fresh);
            report.applied = fresh.len();
            book.contacts.splice(0..0, fresh);
        }
        EntityKind::Unit => {
            let existing: HashSet<String> =
                book.units.iter().map(|u| u.id.to_string()).collect();
            let fresh: Vec<InventoryUnit> = records
                .iter()
                .filter_map(|r| match &r.record {
                    Record::Unit(u) => Some(u),
                    _ => None,
                })
                .filter(|u| {
                    let dup = existing.contains(&u.id.to_string());
                    if dup {
                        warn!(id = %u.id, "unit already exists, skipping");
                    }
                    !dup
                })
                .cloned()
                .collect();
            report.applied = fresh.len();
            book.units.extend(fresh);
        }
        EntityKind::Partner => {
            let existing = book.partner_mobiles();
            let fresh: Vec<Partner> = records
                .iter()
                .filter_map(|r| match &r.record {
                    Record::Partner(p) => Some(p),
                    _ => None,
                })
                .filter(|p| {
                    let dup = normalize_mobile(&p.mobile).is_some_and(|m| existing.contains(&m));
                    if dup {
                        warn!(mobile = %p.mobile, "partner already exists, skipping");
                    }
                    !dup
                })
                .cloned()
                .collect();
            report.applied = fresh.len();
            book.partners.extend(fresh);
        }
    }

    let offered = records.iter().filter(|r| r.record.kind() == kind).count();
    report.skipped_duplicates = offered - report.applied;

    info!(
        %kind,
        applied = report.applied,
        skipped = report.skipped_duplicates,
        assigned = report.assigned,
        "committed import"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::RecordId;
    use crate::entities::{LeadStatus, PartnerTier, UnitStatus};
    use chrono::Utc;
    use ulid::Ulid;

    fn unit(id: RecordId, number: &str) -> InventoryUnit {
        InventoryUnit {
            id,
            unit_number: number.to_string(),
            project: "Skyline".to_string(),
            configuration: None,
            floor: None,
            area: 0.0,
            price: 0.0,
            facing: None,
            status: UnitStatus::Available,
            created: Utc::now(),
            author: "test".to_string(),
        }
    }

    fn partner(row: usize, mobile: &str) -> Partner {
        Partner {
            id: RecordId::new(EntityKind::Partner, Ulid::new(), row),
            name: format!("Partner {}", row),
            mobile: mobile.to_string(),
            email: None,
            firm: None,
            license_id: "Pending".to_string(),
            tier: PartnerTier::Silver,
            city: None,
            created: Utc::now(),
            author: "test".to_string(),
        }
    }

    fn contact(row: usize, name: &str) -> Contact {
        Contact {
            id: RecordId::new(EntityKind::Contact, Ulid::new(), row),
            name: name.to_string(),
            mobile: format!("98765432{:02}", row),
            email: None,
            source: "Import".to_string(),
            project: None,
            budget: None,
            assigned_to: None,
            remarks: None,
            status: LeadStatus::New,
            created: Utc::now(),
            author: "test".to_string(),
        }
    }

    fn validated(row_index: usize, record: Record) -> ValidatedRecord {
        ValidatedRecord { row_index, record }
    }

    fn no_agents() -> RoundRobin {
        RoundRobin::new(Vec::new(), 0)
    }

    #[test]
    fn test_units_with_existing_id_are_dropped() {
        let batch = Ulid::new();
        let mut book = Book::default();
        book.units.push(unit(RecordId::new(EntityKind::Unit, batch, 1), "OLD"));

        let records = vec![
            validated(0, Record::Unit(unit(RecordId::new(EntityKind::Unit, batch, 0), "A-1"))),
            validated(1, Record::Unit(unit(RecordId::new(EntityKind::Unit, batch, 1), "A-2"))),
            validated(2, Record::Unit(unit(RecordId::new(EntityKind::Unit, batch, 2), "A-3"))),
        ];

        let report = commit(EntityKind::Unit, &records, &mut book, &mut no_agents());
        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped_duplicates, 1);
        assert_eq!(book.units.len(), 3);
        let numbers: Vec<_> = book.units.iter().map(|u| u.unit_number.as_str()).collect();
        assert_eq!(numbers, vec!["OLD", "A-1", "A-3"]);
    }

    #[test]
    fn test_partners_with_existing_mobile_are_dropped() {
        let mut book = Book::default();
        book.partners.push(partner(9, "9123456780"));

        let records = vec![
            validated(0, Record::Partner(partner(0, "9123456780"))),
            validated(1, Record::Partner(partner(1, "9000000001"))),
        ];

        let report = commit(EntityKind::Partner, &records, &mut book, &mut no_agents());
        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped_duplicates, 1);
        assert_eq!(book.partners.last().map(|p| p.mobile.as_str()), Some("9000000001"));
    }

    #[test]
    fn test_contacts_prepended_in_file_order() {
        let mut book = Book::default();
        book.contacts.push(contact(50, "Old"));

        let records = vec![
            validated(0, Record::Contact(contact(0, "First"))),
            validated(1, Record::Contact(contact(1, "Second"))),
        ];

        let report = commit(EntityKind::Contact, &records, &mut book, &mut no_agents());
        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped_duplicates, 0);
        let names: Vec<_> = book.contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Old"]);
    }

    #[test]
    fn test_contacts_assigned_round_robin() {
        let mut book = Book::default();
        let records = vec![
            validated(0, Record::Contact(contact(0, "A"))),
            validated(1, Record::Contact(contact(1, "B"))),
            validated(2, Record::Contact(contact(2, "C"))),
        ];
        let mut rr = RoundRobin::new(vec!["Priya".to_string(), "Arjun".to_string()], 0);

        let report = commit(EntityKind::Contact, &records, &mut book, &mut rr);
        assert_eq!(report.assigned, 3);
        let owners: Vec<_> = book
            .contacts
            .iter()
            .map(|c| c.assigned_to.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(owners, vec!["Priya", "Arjun", "Priya"]);
    }

    #[test]
    fn test_records_of_other_kinds_ignored() {
        let mut book = Book::default();
        let records = vec![validated(0, Record::Contact(contact(0, "A")))];
        let report = commit(EntityKind::Unit, &records, &mut book, &mut no_agents());
        assert_eq!(report, CommitReport::default());
        assert!(book.contacts.is_empty());
    }
}
