//! Row validation: raw cells -> typed record or row error
//!
//! Cells are first extracted into a per-kind draft according to the column
//! mapping, then checked against the catalog's required fields and the kind's
//! business rules. Validation never mutates its inputs, so re-running it
//! with the same mapping and batch stamp gives the same report.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::info;
use ulid::Ulid;

use crate::core::book::Book;
use crate::core::entity::normalize_mobile;
use crate::core::identity::{EntityKind, RecordId};
use crate::entities::{
    Contact, InventoryUnit, LeadStatus, Partner, PartnerTier, Record, UnitStatus,
};
use crate::entities::partner::PENDING_LICENSE;
use crate::import::catalog::{self, ContactField, Field, PartnerField, UnitField};
use crate::import::error::ImportError;
use crate::import::mapper::{ColumnMapping, Target};
use crate::import::parser::is_blank_row;
use crate::import::report::{RowError, ValidatedRecord, ValidationReport};

/// Lead source recorded when the file has none
pub const DEFAULT_SOURCE: &str = "Import";

/// Values shared by every record of one import batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStamp {
    /// Discriminator embedded in every record ID of the batch
    pub batch: Ulid,
    pub imported_at: DateTime<Utc>,
    pub author: String,
}

impl BatchStamp {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            batch: Ulid::new(),
            imported_at: Utc::now(),
            author: author.into(),
        }
    }

    fn id(&self, kind: EntityKind, row_index: usize) -> RecordId {
        RecordId::new(kind, self.batch, row_index)
    }
}

/// What one raw row turned into
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Valid(ValidatedRecord),
    Invalid(RowError),
    /// Empty row, silently skipped
    Blank,
}

#[derive(Debug, Default)]
struct ContactDraft {
    name: Option<String>,
    mobile: Option<String>,
    email: Option<String>,
    source: Option<String>,
    project: Option<String>,
    budget: Option<String>,
    assigned_to: Option<String>,
    remarks: Option<String>,
}

impl ContactDraft {
    fn slot(&mut self, field: ContactField) -> &mut Option<String> {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Mobile => &mut self.mobile,
            ContactField::Email => &mut self.email,
            ContactField::Source => &mut self.source,
            ContactField::Project => &mut self.project,
            ContactField::Budget => &mut self.budget,
            ContactField::AssignedTo => &mut self.assigned_to,
            ContactField::Remarks => &mut self.remarks,
        }
    }
}

#[derive(Debug, Default)]
struct UnitDraft {
    unit_number: Option<String>,
    project: Option<String>,
    configuration: Option<String>,
    floor: Option<String>,
    area: Option<String>,
    price: Option<String>,
    facing: Option<String>,
    status: Option<String>,
}

impl UnitDraft {
    fn slot(&mut self, field: UnitField) -> &mut Option<String> {
        match field {
            UnitField::UnitNumber => &mut self.unit_number,
            UnitField::Project => &mut self.project,
            UnitField::Configuration => &mut self.configuration,
            UnitField::Floor => &mut self.floor,
            UnitField::Area => &mut self.area,
            UnitField::Price => &mut self.price,
            UnitField::Facing => &mut self.facing,
            UnitField::Status => &mut self.status,
        }
    }
}

#[derive(Debug, Default)]
struct PartnerDraft {
    name: Option<String>,
    mobile: Option<String>,
    email: Option<String>,
    firm: Option<String>,
    license_id: Option<String>,
    tier: Option<String>,
    city: Option<String>,
}

impl PartnerDraft {
    fn slot(&mut self, field: PartnerField) -> &mut Option<String> {
        match field {
            PartnerField::Name => &mut self.name,
            PartnerField::Mobile => &mut self.mobile,
            PartnerField::Email => &mut self.email,
            PartnerField::Firm => &mut self.firm,
            PartnerField::LicenseId => &mut self.license_id,
            PartnerField::Tier => &mut self.tier,
            PartnerField::City => &mut self.city,
        }
    }
}

/// Cell values of one row, keyed by typed field
#[derive(Debug)]
enum Draft {
    Contact(ContactDraft),
    Unit(UnitDraft),
    Partner(PartnerDraft),
}

impl Draft {
    fn new(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Contact => Draft::Contact(ContactDraft::default()),
            EntityKind::Unit => Draft::Unit(UnitDraft::default()),
            EntityKind::Partner => Draft::Partner(PartnerDraft::default()),
        }
    }

    fn slot(&mut self, field: Field) -> Option<&mut Option<String>> {
        match (self, field) {
            (Draft::Contact(d), Field::Contact(f)) => Some(d.slot(f)),
            (Draft::Unit(d), Field::Unit(f)) => Some(d.slot(f)),
            (Draft::Partner(d), Field::Partner(f)) => Some(d.slot(f)),
            _ => None,
        }
    }

    /// Store a cell; empty cells are stored as absent, later columns overwrite
    fn set(&mut self, field: Field, value: &str) {
        if let Some(slot) = self.slot(field) {
            let value = value.trim();
            *slot = (!value.is_empty()).then(|| value.to_string());
        }
    }

    fn has(&mut self, field: Field) -> bool {
        self.slot(field).is_some_and(|slot| slot.is_some())
    }

    fn extract(kind: EntityKind, mapping: &ColumnMapping, cells: &[String]) -> Self {
        let mut draft = Draft::new(kind);
        for (column, target) in mapping.iter() {
            if let Target::Field(field) = target {
                draft.set(field, cells.get(column).map(String::as_str).unwrap_or(""));
            }
        }
        draft
    }
}

/// Validate every row against a committed mapping
///
/// Fails before touching any row when a required field has no column.
/// Contact mobiles are checked for duplicates against the existing
/// contacts in `book` only, not against other rows of the same batch.
pub fn validate(
    mapping: &ColumnMapping,
    rows: &[Vec<String>],
    book: &Book,
    stamp: &BatchStamp,
) -> Result<ValidationReport, ImportError> {
    let missing = mapping.unmapped_required();
    if !missing.is_empty() {
        return Err(ImportError::MissingMappings {
            fields: missing.iter().map(|spec| spec.label.to_string()).collect(),
        });
    }

    let existing_mobiles = match mapping.kind() {
        EntityKind::Contact => book.contact_mobiles(),
        _ => HashSet::new(),
    };

    let mut report = ValidationReport {
        total_rows: rows.len(),
        ..Default::default()
    };

    for (row_index, cells) in rows.iter().enumerate() {
        match validate_row(mapping, row_index, cells, &existing_mobiles, stamp) {
            RowOutcome::Valid(record) => report.records.push(record),
            RowOutcome::Invalid(error) => report.errors.push(error),
            RowOutcome::Blank => {}
        }
    }

    let summary = report.summary();
    info!(
        kind = %mapping.kind(),
        valid = summary.valid_count,
        errors = summary.error_count,
        total = summary.total_row_count,
        "validated import rows"
    );

    Ok(report)
}

/// Validate one row
pub fn validate_row(
    mapping: &ColumnMapping,
    row_index: usize,
    cells: &[String],
    existing_mobiles: &HashSet<String>,
    stamp: &BatchStamp,
) -> RowOutcome {
    if is_blank_row(cells) {
        return RowOutcome::Blank;
    }

    let kind = mapping.kind();
    let mut draft = Draft::extract(kind, mapping, cells);

    let missing: Vec<&str> = catalog::required(kind)
        .filter(|spec| !draft.has(spec.field))
        .map(|spec| spec.label)
        .collect();
    if !missing.is_empty() {
        return RowOutcome::Invalid(RowError::at(
            row_index,
            format!("Missing required field(s): {}", missing.join(", ")),
        ));
    }

    let id = stamp.id(kind, row_index);
    let built = match draft {
        Draft::Contact(d) => build_contact(d, id, existing_mobiles, stamp).map(Record::Contact),
        Draft::Unit(d) => build_unit(d, id, stamp).map(Record::Unit),
        Draft::Partner(d) => build_partner(d, id, stamp).map(Record::Partner),
    };

    match built {
        Ok(record) => RowOutcome::Valid(ValidatedRecord { row_index, record }),
        Err(message) => RowOutcome::Invalid(RowError::at(row_index, message)),
    }
}

fn build_contact(
    d: ContactDraft,
    id: RecordId,
    existing_mobiles: &HashSet<String>,
    stamp: &BatchStamp,
) -> Result<Contact, &'static str> {
    let mobile = d
        .mobile
        .as_deref()
        .and_then(normalize_mobile)
        .ok_or("Invalid Mobile")?;
    if existing_mobiles.contains(&mobile) {
        return Err("Duplicate Mobile");
    }

    Ok(Contact {
        id,
        name: d.name.unwrap_or_default(),
        mobile,
        email: d.email,
        source: d.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        project: d.project,
        budget: d.budget,
        assigned_to: d.assigned_to,
        remarks: d.remarks,
        status: LeadStatus::New,
        created: stamp.imported_at,
        author: stamp.author.clone(),
    })
}

fn build_unit(d: UnitDraft, id: RecordId, stamp: &BatchStamp) -> Result<InventoryUnit, &'static str> {
    let area = parse_amount(d.area.as_deref()).ok_or("Invalid Area")?;
    let price = parse_amount(d.price.as_deref()).ok_or("Invalid Price")?;
    let floor = match d.floor.as_deref() {
        Some(raw) => Some(raw.trim().parse::<i32>().map_err(|_| "Invalid Floor")?),
        None => None,
    };
    let status = match d.status.as_deref() {
        Some(raw) => raw.parse::<UnitStatus>().map_err(|_| "Invalid Status")?,
        None => UnitStatus::Available,
    };

    Ok(InventoryUnit {
        id,
        unit_number: d.unit_number.unwrap_or_default(),
        project: d.project.unwrap_or_default(),
        configuration: d.configuration,
        floor,
        area,
        price,
        facing: d.facing,
        status,
        created: stamp.imported_at,
        author: stamp.author.clone(),
    })
}

fn build_partner(d: PartnerDraft, id: RecordId, stamp: &BatchStamp) -> Result<Partner, &'static str> {
    let raw_mobile = d.mobile.as_deref().ok_or("Missing Mobile")?;
    let mobile = normalize_mobile(raw_mobile).ok_or("Invalid Mobile")?;
    let tier = match d.tier.as_deref() {
        Some(raw) => raw.parse::<PartnerTier>().map_err(|_| "Invalid Tier")?,
        None => PartnerTier::Silver,
    };

    Ok(Partner {
        id,
        name: d.name.unwrap_or_default(),
        mobile,
        email: d.email,
        firm: d.firm,
        license_id: d.license_id.unwrap_or_else(|| PENDING_LICENSE.to_string()),
        tier,
        city: d.city,
        created: stamp.imported_at,
        author: stamp.author.clone(),
    })
}

/// Parse a non-negative amount; absent means 0
///
/// Thousands separators (`,` and `_`) and inner spaces are ignored.
fn parse_amount(raw: Option<&str>) -> Option<f64> {
    let Some(raw) = raw else {
        return Some(0.0);
    };
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
