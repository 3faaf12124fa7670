//! Field catalogs: the fixed target schema for each record kind

use std::fmt;

use crate::core::identity::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Mobile,
    Email,
    Source,
    Project,
    Budget,
    AssignedTo,
    Remarks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitField {
    UnitNumber,
    Project,
    Configuration,
    Floor,
    Area,
    Price,
    Facing,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartnerField {
    Name,
    Mobile,
    Email,
    Firm,
    LicenseId,
    Tier,
    City,
}

/// A target field of some record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Contact(ContactField),
    Unit(UnitField),
    Partner(PartnerField),
}

impl Field {
    pub fn kind(&self) -> EntityKind {
        match self {
            Field::Contact(_) => EntityKind::Contact,
            Field::Unit(_) => EntityKind::Unit,
            Field::Partner(_) => EntityKind::Partner,
        }
    }

    /// Catalog entry describing this field
    pub fn spec(&self) -> &'static FieldSpec {
        catalog(self.kind())
            .iter()
            .find(|spec| spec.field == *self)
            .unwrap_or(&CONTACT_FIELDS[0])
    }

    pub fn key(&self) -> &'static str {
        self.spec().key
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What a field's cells should look like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    /// Phone-like; normalized to 10 digits
    Phone,
    /// Decimal number
    Number,
    /// Whole number
    Integer,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Phone => "phone",
            ValueKind::Number => "number",
            ValueKind::Integer => "integer",
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    /// Field id used on the command line (`--map 2=mobile`)
    pub key: &'static str,
    /// Display label, also the template header
    pub label: &'static str,
    pub required: bool,
    pub value: ValueKind,
    /// Synthetic example value for templates
    pub sample: &'static str,
}

const fn entry(
    field: Field,
    key: &'static str,
    label: &'static str,
    required: bool,
    value: ValueKind,
    sample: &'static str,
) -> FieldSpec {
    FieldSpec {
        field,
        key,
        label,
        required,
        value,
        sample,
    }
}

static CONTACT_FIELDS: [FieldSpec; 8] = [
    entry(Field::Contact(ContactField::Name), "name", "Name", true, ValueKind::Text, "Rahul Sharma"),
    entry(Field::Contact(ContactField::Mobile), "mobile", "Mobile Number", true, ValueKind::Phone, "9876543210"),
    entry(Field::Contact(ContactField::Email), "email", "Email", false, ValueKind::Text, "rahul.sharma@example.com"),
    entry(Field::Contact(ContactField::Source), "source", "Source", false, ValueKind::Text, "Facebook"),
    entry(Field::Contact(ContactField::Project), "project", "Project", false, ValueKind::Text, "Skyline Towers"),
    entry(Field::Contact(ContactField::Budget), "budget", "Budget", false, ValueKind::Text, "85 Lakh"),
    entry(Field::Contact(ContactField::AssignedTo), "assigned_to", "Assigned To", false, ValueKind::Text, "Priya"),
    entry(Field::Contact(ContactField::Remarks), "remarks", "Remarks", false, ValueKind::Text, "Wants east facing"),
];

static UNIT_FIELDS: [FieldSpec; 8] = [
    entry(Field::Unit(UnitField::UnitNumber), "unit_number", "Unit Number", true, ValueKind::Text, "A-1204"),
    entry(Field::Unit(UnitField::Project), "project", "Project", true, ValueKind::Text, "Skyline Towers"),
    entry(Field::Unit(UnitField::Configuration), "configuration", "Configuration", false, ValueKind::Text, "3BHK"),
    entry(Field::Unit(UnitField::Floor), "floor", "Floor", false, ValueKind::Integer, "12"),
    entry(Field::Unit(UnitField::Area), "area", "Area (sq ft)", false, ValueKind::Number, "1450"),
    entry(Field::Unit(UnitField::Price), "price", "Price", false, ValueKind::Number, "12500000"),
    entry(Field::Unit(UnitField::Facing), "facing", "Facing", false, ValueKind::Text, "East"),
    entry(Field::Unit(UnitField::Status), "status", "Status", false, ValueKind::Text, "Available"),
];

static PARTNER_FIELDS: [FieldSpec; 7] = [
    entry(Field::Partner(PartnerField::Name), "name", "Name", true, ValueKind::Text, "Anil Mehta"),
    entry(Field::Partner(PartnerField::Mobile), "mobile", "Mobile Number", false, ValueKind::Phone, "9123456780"),
    entry(Field::Partner(PartnerField::Email), "email", "Email", false, ValueKind::Text, "anil@example.com"),
    entry(Field::Partner(PartnerField::Firm), "firm", "Firm", false, ValueKind::Text, "Mehta Realty"),
    entry(Field::Partner(PartnerField::LicenseId), "license_id", "License ID", false, ValueKind::Text, "RERA-A51800012345"),
    entry(Field::Partner(PartnerField::Tier), "tier", "Tier", false, ValueKind::Text, "Gold"),
    entry(Field::Partner(PartnerField::City), "city", "City", false, ValueKind::Text, "Pune"),
];

/// Ordered catalog for a record kind
pub fn catalog(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::Contact => &CONTACT_FIELDS,
        EntityKind::Unit => &UNIT_FIELDS,
        EntityKind::Partner => &PARTNER_FIELDS,
    }
}

/// Look up a field by key or label, case-insensitively
pub fn find(kind: EntityKind, name: &str) -> Option<&'static FieldSpec> {
    let name = name.trim();
    catalog(kind)
        .iter()
        .find(|spec| spec.key.eq_ignore_ascii_case(name) || spec.label.eq_ignore_ascii_case(name))
}

/// Required fields of a kind, in catalog order
pub fn required(kind: EntityKind) -> impl Iterator<Item = &'static FieldSpec> {
    catalog(kind).iter().filter(|spec| spec.required)
}

/// Extra header fragments that identify a field beyond its key and label
pub fn synonyms(key: &str) -> &'static [&'static str] {
    match key {
        "mobile" => &["phone", "contact"],
        "unit_number" => &["flat", "unit"],
        "remarks" => &["note", "comment"],
        _ => &[],
    }
}
