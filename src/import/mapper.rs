//! Column mapping: suggested by header heuristics, overridable by the operator

use std::fmt;

use tracing::debug;

use crate::core::identity::EntityKind;
use crate::import::catalog::{self, Field, FieldSpec};
use crate::import::error::ImportError;

/// Where a source column goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Skip,
    Field(Field),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Skip => f.write_str("skip"),
            Target::Field(field) => write!(f, "{}", field.key()),
        }
    }
}

/// Column index (0-based) -> target field, one entry per header column
///
/// Not required to be injective. When two columns target the same field the
/// later column's value wins during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    kind: EntityKind,
    targets: Vec<Target>,
}

impl ColumnMapping {
    /// A mapping with every column skipped
    pub fn skipped(kind: EntityKind, columns: usize) -> Self {
        Self {
            kind,
            targets: vec![Target::Skip; columns],
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Target of a column; columns past the header are skipped
    pub fn get(&self, column: usize) -> Target {
        self.targets.get(column).copied().unwrap_or(Target::Skip)
    }

    /// Point a column at a field (or skip it)
    pub fn set(&mut self, column: usize, target: Target) -> Result<(), ImportError> {
        if let Target::Field(field) = target {
            if field.kind() != self.kind {
                return Err(ImportError::WrongKind {
                    expected: self.kind,
                    found: field.kind(),
                });
            }
        }
        let columns = self.targets.len();
        let slot = self
            .targets
            .get_mut(column)
            .ok_or(ImportError::ColumnOutOfRange {
                index: column + 1,
                columns,
            })?;
        *slot = target;
        Ok(())
    }

    /// (column, target) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Target)> + '_ {
        self.targets.iter().copied().enumerate()
    }

    /// Whether any column feeds the given field
    pub fn is_mapped(&self, field: Field) -> bool {
        self.targets.contains(&Target::Field(field))
    }

    /// Required fields with no column mapped to them, in catalog order
    pub fn unmapped_required(&self) -> Vec<&'static FieldSpec> {
        catalog::required(self.kind)
            .filter(|spec| !self.is_mapped(spec.field))
            .collect()
    }
}

/// Suggest a mapping for a header row
///
/// Each header is lowercased and matched against the catalog in order: a
/// field matches when its key or label (lowercased) is a substring of the
/// header, or when one of its synonyms is. First match wins; unmatched
/// headers are skipped. Pure and deterministic.
pub fn suggest(kind: EntityKind, headers: &[String]) -> ColumnMapping {
    let targets = headers
        .iter()
        .map(|header| match match_header(kind, header) {
            Some(field) => Target::Field(field),
            None => Target::Skip,
        })
        .collect::<Vec<_>>();

    for (column, target) in targets.iter().enumerate() {
        debug!(column, header = %headers[column], %target, "suggested column mapping");
    }

    ColumnMapping { kind, targets }
}

fn match_header(kind: EntityKind, header: &str) -> Option<Field> {
    let header = header.trim().to_lowercase();
    if header.is_empty() {
        return None;
    }

    catalog::catalog(kind)
        .iter()
        .find(|spec| {
            header.contains(&spec.key.to_lowercase())
                || header.contains(&spec.label.to_lowercase())
                || catalog::synonyms(spec.key)
                    .iter()
                    .any(|syn| header.contains(syn))
        })
        .map(|spec| spec.field)
}

/// Parse an operator override of the form `COLUMN=FIELD`
///
/// COLUMN is a 1-based column number or header text (case-insensitive);
/// FIELD is a catalog key or label, or `skip`.
pub fn parse_override(
    kind: EntityKind,
    headers: &[String],
    spec: &str,
) -> Result<(usize, Target), ImportError> {
    let (column, field) = spec
        .rsplit_once('=')
        .ok_or_else(|| ImportError::InvalidOverride(spec.to_string()))?;
    let (column, field) = (column.trim(), field.trim());
    if column.is_empty() || field.is_empty() {
        return Err(ImportError::InvalidOverride(spec.to_string()));
    }

    let index = match column.parse::<usize>() {
        Ok(0) => return Err(ImportError::InvalidOverride(spec.to_string())),
        Ok(n) if n > headers.len() => {
            return Err(ImportError::ColumnOutOfRange {
                index: n,
                columns: headers.len(),
            })
        }
        Ok(n) => n - 1,
        Err(_) => headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
            .ok_or_else(|| ImportError::UnknownColumn(column.to_string()))?,
    };

    let target = if field.eq_ignore_ascii_case("skip") {
        Target::Skip
    } else {
        let spec = catalog::find(kind, field).ok_or_else(|| ImportError::UnknownField {
            kind,
            field: field.to_string(),
        })?;
        Target::Field(spec.field)
    };

    Ok((index, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::catalog::{ContactField, PartnerField, UnitField};

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_suggest_direct_matches() {
        let mapping = suggest(EntityKind::Contact, &headers(&["Name", "Mobile", "Source"]));
        assert_eq!(mapping.get(0), Target::Field(Field::Contact(ContactField::Name)));
        assert_eq!(mapping.get(1), Target::Field(Field::Contact(ContactField::Mobile)));
        assert_eq!(mapping.get(2), Target::Field(Field::Contact(ContactField::Source)));
    }

    #[test]
    fn test_suggest_phone_synonym() {
        let mapping = suggest(EntityKind::Contact, &headers(&["Phone Number"]));
        assert_eq!(mapping.get(0), Target::Field(Field::Contact(ContactField::Mobile)));

        let mapping = suggest(EntityKind::Partner, &headers(&["Contact"]));
        assert_eq!(mapping.get(0), Target::Field(Field::Partner(PartnerField::Mobile)));
    }

    #[test]
    fn test_suggest_unit_and_remarks_synonyms() {
        let mapping = suggest(EntityKind::Unit, &headers(&["Flat No", "Tower / Project"]));
        assert_eq!(mapping.get(0), Target::Field(Field::Unit(UnitField::UnitNumber)));
        assert_eq!(mapping.get(1), Target::Field(Field::Unit(UnitField::Project)));

        let mapping = suggest(EntityKind::Contact, &headers(&["Notes", "Comments"]));
        assert_eq!(mapping.get(0), Target::Field(Field::Contact(ContactField::Remarks)));
        assert_eq!(mapping.get(1), Target::Field(Field::Contact(ContactField::Remarks)));
    }

    #[test]
    fn test_suggest_label_match() {
        let mapping = suggest(EntityKind::Unit, &headers(&["AREA (SQ FT)", "unit_number"]));
        assert_eq!(mapping.get(0), Target::Field(Field::Unit(UnitField::Area)));
        assert_eq!(mapping.get(1), Target::Field(Field::Unit(UnitField::UnitNumber)));
    }

    #[test]
    fn test_suggest_first_catalog_entry_wins() {
        // "Project Name" contains both "project" and "name"; name comes first
        let mapping = suggest(EntityKind::Contact, &headers(&["Project Name"]));
        assert_eq!(mapping.get(0), Target::Field(Field::Contact(ContactField::Name)));
    }

    #[test]
    fn test_suggest_unmatched_and_empty_headers_skip() {
        let mapping = suggest(EntityKind::Contact, &headers(&["Favourite Colour", ""]));
        assert_eq!(mapping.get(0), Target::Skip);
        assert_eq!(mapping.get(1), Target::Skip);
        assert_eq!(mapping.get(7), Target::Skip);
    }

    #[test]
    fn test_suggest_is_deterministic() {
        let cols = headers(&["Lead Name", "Phone", "Email ID", "Budget", "Note"]);
        assert_eq!(suggest(EntityKind::Contact, &cols), suggest(EntityKind::Contact, &cols));
    }

    #[test]
    fn test_unmapped_required() {
        let mapping = suggest(EntityKind::Contact, &headers(&["Name", "Source"]));
        let missing: Vec<_> = mapping.unmapped_required().iter().map(|s| s.key).collect();
        assert_eq!(missing, vec!["mobile"]);
    }

    #[test]
    fn test_set_checks_kind_and_range() {
        let mut mapping = ColumnMapping::skipped(EntityKind::Contact, 2);
        mapping
            .set(1, Target::Field(Field::Contact(ContactField::Mobile)))
            .unwrap();
        assert!(mapping.is_mapped(Field::Contact(ContactField::Mobile)));

        let err = mapping
            .set(0, Target::Field(Field::Unit(UnitField::Area)))
            .unwrap_err();
        assert!(matches!(err, ImportError::WrongKind { .. }));

        let err = mapping.set(5, Target::Skip).unwrap_err();
        assert!(matches!(err, ImportError::ColumnOutOfRange { index: 6, columns: 2 }));
    }

    #[test]
    fn test_parse_override_by_index_and_header() {
        let cols = headers(&["Name", "Cell"]);
        let (idx, target) = parse_override(EntityKind::Contact, &cols, "2=mobile").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(target, Target::Field(Field::Contact(ContactField::Mobile)));

        let (idx, target) = parse_override(EntityKind::Contact, &cols, "cell = Mobile Number").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(target, Target::Field(Field::Contact(ContactField::Mobile)));

        let (idx, target) = parse_override(EntityKind::Contact, &cols, "Name=skip").unwrap();
        assert_eq!((idx, target), (0, Target::Skip));
    }

    #[test]
    fn test_parse_override_errors() {
        let cols = headers(&["Name"]);
        assert!(matches!(
            parse_override(EntityKind::Contact, &cols, "name"),
            Err(ImportError::InvalidOverride(_))
        ));
        assert!(matches!(
            parse_override(EntityKind::Contact, &cols, "0=name"),
            Err(ImportError::InvalidOverride(_))
        ));
        assert!(matches!(
            parse_override(EntityKind::Contact, &cols, "3=name"),
            Err(ImportError::ColumnOutOfRange { index: 3, columns: 1 })
        ));
        assert!(matches!(
            parse_override(EntityKind::Contact, &cols, "Phone=mobile"),
            Err(ImportError::UnknownColumn(_))
        ));
        assert!(matches!(
            parse_override(EntityKind::Contact, &cols, "1=tier"),
            Err(ImportError::UnknownField { .. })
        ));
    }
}
