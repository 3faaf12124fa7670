//! CSV templates: catalog labels plus one synthetic example row

use csv::WriterBuilder;
use miette::{IntoDiagnostic, Result};

use crate::core::identity::EntityKind;
use crate::import::catalog;

/// Template for a record kind
///
/// The header line lists the catalog's display labels in catalog order, so
/// a filled-in template auto-maps every column. The second line carries
/// sample values of the right shape for each field.
pub fn template_csv(kind: EntityKind) -> Result<String> {
    let fields = catalog::catalog(kind);

    let mut wtr = WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record(fields.iter().map(|spec| spec.label))
        .into_diagnostic()?;
    wtr.write_record(fields.iter().map(|spec| spec.sample))
        .into_diagnostic()?;

    let bytes = wtr.into_inner().into_diagnostic()?;
    String::from_utf8(bytes).into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::book::Book;
    use crate::import::catalog::ValueKind;
    use crate::import::mapper::{suggest, Target};
    use crate::import::parser::{parse, CsvMode};
    use crate::import::validate::{validate, BatchStamp};

    #[test]
    fn test_unit_template() {
        let csv = template_csv(EntityKind::Unit).unwrap();
        insta::assert_snapshot!(csv, @r"
        Unit Number,Project,Configuration,Floor,Area (sq ft),Price,Facing,Status
        A-1204,Skyline Towers,3BHK,12,1450,12500000,East,Available
        ");
    }

    #[test]
    fn test_numeric_samples_parse() {
        for kind in EntityKind::all() {
            for spec in catalog::catalog(*kind) {
                match spec.value {
                    ValueKind::Number => assert!(spec.sample.parse::<f64>().is_ok(), "{}", spec.key),
                    ValueKind::Integer => assert!(spec.sample.parse::<i64>().is_ok(), "{}", spec.key),
                    ValueKind::Phone => assert_eq!(spec.sample.len(), 10, "{}", spec.key),
                    ValueKind::Text => {}
                }
            }
        }
    }

    #[test]
    fn test_templates_import_cleanly() {
        for kind in EntityKind::all() {
            let csv = template_csv(*kind).unwrap();
            let table = parse(&csv, CsvMode::Naive, 10).unwrap();
            let mapping = suggest(*kind, &table.headers);
            assert!(
                mapping.iter().all(|(_, target)| target != Target::Skip),
                "{} template has unmapped columns",
                kind
            );
            let report = validate(&mapping, &table.rows, &Book::default(), &BatchStamp::new("t")).unwrap();
            assert_eq!(report.summary().valid_count, 1, "{}: {:?}", kind, report.errors);
        }
    }
}
