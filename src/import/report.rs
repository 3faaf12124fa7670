//! Validation results: counts, preview and exportable error log

use csv::WriterBuilder;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::entities::Record;

/// A row that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based line number in the source file, counting the header
    pub row_number: usize,
    pub message: String,
}

impl RowError {
    /// Error for the row at `row_index` (0-based, header excluded)
    pub fn at(row_index: usize, message: impl Into<String>) -> Self {
        Self {
            row_number: row_index + 2,
            message: message.into(),
        }
    }
}

/// A typed record ready for commit, tagged with its source row
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    /// 0-based data row index
    pub row_index: usize,
    pub record: Record,
}

/// Counts from the latest validation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub valid_count: usize,
    pub error_count: usize,
    pub total_row_count: usize,
}

impl ImportSummary {
    /// Rows that produced neither a record nor an error
    pub fn blank_count(&self) -> usize {
        self.total_row_count - self.valid_count - self.error_count
    }
}

/// Everything one validation pass produced, in row order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub records: Vec<ValidatedRecord>,
    pub errors: Vec<RowError>,
    pub total_rows: usize,
}

impl ValidationReport {
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            valid_count: self.records.len(),
            error_count: self.errors.len(),
            total_row_count: self.total_rows,
        }
    }

    /// First `limit` valid records
    pub fn preview(&self, limit: usize) -> &[ValidatedRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error log as CSV: `Row,Error` header then one line per error
    pub fn error_log_csv(&self) -> Result<String> {
        let mut wtr = WriterBuilder::new().from_writer(Vec::new());
        wtr.write_record(["Row", "Error"]).into_diagnostic()?;
        for error in &self.errors {
            wtr.write_record([error.row_number.to_string(), error.message.clone()])
                .into_diagnostic()?;
        }
        let bytes = wtr.into_inner().into_diagnostic()?;
        String::from_utf8(bytes).into_diagnostic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_errors(errors: Vec<RowError>) -> ValidationReport {
        ValidationReport {
            records: Vec::new(),
            total_rows: errors.len(),
            errors,
        }
    }

    #[test]
    fn test_row_error_numbering() {
        let err = RowError::at(0, "Invalid Mobile");
        assert_eq!(err.row_number, 2);
    }

    #[test]
    fn test_summary_counts() {
        let report = ValidationReport {
            records: Vec::new(),
            errors: vec![RowError::at(0, "Invalid Mobile")],
            total_rows: 3,
        };
        let summary = report.summary();
        assert_eq!(summary.valid_count, 0);
        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.total_row_count, 3);
        assert_eq!(summary.blank_count(), 2);
    }

    #[test]
    fn test_error_log_csv() {
        let report = report_with_errors(vec![
            RowError::at(0, "Invalid Mobile"),
            RowError::at(3, "Missing required field(s): Name, Mobile Number"),
        ]);
        let csv = report.error_log_csv().unwrap();
        assert_eq!(
            csv,
            "Row,Error\n2,Invalid Mobile\n5,\"Missing required field(s): Name, Mobile Number\"\n"
        );
    }

    #[test]
    fn test_error_log_csv_empty() {
        let csv = ValidationReport::default().error_log_csv().unwrap();
        assert_eq!(csv, "Row,Error\n");
    }

    #[test]
    fn test_preview_clamps() {
        let report = ValidationReport::default();
        assert!(report.preview(5).is_empty());
    }
}
