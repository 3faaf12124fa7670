//! CSV import pipeline
//!
//! Parse -> map -> validate -> review -> commit, driven by [`ImportSession`].

pub mod catalog;
pub mod commit;
pub mod error;
pub mod mapper;
pub mod parser;
pub mod report;
pub mod session;
pub mod template;
pub mod validate;

pub use catalog::{Field, FieldSpec, ValueKind};
pub use commit::CommitReport;
pub use error::ImportError;
pub use mapper::{ColumnMapping, Target};
pub use parser::{CsvMode, ParsedTable};
pub use report::{ImportSummary, RowError, ValidatedRecord, ValidationReport};
pub use session::{ImportOptions, ImportSession, Stage};
pub use validate::BatchStamp;
