//! Import errors that stop a session step
//!
//! Per-row failures are not errors in this sense; they are collected as
//! [`RowError`](super::report::RowError) values and reported in aggregate.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::identity::EntityKind;
use crate::import::session::Stage;

#[derive(Debug, Error, Diagnostic)]
pub enum ImportError {
    /// Input is not shaped like a table (blocks the upload step)
    #[error("{0}")]
    #[diagnostic(
        code(propdesk::import::structure),
        help("the first line must be a header row, followed by at least one data row")
    )]
    Structural(String),

    /// Input has more data rows than a session accepts
    #[error("input has {rows} data rows; at most {limit} are accepted per import")]
    #[diagnostic(
        code(propdesk::import::row_limit),
        help("split the file, or raise `max_rows` in .propdesk/config.yaml")
    )]
    TooManyRows { rows: usize, limit: usize },

    /// Required fields have no column mapped to them (blocks validation)
    #[error("required field(s) not mapped: {}", fields.join(", "))]
    #[diagnostic(
        code(propdesk::import::unmapped),
        help("map a column to each required field, e.g. --map 2=mobile")
    )]
    MissingMappings { fields: Vec<String> },

    #[error("'{field}' is not a {kind} field")]
    #[diagnostic(code(propdesk::import::field), help("run `propdesk fields {kind}` to list valid fields"))]
    UnknownField { kind: EntityKind, field: String },

    #[error("column {index} does not exist (input has {columns} columns)")]
    #[diagnostic(code(propdesk::import::column))]
    ColumnOutOfRange { index: usize, columns: usize },

    #[error("no column named '{0}'")]
    #[diagnostic(code(propdesk::import::column))]
    UnknownColumn(String),

    #[error("invalid mapping '{0}'")]
    #[diagnostic(
        code(propdesk::import::mapping),
        help("use COLUMN=FIELD, where COLUMN is a 1-based index or header text and FIELD a field key or 'skip'")
    )]
    InvalidOverride(String),

    #[error("cannot {action} while {from}")]
    #[diagnostic(code(propdesk::import::transition))]
    InvalidTransition { from: Stage, action: &'static str },

    #[error("session imports {expected} records, not {found}")]
    #[diagnostic(code(propdesk::import::kind))]
    WrongKind { expected: EntityKind, found: EntityKind },
}
