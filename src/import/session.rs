//! Import session state machine
//!
//! ```text
//! SelectingType -> Uploading -> Mapping <-> Reviewing -> Committed
//!        \______________\___________\___________\______-> Cancelled
//! ```
//!
//! Each state owns exactly the data that exists at that point, so a
//! reviewed report can never outlive the mapping it was produced from.
//! A failed step leaves the session where it was.

use std::fmt;
use std::mem;
use tracing::debug;

use crate::core::assign::RoundRobin;
use crate::core::book::Book;
use crate::core::identity::EntityKind;
use crate::import::commit::{self, CommitReport};
use crate::import::error::ImportError;
use crate::import::mapper::{self, ColumnMapping, Target};
use crate::import::parser::{self, CsvMode, ParsedTable};
use crate::import::report::{ImportSummary, ValidationReport};
use crate::import::validate::{self, BatchStamp};

/// Default cap on data rows per session
pub const DEFAULT_MAX_ROWS: usize = 5000;

/// Where a session is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SelectingType,
    Uploading,
    Mapping,
    Reviewing,
    Committed,
    Cancelled,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::SelectingType => "selecting a record type",
            Stage::Uploading => "uploading",
            Stage::Mapping => "mapping columns",
            Stage::Reviewing => "reviewing",
            Stage::Committed => "committed",
            Stage::Cancelled => "cancelled",
        })
    }
}

/// Parsing knobs for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub csv_mode: CsvMode,
    pub max_rows: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            csv_mode: CsvMode::Naive,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

#[derive(Debug)]
enum State {
    SelectingType,
    Uploading {
        kind: EntityKind,
    },
    Mapping {
        kind: EntityKind,
        table: ParsedTable,
        mapping: ColumnMapping,
    },
    Reviewing {
        kind: EntityKind,
        table: ParsedTable,
        mapping: ColumnMapping,
        report: ValidationReport,
    },
    Committed {
        kind: EntityKind,
        result: CommitReport,
    },
    Cancelled,
}

impl State {
    fn stage(&self) -> Stage {
        match self {
            State::SelectingType => Stage::SelectingType,
            State::Uploading { .. } => Stage::Uploading,
            State::Mapping { .. } => Stage::Mapping,
            State::Reviewing { .. } => Stage::Reviewing,
            State::Committed { .. } => Stage::Committed,
            State::Cancelled => Stage::Cancelled,
        }
    }
}

/// One import, from choosing a record kind to commit or cancel
#[derive(Debug)]
pub struct ImportSession {
    state: State,
    options: ImportOptions,
    stamp: BatchStamp,
}

impl ImportSession {
    pub fn new(options: ImportOptions, stamp: BatchStamp) -> Self {
        Self {
            state: State::SelectingType,
            options,
            stamp,
        }
    }

    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    pub fn stamp(&self) -> &BatchStamp {
        &self.stamp
    }

    pub fn kind(&self) -> Option<EntityKind> {
        match &self.state {
            State::Uploading { kind }
            | State::Mapping { kind, .. }
            | State::Reviewing { kind, .. }
            | State::Committed { kind, .. } => Some(*kind),
            State::SelectingType | State::Cancelled => None,
        }
    }

    /// Parsed header cells, once uploaded
    pub fn headers(&self) -> &[String] {
        match &self.state {
            State::Mapping { table, .. } | State::Reviewing { table, .. } => &table.headers,
            _ => &[],
        }
    }

    /// Parsed data rows, once uploaded
    pub fn rows(&self) -> &[Vec<String>] {
        match &self.state {
            State::Mapping { table, .. } | State::Reviewing { table, .. } => &table.rows,
            _ => &[],
        }
    }

    pub fn mapping(&self) -> Option<&ColumnMapping> {
        match &self.state {
            State::Mapping { mapping, .. } | State::Reviewing { mapping, .. } => Some(mapping),
            _ => None,
        }
    }

    /// Latest validation report; only present while reviewing
    pub fn report(&self) -> Option<&ValidationReport> {
        match &self.state {
            State::Reviewing { report, .. } => Some(report),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<ImportSummary> {
        self.report().map(ValidationReport::summary)
    }

    pub fn commit_result(&self) -> Option<CommitReport> {
        match &self.state {
            State::Committed { result, .. } => Some(*result),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> ImportError {
        ImportError::InvalidTransition {
            from: self.stage(),
            action,
        }
    }

    fn enter(&mut self, state: State) {
        debug!(from = %self.stage(), to = %state.stage(), "import session transition");
        self.state = state;
    }

    /// SelectingType -> Uploading
    pub fn select_type(&mut self, kind: EntityKind) -> Result<(), ImportError> {
        match self.state {
            State::SelectingType => {
                self.enter(State::Uploading { kind });
                Ok(())
            }
            _ => Err(self.invalid("choose a record type")),
        }
    }

    /// Uploading -> Mapping, with a suggested mapping
    ///
    /// A structural error leaves the session in Uploading.
    pub fn upload(&mut self, text: &str) -> Result<(), ImportError> {
        let State::Uploading { kind } = self.state else {
            return Err(self.invalid("upload input"));
        };
        let table = parser::parse(text, self.options.csv_mode, self.options.max_rows)?;
        let mapping = mapper::suggest(kind, &table.headers);
        self.enter(State::Mapping {
            kind,
            table,
            mapping,
        });
        Ok(())
    }

    /// Override one column's target while mapping
    pub fn remap(&mut self, column: usize, target: Target) -> Result<(), ImportError> {
        match &mut self.state {
            State::Mapping { mapping, .. } => mapping.set(column, target),
            _ => Err(self.invalid("change the column mapping")),
        }
    }

    /// Override a column from a `COLUMN=FIELD` string while mapping
    pub fn apply_override(&mut self, spec: &str) -> Result<(), ImportError> {
        let (column, target) = match &self.state {
            State::Mapping { kind, table, .. } => mapper::parse_override(*kind, &table.headers, spec)?,
            _ => return Err(self.invalid("change the column mapping")),
        };
        self.remap(column, target)
    }

    /// Mapping -> Reviewing
    ///
    /// A required field without a column leaves the session in Mapping.
    pub fn validate(&mut self, book: &Book) -> Result<ImportSummary, ImportError> {
        match mem::replace(&mut self.state, State::Cancelled) {
            State::Mapping {
                kind,
                table,
                mapping,
            } => match validate::validate(&mapping, &table.rows, book, &self.stamp) {
                Ok(report) => {
                    let summary = report.summary();
                    self.enter(State::Reviewing {
                        kind,
                        table,
                        mapping,
                        report,
                    });
                    Ok(summary)
                }
                Err(e) => {
                    self.state = State::Mapping {
                        kind,
                        table,
                        mapping,
                    };
                    Err(e)
                }
            },
            other => {
                self.state = other;
                Err(self.invalid("validate"))
            }
        }
    }

    /// Reviewing -> Mapping; the report is discarded
    pub fn back_to_mapping(&mut self) -> Result<(), ImportError> {
        match mem::replace(&mut self.state, State::Cancelled) {
            State::Reviewing {
                kind,
                table,
                mapping,
                ..
            } => {
                self.enter(State::Mapping {
                    kind,
                    table,
                    mapping,
                });
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("go back to mapping"))
            }
        }
    }

    /// Reviewing -> Committed: merge valid records into `book`
    pub fn commit(
        &mut self,
        book: &mut Book,
        assigner: &mut RoundRobin,
    ) -> Result<CommitReport, ImportError> {
        match mem::replace(&mut self.state, State::Cancelled) {
            State::Reviewing { kind, report, .. } => {
                let result = commit::commit(kind, &report.records, book, assigner);
                self.enter(State::Committed { kind, result });
                Ok(result)
            }
            other => {
                self.state = other;
                Err(self.invalid("commit"))
            }
        }
    }

    /// Any non-terminal state -> Cancelled; everything is discarded
    pub fn cancel(&mut self) -> Result<(), ImportError> {
        match self.state {
            State::Committed { .. } | State::Cancelled => Err(self.invalid("cancel")),
            _ => {
                self.enter(State::Cancelled);
                Ok(())
            }
        }
    }
}
