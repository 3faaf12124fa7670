//! Delimited text -> header row + data rows

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::import::error::ImportError;

/// How cells are split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvMode {
    /// Split every line on ',' and trim. A comma inside quotes still splits.
    #[default]
    Naive,
    /// RFC 4180: double-quoted fields may contain commas, quotes ("") and newlines
    Rfc4180,
}

impl std::str::FromStr for CsvMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "naive" => Ok(CsvMode::Naive),
            "rfc4180" | "strict" => Ok(CsvMode::Rfc4180),
            _ => Err(format!("Unknown CSV mode: {}. Use naive or rfc4180", s)),
        }
    }
}

/// Parsed input: the header cells and every non-blank data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    /// Rows may be shorter or longer than `headers`
    pub rows: Vec<Vec<String>>,
}

/// True for a row with no cells or a single empty cell
pub fn is_blank_row(cells: &[String]) -> bool {
    match cells {
        [] => true,
        [only] => only.is_empty(),
        _ => false,
    }
}

/// Parse raw text into a table
///
/// Blank lines are dropped before anything else, so the header is the first
/// non-blank line. Fewer than two remaining lines is a structural error, as
/// is more than `max_rows` data rows.
pub fn parse(text: &str, mode: CsvMode, max_rows: usize) -> Result<ParsedTable, ImportError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = match mode {
        CsvMode::Naive => split_naive(text),
        CsvMode::Rfc4180 => split_rfc4180(text)?,
    };

    if lines.len() < 2 {
        return Err(ImportError::Structural(
            "input needs a header line and at least one data row".to_string(),
        ));
    }

    let rows = lines.split_off(1);
    let headers = lines.pop().unwrap_or_default();

    if rows.len() > max_rows {
        return Err(ImportError::TooManyRows {
            rows: rows.len(),
            limit: max_rows,
        });
    }

    debug!(
        ?mode,
        columns = headers.len(),
        rows = rows.len(),
        "parsed import input"
    );

    Ok(ParsedTable { headers, rows })
}

fn split_naive(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').map(|cell| cell.trim().to_string()).collect())
        .collect()
}

fn split_rfc4180(text: &str) -> Result<Vec<Vec<String>>, ImportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut lines = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            ImportError::Structural(format!("malformed CSV at record {}: {}", idx + 1, e))
        })?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if !is_blank_row(&cells) {
            lines.push(cells);
        }
    }
    Ok(lines)
}
