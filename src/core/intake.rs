//! CSV intake for device run-logs.
//!
//! The device export carries a `Language` column that is meaningless for
//! analytics; it is dropped on intake. Repeated header names are suffixed
//! (`Program`, `Program_1`, ...) so the upload still loads.

use std::io::Read;

use indexmap::IndexSet;
use tracing::{debug, warn};

use super::table::{Table, TableSet};
use crate::error::{ChartError, ChartResult};

pub const DROPPED_COLUMN: &str = "Language";

/// Parses CSV text with a header row into a [`Table`] titled `title`.
pub fn parse_csv_table(title: impl Into<String>, reader: impl Read) -> ChartResult<Table> {
    let title = title.into();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let raw_headers = csv_reader
        .headers()
        .map_err(|e| ChartError::Intake(format!("failed to read header of `{title}`: {e}")))?
        .clone();
    let kept: Vec<usize> = raw_headers
        .iter()
        .enumerate()
        .filter(|(_, header)| *header != DROPPED_COLUMN)
        .map(|(index, _)| index)
        .collect();
    let headers = dedupe_headers(
        &title,
        kept.iter().map(|&index| raw_headers[index].to_owned()),
    );

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record
            .map_err(|e| ChartError::Intake(format!("failed to read row of `{title}`: {e}")))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(
            kept.iter()
                .map(|&index| record.get(index).unwrap_or_default().to_owned())
                .collect(),
        );
    }

    debug!(
        title = title.as_str(),
        columns = headers.len(),
        rows = rows.len(),
        "parsed csv table"
    );
    Table::new(title, headers, rows)
}

fn dedupe_headers(title: &str, headers: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::new();
    for header in headers {
        if !seen.contains(&header) {
            seen.insert(header);
            continue;
        }
        let mut suffix = 1usize;
        let mut renamed = format!("{header}_{suffix}");
        while seen.contains(&renamed) {
            suffix += 1;
            renamed = format!("{header}_{suffix}");
        }
        warn!(
            table = title,
            header = header.as_str(),
            renamed = renamed.as_str(),
            "duplicate header renamed"
        );
        seen.insert(renamed);
    }
    seen.into_iter().collect()
}

/// Narrow file-intake surface owned by the table manager.
pub trait TableIntake {
    /// Parses `reader` and appends the table, returning its index.
    fn intake_csv(&mut self, title: &str, reader: impl Read) -> ChartResult<usize>;
}

impl TableIntake for TableSet {
    fn intake_csv(&mut self, title: &str, reader: impl Read) -> ChartResult<usize> {
        let table = parse_csv_table(title, reader)?;
        Ok(self.push(table))
    }
}
