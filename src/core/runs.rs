//! Run extraction from raw run-log tables.
//!
//! A run is one row whose marker-column value equals the configured sentinel.
//! Columns are located per table:
//! - marker column: first header containing the marker token, case-insensitive
//! - time column: header equal to the configured time header
//! - command column: the header immediately after the marker column
//!
//! The command-column adjacency is a layout contract of the device export. It
//! is checked here and degrades to empty command sequences when broken.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use super::table::{SelectedTable, Table};

/// Lowercase command tokens of one run, in program order.
pub type CommandSequence = SmallVec<[String; 8]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_marker_token")]
    pub marker_token: String,
    #[serde(default = "default_marker_sentinel")]
    pub marker_sentinel: String,
    #[serde(default = "default_time_header")]
    pub time_header: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            marker_token: default_marker_token(),
            marker_sentinel: default_marker_sentinel(),
            time_header: default_time_header(),
        }
    }
}

fn default_marker_token() -> String {
    "button".to_owned()
}

fn default_marker_sentinel() -> String {
    "Play".to_owned()
}

fn default_time_header() -> String {
    "Time (seconds)".to_owned()
}

/// Resolved column names for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnContract {
    pub marker: String,
    pub time: Option<String>,
    pub command: Option<String>,
}

impl ColumnContract {
    /// Resolves columns for `table`; `None` when no marker column exists.
    #[must_use]
    pub fn resolve(table: &Table, config: &ExtractionConfig) -> Option<Self> {
        let token = config.marker_token.to_lowercase();
        let marker_index = table
            .headers()
            .iter()
            .position(|header| header.to_lowercase().contains(&token))?;
        let headers = table.headers();

        Some(Self {
            marker: headers[marker_index].clone(),
            time: table
                .header_position(&config.time_header)
                .map(|index| headers[index].clone()),
            command: headers.get(marker_index + 1).cloned(),
        })
    }
}

/// Local degradation noticed while extracting one table. Never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExtractionIssue {
    MissingMarkerColumn,
    MissingTimeColumn,
    MissingCommandColumn,
    UnparsableTime { run_number: u32, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub table_index: usize,
    /// 1-based position among marker rows of the table.
    pub run_number: u32,
    /// Elapsed seconds; `None` when the time cell is absent or not numeric.
    pub timestamp: Option<f64>,
    pub commands: CommandSequence,
}

/// All runs of one selected table plus the issues met while reading it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRuns {
    pub table_index: usize,
    pub color_index: usize,
    pub title: String,
    pub runs: Vec<RunRecord>,
    pub issues: Vec<ExtractionIssue>,
}

impl TableRuns {
    #[must_use]
    pub fn valid_timestamps(&self) -> usize {
        self.runs.iter().filter(|run| run.timestamp.is_some()).count()
    }
}

/// Splits a program cell into lowercase tokens.
#[must_use]
pub fn tokenize_commands(cell: &str) -> CommandSequence {
    cell.split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Reads the longest leading decimal number of `cell`, so unit suffixes such
/// as `"12.5 s"` still yield a time. Non-finite values are rejected.
fn parse_timestamp(cell: &str) -> Option<f64> {
    let cell = cell.trim_start();
    let candidate_len = cell
        .bytes()
        .take_while(|byte| {
            byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E')
        })
        .count();

    (1..=candidate_len)
        .rev()
        .find_map(|len| cell[..len].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Extracts the ordered runs of one table.
#[must_use]
pub fn extract_runs(table: &Table, table_index: usize, config: &ExtractionConfig) -> TableRuns {
    let mut extraction = TableRuns {
        table_index,
        color_index: 0,
        title: table.title().to_owned(),
        runs: Vec::new(),
        issues: Vec::new(),
    };

    let Some(columns) = ColumnContract::resolve(table, config) else {
        warn!(table = table.title(), "no marker column; table contributes no runs");
        extraction.issues.push(ExtractionIssue::MissingMarkerColumn);
        return extraction;
    };
    if columns.time.is_none() {
        warn!(
            table = table.title(),
            header = config.time_header.as_str(),
            "time column missing"
        );
        extraction.issues.push(ExtractionIssue::MissingTimeColumn);
    }
    if columns.command.is_none() {
        warn!(table = table.title(), "no column after marker column");
        extraction.issues.push(ExtractionIssue::MissingCommandColumn);
    }

    let mut run_number = 0u32;
    for row in table.rows() {
        if row.get(&columns.marker) != Some(config.marker_sentinel.as_str()) {
            continue;
        }
        run_number += 1;

        let timestamp = match columns.time.as_deref().and_then(|header| row.get(header)) {
            Some(cell) => {
                let parsed = parse_timestamp(cell);
                if parsed.is_none() {
                    extraction.issues.push(ExtractionIssue::UnparsableTime {
                        run_number,
                        value: cell.to_owned(),
                    });
                }
                parsed
            }
            None => None,
        };
        let commands = columns
            .command
            .as_deref()
            .and_then(|header| row.get(header))
            .map(tokenize_commands)
            .unwrap_or_default();

        extraction.runs.push(RunRecord {
            table_index,
            run_number,
            timestamp,
            commands,
        });
    }

    extraction
}

/// Extracts every selected table independently, in selection order.
pub fn extract_selected<'a>(
    selected: impl IntoIterator<Item = SelectedTable<'a>>,
    config: &ExtractionConfig,
) -> Vec<TableRuns> {
    selected
        .into_iter()
        .map(|entry| {
            let mut runs = extract_runs(entry.table, entry.table_index, config);
            runs.color_index = entry.color_index;
            runs
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        ExtractionConfig, ExtractionIssue, extract_runs, parse_timestamp, tokenize_commands,
    };
    use crate::core::Table;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| (*cell).to_owned()).collect()
    }

    #[test]
    fn counts_runs_across_unparsable_times() {
        let table = Table::new(
            "rover",
            headers(&["Time (seconds)", "Button Pressed", "Program"]),
            vec![
                row(&["1.0", "Play", "forward left"]),
                row(&["1.5", "Stop", ""]),
                row(&["oops", "Play", "FORWARD"]),
                row(&["4.0", "Play", ""]),
            ],
        )
        .expect("table");

        let runs = extract_runs(&table, 0, &ExtractionConfig::default());

        let numbers: Vec<_> = runs.runs.iter().map(|run| run.run_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(runs.runs[1].timestamp, None);
        assert_eq!(runs.runs[1].commands.as_slice(), &["forward".to_owned()]);
        assert!(runs.runs[2].commands.is_empty());
        assert_eq!(runs.valid_timestamps(), 2);
        assert_eq!(
            runs.issues,
            vec![ExtractionIssue::UnparsableTime {
                run_number: 2,
                value: "oops".to_owned()
            }]
        );
    }

    #[test]
    fn missing_marker_column_yields_no_runs() {
        let table = Table::new(
            "plain",
            headers(&["Time (seconds)", "Program"]),
            vec![row(&["1.0", "forward"])],
        )
        .expect("table");

        let runs = extract_runs(&table, 3, &ExtractionConfig::default());
        assert!(runs.runs.is_empty());
        assert_eq!(runs.issues, vec![ExtractionIssue::MissingMarkerColumn]);
    }

    #[test]
    fn marker_as_last_column_degrades_to_empty_programs() {
        let table = Table::new(
            "edge",
            headers(&["Time (seconds)", "BUTTON"]),
            vec![row(&["2.0", "Play"])],
        )
        .expect("table");

        let runs = extract_runs(&table, 0, &ExtractionConfig::default());
        assert_eq!(runs.runs.len(), 1);
        assert!(runs.runs[0].commands.is_empty());
        assert!(runs.issues.contains(&ExtractionIssue::MissingCommandColumn));
    }

    #[test]
    fn timestamps_accept_leading_number_with_suffix() {
        assert_eq!(parse_timestamp(" 12.5 s"), Some(12.5));
        assert_eq!(parse_timestamp("3e2ms"), Some(300.0));
        assert_eq!(parse_timestamp("7.25"), Some(7.25));
        assert_eq!(parse_timestamp("4e"), Some(4.0));
        assert_eq!(parse_timestamp("s 12"), None);
        assert_eq!(parse_timestamp("-"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("1e400"), None);
    }

    #[test]
    fn tokenizer_lowercases_and_ignores_extra_spaces() {
        let tokens = tokenize_commands("  Forward   RIGHT left ");
        assert_eq!(tokens.as_slice(), &["forward", "right", "left"]);
    }
}
