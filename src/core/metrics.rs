//! Per-run metric reducers.
//!
//! Each reducer works on one table's runs at a time, so a malformed table can
//! only ever empty its own series.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::reference::ReferenceCode;
use super::runs::{RunRecord, TableRuns};
use super::types::ChartKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeDeltaPoint {
    /// Earlier run of the pair; used as the horizontal position.
    pub from_run: u32,
    /// Later run of the pair (always >= 2).
    pub to_run: u32,
    pub time_diff: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub run_number: u32,
    pub score: f64,
}

/// Per-table series shared by all chart kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSeries<P> {
    pub table_title: String,
    pub color_index: usize,
    pub points: Vec<P>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub table_title: String,
    pub color_index: usize,
    /// First run reproducing the reference exactly, `None` when no run does.
    pub match_run: Option<u32>,
}

/// Metric series for the active chart kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetricSeries {
    TimeDeltas(Vec<TableSeries<TimeDeltaPoint>>),
    Scores(Vec<TableSeries<ScorePoint>>),
    Matches(Vec<MatchResult>),
    /// Reference code is required by the chart kind but not set.
    ReferenceUnavailable,
}

impl MetricSeries {
    /// Whether at least one drawable point or row exists.
    #[must_use]
    pub fn has_data(&self) -> bool {
        match self {
            MetricSeries::TimeDeltas(series) => series.iter().any(|s| !s.points.is_empty()),
            MetricSeries::Scores(series) => series.iter().any(|s| !s.points.is_empty()),
            MetricSeries::Matches(results) => !results.is_empty(),
            MetricSeries::ReferenceUnavailable => false,
        }
    }

    /// Highest run number placed on the horizontal axis, if any.
    #[must_use]
    pub fn max_run(&self) -> Option<u32> {
        match self {
            MetricSeries::TimeDeltas(series) => series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.from_run))
                .max(),
            MetricSeries::Scores(series) => series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.run_number))
                .max(),
            MetricSeries::Matches(results) => results.iter().filter_map(|r| r.match_run).max(),
            MetricSeries::ReferenceUnavailable => None,
        }
    }
}

/// Gaps between consecutive valid timestamps of one table.
///
/// Absolute differences are used so out-of-order clock samples still produce
/// non-negative gaps. Runs without a timestamp are skipped but keep their
/// numbering. Gaps that overflow to infinity are dropped.
#[must_use]
pub fn time_deltas(runs: &[RunRecord]) -> Vec<TimeDeltaPoint> {
    let timed: Vec<(u32, f64)> = runs
        .iter()
        .filter_map(|run| run.timestamp.map(|t| (run.run_number, t)))
        .collect();

    timed
        .windows(2)
        .filter_map(|pair| {
            let (from_run, from_time) = pair[0];
            let (to_run, to_time) = pair[1];
            let time_diff = (to_time - from_time).abs();
            if !time_diff.is_finite() {
                warn!(from_run, to_run, "time gap is not finite; pair skipped");
                return None;
            }
            Some(TimeDeltaPoint {
                from_run,
                to_run,
                time_diff,
            })
        })
        .collect()
}

/// Positional similarity in percent.
///
/// Positions past the shorter sequence count as mismatches, so length
/// differences always lower the score. An empty side scores 0.
#[must_use]
pub fn similarity_score<A, B>(student: &[A], reference: &[B]) -> f64
where
    A: PartialEq<B>,
{
    let longest = student.len().max(reference.len());
    if student.is_empty() || reference.is_empty() {
        return 0.0;
    }

    let matching = student
        .iter()
        .zip(reference)
        .filter(|(left, right)| *left == *right)
        .count();

    (100.0 * matching as f64 / longest as f64).clamp(0.0, 100.0)
}

fn reference_tokens(reference: &ReferenceCode) -> Vec<&'static str> {
    reference
        .commands()
        .iter()
        .map(|command| command.as_str())
        .collect()
}

/// Similarity score for every run of one table.
#[must_use]
pub fn score_points(runs: &[RunRecord], reference: &ReferenceCode) -> Vec<ScorePoint> {
    let tokens = reference_tokens(reference);
    runs.iter()
        .map(|run| ScorePoint {
            run_number: run.run_number,
            score: similarity_score(&run.commands, &tokens),
        })
        .collect()
}

/// Run number of the first run equal to the reference, element by element.
#[must_use]
pub fn first_match(runs: &[RunRecord], reference: &ReferenceCode) -> Option<u32> {
    let tokens = reference_tokens(reference);
    runs.iter()
        .find(|run| {
            run.commands.len() == tokens.len()
                && run.commands.iter().zip(&tokens).all(|(a, b)| a == b)
        })
        .map(|run| run.run_number)
}

/// Reduces extracted runs into the series of `kind`.
#[must_use]
pub fn compute_series(
    kind: ChartKind,
    tables: &[TableRuns],
    reference: &ReferenceCode,
) -> MetricSeries {
    if kind.requires_reference() && !reference.is_set() {
        return MetricSeries::ReferenceUnavailable;
    }

    match kind {
        ChartKind::TimeBetweenRuns => MetricSeries::TimeDeltas(
            tables
                .iter()
                .map(|table| TableSeries {
                    table_title: table.title.clone(),
                    color_index: table.color_index,
                    points: time_deltas(&table.runs),
                })
                .collect(),
        ),
        ChartKind::SimilarityToReference => MetricSeries::Scores(
            tables
                .iter()
                .map(|table| TableSeries {
                    table_title: table.title.clone(),
                    color_index: table.color_index,
                    points: score_points(&table.runs, reference),
                })
                .collect(),
        ),
        ChartKind::FirstMatch => MetricSeries::Matches(
            tables
                .iter()
                .map(|table| MatchResult {
                    table_title: table.title.clone(),
                    color_index: table.color_index,
                    match_run: first_match(&table.runs, reference),
                })
                .collect(),
        ),
    }
}
