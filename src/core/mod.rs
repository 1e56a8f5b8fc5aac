pub mod intake;
pub mod metrics;
pub mod reference;
pub mod runs;
pub mod scale;
pub mod table;
pub mod types;

pub use intake::{TableIntake, parse_csv_table};
pub use metrics::{
    MatchResult, MetricSeries, ScorePoint, TableSeries, TimeDeltaPoint, compute_series,
    first_match, score_points, similarity_score, time_deltas,
};
pub use reference::{Command, ReferenceCode};
pub use runs::{
    ColumnContract, CommandSequence, ExtractionConfig, ExtractionIssue, RunRecord, TableRuns,
    extract_runs, extract_selected, tokenize_commands,
};
pub use scale::{LinearScale, ceil_to_multiple};
pub use table::{Row, SelectedTable, Table, TableSet};
pub use types::{ChartKind, Viewport};
