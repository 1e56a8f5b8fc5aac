//! Chart geometry, computed independently of drawing.
//!
//! All coordinates here live in content space: `y = 0` is the top of the full
//! scrollable content, before any scroll offset is applied.

mod text_measure;

pub use text_measure::{EstimatedTextMeasure, TextMeasure};

use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, LinearScale, MetricSeries, Viewport, ceil_to_multiple};
use crate::error::{ChartError, ChartResult};

/// Floor for content height of every chart kind.
pub const MIN_CONTENT_HEIGHT_PX: f64 = 400.0;
/// Base height reserved for axes and titles before per-series growth.
pub const BASE_CONTENT_HEIGHT_PX: f64 = 200.0;
pub const SERIES_ROW_HEIGHT_PX: f64 = 25.0;
pub const SERIES_BLOCK_PADDING_PX: f64 = 30.0;
pub const MATCH_BAR_HEIGHT_PX: f64 = 30.0;
pub const MATCH_BAR_SPACING_PX: f64 = 10.0;
pub const MATCH_BLOCK_PADDING_PX: f64 = 100.0;
pub const PLOT_PADDING_PX: f64 = 60.0;
/// Gap between the y-axis and the first run position.
pub const X_AXIS_INSET_PX: f64 = 20.0;
pub const RUN_GRID_DIVISIONS: u32 = 8;
pub const MATCH_GRID_DIVISIONS: u32 = 10;
/// Time axis ceilings snap up to this step.
pub const TIME_CEILING_STEP: f64 = 10.0;
pub const SCORE_CEILING: f64 = 100.0;
/// Match axis never spans fewer runs than this.
pub const MATCH_MIN_AXIS_RUNS: u32 = 10;
pub const MATCH_LABEL_FONT_PX: f64 = 13.0;
pub const MATCH_LABEL_GAP_PX: f64 = 20.0;

/// Total content height of a chart kind for `series_count` selected tables.
///
/// Non-decreasing in `series_count` and never below [`MIN_CONTENT_HEIGHT_PX`].
#[must_use]
pub fn content_height(kind: ChartKind, series_count: usize) -> f64 {
    let count = series_count as f64;
    let grown = match kind {
        ChartKind::TimeBetweenRuns | ChartKind::SimilarityToReference => {
            BASE_CONTENT_HEIGHT_PX + count * SERIES_ROW_HEIGHT_PX + SERIES_BLOCK_PADDING_PX
        }
        ChartKind::FirstMatch => {
            BASE_CONTENT_HEIGHT_PX
                + count * (MATCH_BAR_HEIGHT_PX + MATCH_BAR_SPACING_PX)
                + MATCH_BLOCK_PADDING_PX
        }
    };
    grown.max(MIN_CONTENT_HEIGHT_PX)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Padding {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }
}

/// Plot rectangle inside the padding, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}

/// Axis mapping for the run-indexed line charts (time and score).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunAxes {
    pub x: LinearScale,
    pub y: LinearScale,
    pub max_run: u32,
    pub y_max: f64,
    pub grid_divisions: u32,
}

/// Axis mapping and bar band for the first-match chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchAxes {
    pub x: LinearScale,
    pub axis_max: u32,
    pub bar_height: f64,
    pub bar_spacing: f64,
    pub grid_divisions: u32,
}

impl MatchAxes {
    /// Top edge of the bar slot at `index`, in content coordinates.
    #[must_use]
    pub fn slot_top(&self, plot: PlotArea, index: usize) -> f64 {
        plot.top + index as f64 * (self.bar_height + self.bar_spacing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartAxes {
    /// No drawable data; the chart shows an advisory only.
    Empty,
    Runs(RunAxes),
    Match(MatchAxes),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub kind: ChartKind,
    pub width: f64,
    pub content_height: f64,
    pub visible_height: f64,
    pub padding: Padding,
    pub plot: PlotArea,
    pub axes: ChartAxes,
}

impl ChartGeometry {
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.visible_height
    }
}

/// Computes geometry for `series` drawn into `viewport`.
///
/// `series_count` is the number of selected tables, which drives the content
/// height even when some of them contribute no points.
pub fn compute_geometry(
    kind: ChartKind,
    series: &MetricSeries,
    series_count: usize,
    viewport: Viewport,
    measure: &dyn TextMeasure,
) -> ChartResult<ChartGeometry> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let width = viewport.width_px();
    let content_height = content_height(kind, series_count);
    let mut padding = Padding::uniform(PLOT_PADDING_PX);

    if let MetricSeries::Matches(results) = series {
        let widest_label = results
            .iter()
            .map(|result| measure.text_width_px(&result.table_title, MATCH_LABEL_FONT_PX))
            .fold(0.0, f64::max);
        padding.left = PLOT_PADDING_PX.max(widest_label + MATCH_LABEL_GAP_PX);
    }

    let plot = PlotArea {
        left: padding.left,
        top: padding.top,
        right: width - padding.right,
        bottom: content_height - padding.bottom,
    };

    let axes = if series.has_data() {
        match series {
            MetricSeries::TimeDeltas(_) | MetricSeries::Scores(_) => {
                ChartAxes::Runs(run_axes(series, plot)?)
            }
            MetricSeries::Matches(results) => ChartAxes::Match(match_axes(series, results.len(), plot)?),
            MetricSeries::ReferenceUnavailable => ChartAxes::Empty,
        }
    } else {
        ChartAxes::Empty
    };

    Ok(ChartGeometry {
        kind,
        width,
        content_height,
        visible_height: viewport.height_px(),
        padding,
        plot,
        axes,
    })
}

fn run_axes(series: &MetricSeries, plot: PlotArea) -> ChartResult<RunAxes> {
    let max_run = series.max_run().unwrap_or(1).max(1);
    let y_max = match series {
        MetricSeries::TimeDeltas(tables) => {
            let observed = tables
                .iter()
                .flat_map(|table| table.points.iter().map(|point| point.time_diff))
                .fold(0.0, f64::max);
            ceil_to_multiple(observed, TIME_CEILING_STEP)
        }
        _ => SCORE_CEILING,
    };

    // Runs sit at (run - 1) / max_run of the inset width, so the last run
    // never touches the right edge.
    let x = LinearScale::new(
        1.0,
        f64::from(max_run) + 1.0,
        plot.left + X_AXIS_INSET_PX,
        plot.right,
    )?;
    let y = LinearScale::new(0.0, y_max, plot.bottom, plot.top)?;

    Ok(RunAxes {
        x,
        y,
        max_run,
        y_max,
        grid_divisions: RUN_GRID_DIVISIONS,
    })
}

fn match_axes(series: &MetricSeries, rows: usize, plot: PlotArea) -> ChartResult<MatchAxes> {
    let axis_max = series
        .max_run()
        .unwrap_or(0)
        .max(MATCH_MIN_AXIS_RUNS);
    let bar_height = MATCH_BAR_HEIGHT_PX.min(plot.height() / (rows as f64 + 1.0));
    let x = LinearScale::new(0.0, f64::from(axis_max), plot.left, plot.right)?;

    Ok(MatchAxes {
        x,
        axis_max,
        bar_height,
        bar_spacing: MATCH_BAR_SPACING_PX,
        grid_divisions: MATCH_GRID_DIVISIONS,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        ChartAxes, EstimatedTextMeasure, MIN_CONTENT_HEIGHT_PX, PLOT_PADDING_PX, TextMeasure,
        compute_geometry, content_height,
    };
    use crate::core::{
        ChartKind, MatchResult, MetricSeries, ScorePoint, TableSeries, TimeDeltaPoint, Viewport,
    };

    fn time_series(diffs: &[f64]) -> MetricSeries {
        MetricSeries::TimeDeltas(vec![TableSeries {
            table_title: "rover".to_owned(),
            color_index: 0,
            points: diffs
                .iter()
                .enumerate()
                .map(|(i, diff)| TimeDeltaPoint {
                    from_run: i as u32 + 1,
                    to_run: i as u32 + 2,
                    time_diff: *diff,
                })
                .collect(),
        }])
    }

    #[test]
    fn content_height_has_floor_and_grows_per_series() {
        assert_eq!(content_height(ChartKind::TimeBetweenRuns, 0), MIN_CONTENT_HEIGHT_PX);
        assert_eq!(content_height(ChartKind::TimeBetweenRuns, 10), 480.0);
        assert_eq!(content_height(ChartKind::FirstMatch, 3), 420.0);
        assert_eq!(content_height(ChartKind::FirstMatch, 4), 460.0);
    }

    #[test]
    fn time_ceiling_rounds_up_to_ten() {
        let geometry = compute_geometry(
            ChartKind::TimeBetweenRuns,
            &time_series(&[3.5, 12.2]),
            1,
            Viewport::new(800, 400),
            &EstimatedTextMeasure,
        )
        .expect("geometry");

        let ChartAxes::Runs(axes) = geometry.axes else {
            panic!("expected run axes");
        };
        assert_eq!(axes.y_max, 20.0);
        assert_eq!(axes.max_run, 2);
        assert_eq!(axes.y.to_pixel(0.0).expect("px"), geometry.plot.bottom);
        assert_eq!(axes.y.to_pixel(20.0).expect("px"), geometry.plot.top);
    }

    #[test]
    fn score_ceiling_is_fixed() {
        let series = MetricSeries::Scores(vec![TableSeries {
            table_title: "rover".to_owned(),
            color_index: 0,
            points: vec![ScorePoint {
                run_number: 1,
                score: 20.0,
            }],
        }]);
        let geometry = compute_geometry(
            ChartKind::SimilarityToReference,
            &series,
            1,
            Viewport::new(800, 400),
            &EstimatedTextMeasure,
        )
        .expect("geometry");
        let ChartAxes::Runs(axes) = geometry.axes else {
            panic!("expected run axes");
        };
        assert_eq!(axes.y_max, 100.0);
    }

    #[test]
    fn match_axis_has_minimum_span_and_label_padding() {
        let long_name = "a-very-long-student-team-name-from-period-three.csv";
        let series = MetricSeries::Matches(vec![
            MatchResult {
                table_title: long_name.to_owned(),
                color_index: 0,
                match_run: None,
            },
            MatchResult {
                table_title: "b".to_owned(),
                color_index: 1,
                match_run: Some(3),
            },
        ]);
        let geometry = compute_geometry(
            ChartKind::FirstMatch,
            &series,
            2,
            Viewport::new(900, 400),
            &EstimatedTextMeasure,
        )
        .expect("geometry");

        let ChartAxes::Match(axes) = geometry.axes else {
            panic!("expected match axes");
        };
        assert_eq!(axes.axis_max, 10);
        let label_width = EstimatedTextMeasure.text_width_px(long_name, 13.0);
        assert!(geometry.padding.left >= label_width);
        assert!(geometry.padding.left > PLOT_PADDING_PX);
    }

    #[test]
    fn missing_reference_yields_empty_axes() {
        let geometry = compute_geometry(
            ChartKind::FirstMatch,
            &MetricSeries::ReferenceUnavailable,
            2,
            Viewport::new(900, 400),
            &EstimatedTextMeasure,
        )
        .expect("geometry");
        assert_eq!(geometry.axes, ChartAxes::Empty);
    }
}
