use tracing::trace;

use crate::core::{MetricSeries, TableRuns, compute_series, extract_selected};
use crate::error::ChartResult;
use crate::layout::{ChartGeometry, compute_geometry};
use crate::render::Renderer;

use super::AnalyticsEngine;

/// One full pass over the current inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPipelineOutput {
    pub runs: Vec<TableRuns>,
    pub series: MetricSeries,
    pub geometry: ChartGeometry,
}

impl<R: Renderer> AnalyticsEngine<R> {
    /// Runs of every selected table, in selection order.
    #[must_use]
    pub fn extracted_runs(&self) -> Vec<TableRuns> {
        extract_selected(self.tables.selected(), &self.extraction)
    }

    /// Metric series of the active chart kind.
    #[must_use]
    pub fn metric_series(&self) -> MetricSeries {
        compute_series(self.chart_kind, &self.extracted_runs(), &self.reference)
    }

    pub fn geometry(&self) -> ChartResult<ChartGeometry> {
        self.compute_pipeline().map(|output| output.geometry)
    }

    /// Extraction, metrics and layout in one pass; nothing is cached.
    pub fn compute_pipeline(&self) -> ChartResult<ChartPipelineOutput> {
        let runs = self.extracted_runs();
        let series = compute_series(self.chart_kind, &runs, &self.reference);
        let geometry = compute_geometry(
            self.chart_kind,
            &series,
            runs.len(),
            self.viewport,
            self.measure.as_ref(),
        )?;
        trace!(
            chart = ?self.chart_kind,
            tables = runs.len(),
            has_data = series.has_data(),
            content_height = geometry.content_height,
            "computed chart pipeline"
        );
        Ok(ChartPipelineOutput {
            runs,
            series,
            geometry,
        })
    }
}
