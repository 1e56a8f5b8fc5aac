use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, ExtractionIssue, MetricSeries, ReferenceCode, Viewport};
use crate::error::ChartResult;
use crate::interaction::{LegendState, ViewportState};
use crate::layout::ChartGeometry;
use crate::render::Renderer;

use super::AnalyticsEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub chart_kind: ChartKind,
    pub selection: Vec<usize>,
    pub reference: ReferenceCode,
    /// Degradation diagnostics keyed by table title, in selection order.
    pub extraction_issues: IndexMap<String, Vec<ExtractionIssue>>,
    pub series: MetricSeries,
    pub geometry: ChartGeometry,
    pub scroll: ViewportState,
    pub legend: LegendState,
}

impl<R: Renderer> AnalyticsEngine<R> {
    pub fn snapshot(&self) -> ChartResult<EngineSnapshot> {
        let output = self.compute_pipeline()?;
        let extraction_issues = output
            .runs
            .iter()
            .map(|table| (table.title.clone(), table.issues.clone()))
            .collect();
        Ok(EngineSnapshot {
            viewport: self.viewport,
            chart_kind: self.chart_kind,
            selection: self.tables.selection().to_vec(),
            reference: self.reference.clone(),
            extraction_issues,
            series: output.series,
            geometry: output.geometry,
            scroll: self.scroll,
            legend: self.legend,
        })
    }
}
