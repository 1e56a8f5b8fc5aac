use tracing::{debug, trace, warn};

use crate::chart::{ChartScene, ChartStyle, LegendEntry, build_chart_frame, legend_height};
use crate::core::{ChartKind, ExtractionConfig, ReferenceCode, TableSet, Viewport};
use crate::error::ChartResult;
use crate::interaction::{LegendState, ViewportState};
use crate::layout::{ChartAxes, EstimatedTextMeasure, TextMeasure};
use crate::render::{RenderFrame, Renderer};

use super::DashboardConfig;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// Holds two kinds of state. Tables, selection, reference code and chart kind
/// are inputs; every query recomputes extraction, metrics and layout from
/// them. Scroll offset and legend placement belong to the interaction layer
/// and survive recomputes, apart from re-clamping.
pub struct AnalyticsEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) extraction: ExtractionConfig,
    pub(super) tables: TableSet,
    pub(super) reference: ReferenceCode,
    pub(super) chart_kind: ChartKind,
    pub(super) style: ChartStyle,
    pub(super) measure: Box<dyn TextMeasure>,
    pub(super) scroll: ViewportState,
    pub(super) legend: LegendState,
}

impl<R: Renderer> AnalyticsEngine<R> {
    /// Creates an engine with no tables, no selection and no reference code.
    pub fn new(renderer: R, config: DashboardConfig) -> ChartResult<Self> {
        config.validate()?;
        let mut engine = Self {
            renderer,
            viewport: config.viewport,
            extraction: config.extraction,
            tables: TableSet::new(),
            reference: ReferenceCode::none(),
            chart_kind: config.initial_chart,
            style: ChartStyle::default(),
            measure: Box::new(EstimatedTextMeasure),
            scroll: ViewportState::new(),
            legend: LegendState::new(config.legend),
        };
        engine.sync_interaction();
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            chart = ?config.initial_chart,
            "analytics engine initialized"
        );
        Ok(engine)
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ChartStyle) -> ChartResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    /// Replaces the label measurer used by layout.
    pub fn set_text_measure(&mut self, measure: impl TextMeasure + 'static) {
        self.measure = Box::new(measure);
        self.sync_interaction();
    }

    #[must_use]
    pub fn extraction_config(&self) -> &ExtractionConfig {
        &self.extraction
    }

    pub fn set_extraction_config(&mut self, extraction: ExtractionConfig) {
        self.extraction = extraction;
        self.sync_interaction();
    }

    /// Builds the active chart's frame without touching the renderer.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let output = self.compute_pipeline()?;
        let entries = self.legend_entries();
        let scene = ChartScene {
            geometry: &output.geometry,
            series: &output.series,
            style: &self.style,
            scroll_offset: self.scroll.offset(),
            legend: &self.legend,
            legend_entries: &entries,
        };
        build_chart_frame(self.viewport, &scene)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        trace!(
            chart = ?self.chart_kind,
            scroll_offset = self.scroll.offset(),
            "rendered chart frame"
        );
        Ok(())
    }

    /// Renders the frame into an external cairo context, for example a
    /// drawing-area callback of the host toolkit.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Legend rows in selection order.
    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.tables
            .selected()
            .map(|selected| LegendEntry {
                name: selected.table.title().to_owned(),
                color_index: selected.color_index,
            })
            .collect()
    }

    /// Feeds fresh geometry into the interaction layer.
    ///
    /// Re-clamps the scroll offset, resizes the legend and toggles its
    /// visibility. Legend position and drag state are left alone.
    pub(super) fn sync_interaction(&mut self) {
        let geometry = match self.compute_pipeline() {
            Ok(output) => output.geometry,
            Err(err) => {
                warn!(error = %err, "skipping interaction sync");
                return;
            }
        };
        self.scroll
            .update_geometry(geometry.content_height, geometry.visible_height);
        self.legend
            .attach(self.viewport, legend_height(self.tables.selection().len()));
        self.legend
            .set_visible(!matches!(geometry.axes, ChartAxes::Empty));
    }
}
