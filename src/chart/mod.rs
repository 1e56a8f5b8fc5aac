//! Per-kind chart painters.
//!
//! Painters turn geometry and metric series into backend-agnostic primitives.
//! They never touch interaction state; scroll and legend placement arrive as
//! plain values.

mod canvas;
mod legend;
mod match_chart;
mod score_chart;
mod style;
mod time_chart;

pub use canvas::ScrolledCanvas;
pub use legend::{LEGEND_HEADER, LegendEntry, legend_height, paint_legend};
pub use match_chart::{MatchChart, NO_MATCH_LABEL};
pub use score_chart::ScoreChart;
pub use style::{ChartStyle, TABLE_PALETTE};
pub use time_chart::TimeChart;

use tracing::trace;

use crate::core::{ChartKind, MetricSeries, Viewport};
use crate::error::ChartResult;
use crate::interaction::LegendState;
use crate::layout::{ChartAxes, ChartGeometry};
use crate::render::{CanvasLayerKind, RenderFrame, TextHAlign, TextPrimitive, TextVAlign};

/// Drawing strategy of one chart kind.
pub trait ChartPainter {
    fn kind(&self) -> ChartKind;

    /// Advisory shown instead of the chart when nothing is drawable.
    fn empty_message(&self, series: &MetricSeries) -> &'static str;

    /// Paints grid, axes, series and labels in content coordinates.
    fn paint(
        &self,
        canvas: &mut ScrolledCanvas<'_>,
        geometry: &ChartGeometry,
        series: &MetricSeries,
        style: &ChartStyle,
    ) -> ChartResult<()>;
}

#[must_use]
pub fn painter_for(kind: ChartKind) -> &'static dyn ChartPainter {
    match kind {
        ChartKind::TimeBetweenRuns => &TimeChart,
        ChartKind::SimilarityToReference => &ScoreChart,
        ChartKind::FirstMatch => &MatchChart,
    }
}

/// Everything needed to paint one frame of the active chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartScene<'a> {
    pub geometry: &'a ChartGeometry,
    pub series: &'a MetricSeries,
    pub style: &'a ChartStyle,
    pub scroll_offset: f64,
    pub legend: &'a LegendState,
    pub legend_entries: &'a [LegendEntry],
}

impl ChartScene<'_> {
    /// Whether anything besides the advisory message will be drawn.
    #[must_use]
    pub fn has_renderable_series(&self) -> bool {
        !matches!(self.geometry.axes, ChartAxes::Empty)
    }
}

/// Builds the full frame for `scene`: either the chart plus legend, or the
/// centered advisory of the empty state.
pub fn build_chart_frame(viewport: Viewport, scene: &ChartScene<'_>) -> ChartResult<RenderFrame> {
    let painter = painter_for(scene.geometry.kind);
    let mut frame = RenderFrame::new(viewport);

    if !scene.has_renderable_series() {
        frame.push_text(
            CanvasLayerKind::Labels,
            TextPrimitive::new(
                painter.empty_message(scene.series),
                viewport.width_px() / 2.0,
                viewport.height_px() / 2.0,
                scene.style.message_font_px,
                scene.style.text_color,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle),
        );
        trace!(kind = ?painter.kind(), "built empty-state frame");
        return Ok(frame);
    }

    {
        let mut canvas = ScrolledCanvas::new(&mut frame, scene.scroll_offset);
        painter.paint(&mut canvas, scene.geometry, scene.series, scene.style)?;
    }
    if scene.legend.is_visible() {
        paint_legend(&mut frame, scene.legend, scene.legend_entries, scene.style);
    }

    trace!(
        kind = ?painter.kind(),
        lines = frame.lines().count(),
        texts = frame.texts().count(),
        scroll_offset = scene.scroll_offset,
        "built chart frame"
    );
    Ok(frame)
}
