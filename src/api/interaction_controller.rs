use tracing::{debug, trace};

use crate::core::{ChartKind, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{LegendState, ViewportState};
use crate::render::Renderer;

use super::AnalyticsEngine;

impl<R: Renderer> AnalyticsEngine<R> {
    #[must_use]
    pub fn chart_kind(&self) -> ChartKind {
        self.chart_kind
    }

    /// Switches the active chart; the scroll offset is only re-clamped.
    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        if self.chart_kind == kind {
            return;
        }
        debug!(from = ?self.chart_kind, to = ?kind, "switch chart kind");
        self.chart_kind = kind;
        self.sync_interaction();
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        self.sync_interaction();
        Ok(())
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.scroll
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll.offset()
    }

    /// Wheel input; ignored while the content fits.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        let changed = self.scroll.scroll_by(delta);
        if changed {
            trace!(offset = self.scroll.offset(), delta, "scrolled chart");
        }
        changed
    }

    #[must_use]
    pub fn legend_state(&self) -> LegendState {
        self.legend
    }

    /// Pointer press in viewport coordinates; returns whether a legend drag
    /// started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let started = self.legend.pointer_down(x, y);
        if started {
            trace!(x, y, "legend drag started");
        }
        started
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.legend.pointer_move(x, y)
    }

    pub fn pointer_up(&mut self) -> bool {
        let ended = self.legend.pointer_up();
        if ended {
            let (x, y) = self.legend.position();
            trace!(x, y, "legend drag ended");
        }
        ended
    }
}
