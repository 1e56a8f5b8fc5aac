use serde::{Deserialize, Serialize};
use tracing::trace;

/// Whether the chart content overflows the visible surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    /// Content fits; the offset is pinned at zero and wheel input is ignored.
    #[default]
    Fits,
    Scrollable,
}

/// Vertical scroll state of the chart surface.
///
/// Geometry changes only re-clamp the offset. The offset is never reset by a
/// recompute, so switching charts can make the view snap to the new bound.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportState {
    content_height: f64,
    visible_height: f64,
    offset: f64,
}

impl ViewportState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> ScrollMode {
        if self.content_height > self.visible_height {
            ScrollMode::Scrollable
        } else {
            ScrollMode::Fits
        }
    }

    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.mode() == ScrollMode::Scrollable
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    #[must_use]
    pub fn visible_height(&self) -> f64 {
        self.visible_height
    }

    /// Largest valid offset for the current geometry.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_height - self.visible_height).max(0.0)
    }

    /// Applies new content and surface heights and re-clamps the offset.
    pub fn update_geometry(&mut self, content_height: f64, visible_height: f64) {
        self.content_height = sanitize(content_height);
        self.visible_height = sanitize(visible_height);
        let previous = self.offset;
        self.offset = self.offset.clamp(0.0, self.max_offset());
        if previous != self.offset {
            trace!(
                previous,
                offset = self.offset,
                max_offset = self.max_offset(),
                "scroll offset re-clamped"
            );
        }
    }

    /// Scrolls by `delta` pixels; positive moves content up.
    ///
    /// Returns `true` when the offset changed.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        if !self.is_scrollable() || !delta.is_finite() {
            return false;
        }
        let next = (self.offset + delta).clamp(0.0, self.max_offset());
        let changed = next != self.offset;
        self.offset = next;
        changed
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::{ScrollMode, ViewportState};

    #[test]
    fn fitting_content_ignores_wheel() {
        let mut state = ViewportState::new();
        state.update_geometry(400.0, 600.0);
        assert_eq!(state.mode(), ScrollMode::Fits);
        assert!(!state.scroll_by(50.0));
        assert_eq!(state.offset(), 0.0);
    }

    #[test]
    fn scroll_clamps_to_overflow() {
        let mut state = ViewportState::new();
        state.update_geometry(900.0, 600.0);
        assert!(state.scroll_by(1_000.0));
        assert_eq!(state.offset(), 300.0);
        assert!(state.scroll_by(-5_000.0));
        assert_eq!(state.offset(), 0.0);
    }

    #[test]
    fn shrinking_content_reclamps_offset() {
        let mut state = ViewportState::new();
        state.update_geometry(900.0, 600.0);
        state.scroll_by(250.0);
        state.update_geometry(700.0, 600.0);
        assert_eq!(state.offset(), 100.0);
        state.update_geometry(400.0, 600.0);
        assert_eq!(state.offset(), 0.0);
        assert_eq!(state.mode(), ScrollMode::Fits);
    }
}
