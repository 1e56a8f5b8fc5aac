use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Viewport;

fn default_legend_width() -> f64 {
    200.0
}

fn default_nominal_height() -> f64 {
    200.0
}

fn default_right_offset() -> f64 {
    200.0
}

fn default_top_offset() -> f64 {
    60.0
}

/// Legend box sizing and its initial placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    #[serde(default = "default_legend_width")]
    pub width: f64,
    /// Height used until the real row count is known.
    #[serde(default = "default_nominal_height")]
    pub nominal_height: f64,
    /// Distance of the default left edge from the right edge of the surface.
    #[serde(default = "default_right_offset")]
    pub right_offset: f64,
    #[serde(default = "default_top_offset")]
    pub top_offset: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: default_legend_width(),
            nominal_height: default_nominal_height(),
            right_offset: default_right_offset(),
            top_offset: default_top_offset(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum LegendDrag {
    #[default]
    Idle,
    /// Pointer offset from the legend origin captured on press.
    Dragging { grab_dx: f64, grab_dy: f64 },
}

/// Position, size, visibility and drag state of the legend.
///
/// Only pointer input and [`LegendState::attach`] write here; chart recomputes
/// read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendState {
    config: LegendConfig,
    x: f64,
    y: f64,
    height: f64,
    viewport: Viewport,
    placed: bool,
    visible: bool,
    drag: LegendDrag,
}

impl LegendState {
    #[must_use]
    pub fn new(config: LegendConfig) -> Self {
        Self {
            config,
            x: 0.0,
            y: 0.0,
            height: config.nominal_height,
            viewport: Viewport::new(0, 0),
            placed: false,
            visible: true,
            drag: LegendDrag::Idle,
        }
    }

    #[must_use]
    pub fn config(&self) -> LegendConfig {
        self.config
    }

    /// Binds the legend to a surface and updates its height.
    ///
    /// The default position is applied only on the first attach; later calls
    /// keep wherever the user dragged the legend, pulled back inside the
    /// surface when it shrank or the legend grew.
    pub fn attach(&mut self, viewport: Viewport, height: f64) {
        self.viewport = viewport;
        if height.is_finite() && height > 0.0 {
            self.height = height;
        }
        if !self.placed {
            self.x = viewport.width_px() - self.config.right_offset;
            self.y = self.config.top_offset;
            self.placed = true;
            self.clamp_to_surface();
            debug!(x = self.x, y = self.y, "legend placed at default position");
            return;
        }
        let before = (self.x, self.y);
        self.clamp_to_surface();
        if before != (self.x, self.y) {
            debug!(x = self.x, y = self.y, "legend pulled back inside surface");
        }
    }

    fn clamp_to_surface(&mut self) {
        let (width, height) = self.size();
        let max_x = (self.viewport.width_px() - width).max(0.0);
        let max_y = (self.viewport.height_px() - height).max(0.0);
        self.x = self.x.clamp(0.0, max_x);
        self.y = self.y.clamp(0.0, max_y);
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.config.width, self.height)
    }

    #[must_use]
    pub fn drag(&self) -> LegendDrag {
        self.drag
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, LegendDrag::Dragging { .. })
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hiding the legend also ends any drag in progress.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.drag = LegendDrag::Idle;
        }
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (width, height) = self.size();
        x >= self.x && x <= self.x + width && y >= self.y && y <= self.y + height
    }

    /// Starts a drag when the press lands on a visible legend.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        if !self.visible || !self.contains(x, y) {
            return false;
        }
        self.drag = LegendDrag::Dragging {
            grab_dx: x - self.x,
            grab_dy: y - self.y,
        };
        true
    }

    /// Moves the legend while dragging, keeping it inside the surface.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let LegendDrag::Dragging { grab_dx, grab_dy } = self.drag else {
            return false;
        };
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        self.x = x - grab_dx;
        self.y = y - grab_dy;
        self.clamp_to_surface();
        true
    }

    /// Releases a drag; presses anywhere end it.
    pub fn pointer_up(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.drag = LegendDrag::Idle;
        was_dragging
    }
}

#[cfg(test)]
mod tests {
    use super::{LegendConfig, LegendDrag, LegendState};
    use crate::core::Viewport;

    fn attached(width: u32, height: u32) -> LegendState {
        let mut legend = LegendState::new(LegendConfig::default());
        legend.attach(Viewport::new(width, height), 80.0);
        legend
    }

    #[test]
    fn default_position_is_offset_from_top_right() {
        let legend = attached(1000, 600);
        assert_eq!(legend.position(), (800.0, 60.0));
        assert_eq!(legend.size(), (200.0, 80.0));
    }

    #[test]
    fn drag_keeps_grab_offset_and_clamps() {
        let mut legend = attached(1000, 600);
        assert!(legend.pointer_down(810.0, 70.0));
        assert!(legend.pointer_move(410.0, 270.0));
        assert_eq!(legend.position(), (400.0, 260.0));

        legend.pointer_move(5_000.0, 5_000.0);
        assert_eq!(legend.position(), (800.0, 520.0));
        legend.pointer_move(-100.0, -100.0);
        assert_eq!(legend.position(), (0.0, 0.0));

        assert!(legend.pointer_up());
        assert_eq!(legend.drag(), LegendDrag::Idle);
        assert!(!legend.pointer_move(300.0, 300.0));
    }

    #[test]
    fn press_outside_does_not_drag() {
        let mut legend = attached(1000, 600);
        assert!(!legend.pointer_down(10.0, 10.0));
        assert!(!legend.is_dragging());
    }

    #[test]
    fn reattach_keeps_dragged_position() {
        let mut legend = attached(1000, 600);
        legend.pointer_down(810.0, 70.0);
        legend.pointer_move(110.0, 70.0);
        legend.pointer_up();
        legend.attach(Viewport::new(1200, 600), 102.0);
        assert_eq!(legend.position(), (100.0, 60.0));
        assert_eq!(legend.size(), (200.0, 102.0));
    }

    #[test]
    fn reattach_pulls_legend_inside_shrunken_surface() {
        let mut legend = attached(1000, 600);
        legend.pointer_down(810.0, 70.0);
        legend.pointer_move(810.0, 530.0);
        legend.pointer_up();
        assert_eq!(legend.position(), (800.0, 520.0));

        legend.attach(Viewport::new(500, 300), 80.0);
        assert_eq!(legend.position(), (300.0, 220.0));

        legend.attach(Viewport::new(500, 300), 120.0);
        assert_eq!(legend.position(), (300.0, 180.0));
    }

    #[test]
    fn hidden_legend_ignores_press() {
        let mut legend = attached(1000, 600);
        legend.set_visible(false);
        assert!(!legend.pointer_down(810.0, 70.0));
    }
}
