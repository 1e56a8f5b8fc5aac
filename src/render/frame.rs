use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

use super::{CanvasLayerKind, CirclePrimitive, LinePrimitive, RectPrimitive, TextPrimitive};

/// Primitives of one paint layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    fn empty(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            rects: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Coordinates are final viewport pixels: scroll translation has already been
/// applied to every scrolling layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: CanvasLayerKind::ORDER
                .into_iter()
                .map(LayerPrimitives::empty)
                .collect(),
        }
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> &mut LayerPrimitives {
        let position = CanvasLayerKind::ORDER
            .iter()
            .position(|candidate| *candidate == kind)
            .unwrap_or_default();
        &mut self.layers[position]
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    pub fn push_line(&mut self, kind: CanvasLayerKind, line: LinePrimitive) {
        self.layer_mut(kind).lines.push(line);
    }

    pub fn push_rect(&mut self, kind: CanvasLayerKind, rect: RectPrimitive) {
        self.layer_mut(kind).rects.push(rect);
    }

    pub fn push_circle(&mut self, kind: CanvasLayerKind, circle: CirclePrimitive) {
        self.layer_mut(kind).circles.push(circle);
    }

    pub fn push_text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        self.layer_mut(kind).texts.push(text);
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.layers.iter().flat_map(|layer| layer.lines.iter())
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.layers.iter().flat_map(|layer| layer.rects.iter())
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.layers.iter().flat_map(|layer| layer.circles.iter())
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.layers.iter().flat_map(|layer| layer.texts.iter())
    }

    /// Whether any text primitive carries exactly `text`.
    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        self.texts().any(|primitive| primitive.text == text)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in self.lines() {
            line.validate()?;
        }
        for rect in self.rects() {
            rect.validate()?;
        }
        for circle in self.circles() {
            circle.validate()?;
        }
        for text in self.texts() {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(LayerPrimitives::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::Viewport;
    use crate::render::{CanvasLayerKind, Color, LinePrimitive, TextHAlign, TextPrimitive};

    #[test]
    fn primitives_land_in_their_layer() {
        let mut frame = RenderFrame::new(Viewport::new(100, 100));
        assert!(frame.is_empty());

        let color = Color::rgb(1.0, 1.0, 1.0);
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(0.0, 0.0, 10.0, 0.0, 1.0, color),
        );
        frame.push_text(
            CanvasLayerKind::Legend,
            TextPrimitive::new("Legend", 5.0, 5.0, 12.0, color, TextHAlign::Left),
        );

        assert_eq!(frame.layer(CanvasLayerKind::Grid).map(|l| l.lines.len()), Some(1));
        assert!(frame.contains_text("Legend"));
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn validation_rejects_zero_viewport() {
        let frame = RenderFrame::new(Viewport::new(0, 100));
        assert!(frame.validate().is_err());
    }
}
