use serde::{Deserialize, Serialize};

/// Paint layers of one chart frame, drawn bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Grid,
    Axis,
    Series,
    Labels,
    Legend,
}

impl CanvasLayerKind {
    /// Canonical paint order.
    pub const ORDER: [CanvasLayerKind; 5] = [
        CanvasLayerKind::Grid,
        CanvasLayerKind::Axis,
        CanvasLayerKind::Series,
        CanvasLayerKind::Labels,
        CanvasLayerKind::Legend,
    ];

    /// Whether the layer follows the vertical scroll offset.
    #[must_use]
    pub fn scrolls_with_content(self) -> bool {
        !matches!(self, CanvasLayerKind::Legend)
    }
}

#[cfg(test)]
mod tests {
    use super::CanvasLayerKind;

    #[test]
    fn legend_is_painted_last_and_does_not_scroll() {
        assert_eq!(CanvasLayerKind::ORDER.last(), Some(&CanvasLayerKind::Legend));
        assert!(!CanvasLayerKind::Legend.scrolls_with_content());
        assert!(CanvasLayerKind::Grid.scrolls_with_content());
    }
}
