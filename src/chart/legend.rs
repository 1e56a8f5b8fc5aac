use crate::interaction::LegendState;
use crate::render::{
    CanvasLayerKind, FontStyle, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive, TextVAlign,
};

use super::ChartStyle;

pub const LEGEND_HEADER: &str = "Legend";
const HEADER_HEIGHT_PX: f64 = 30.0;
const ROW_HEIGHT_PX: f64 = 22.0;
const INNER_PADDING_PX: f64 = 12.0;
const SWATCH_PX: f64 = 12.0;

/// One legend row: a selected table and its series color index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    pub color_index: usize,
}

/// Height of the legend box for `entries` rows.
#[must_use]
pub fn legend_height(entries: usize) -> f64 {
    HEADER_HEIGHT_PX + entries as f64 * ROW_HEIGHT_PX + INNER_PADDING_PX / 2.0
}

/// Paints the legend at its own position; it ignores the content scroll.
pub fn paint_legend(
    frame: &mut RenderFrame,
    legend: &LegendState,
    entries: &[LegendEntry],
    style: &ChartStyle,
) {
    let (x, y) = legend.position();
    let (width, height) = legend.size();

    frame.push_rect(
        CanvasLayerKind::Legend,
        RectPrimitive::new(x, y, width, height, style.legend_background_color)
            .with_border(1.0, style.legend_border_color)
            .with_corner_radius(6.0),
    );
    frame.push_text(
        CanvasLayerKind::Legend,
        TextPrimitive::new(
            LEGEND_HEADER,
            x + INNER_PADDING_PX,
            y + HEADER_HEIGHT_PX / 2.0,
            style.tick_font_px,
            style.title_color,
            TextHAlign::Left,
        )
        .with_v_align(TextVAlign::Middle)
        .with_font_style(FontStyle::Bold),
    );

    for (row, entry) in entries.iter().enumerate() {
        let center = y + HEADER_HEIGHT_PX + (row as f64 + 0.5) * ROW_HEIGHT_PX;
        frame.push_rect(
            CanvasLayerKind::Legend,
            RectPrimitive::new(
                x + INNER_PADDING_PX,
                center - SWATCH_PX / 2.0,
                SWATCH_PX,
                SWATCH_PX,
                style.series_color(entry.color_index),
            )
            .with_corner_radius(2.0),
        );
        if entry.name.is_empty() {
            continue;
        }
        frame.push_text(
            CanvasLayerKind::Legend,
            TextPrimitive::new(
                entry.name.clone(),
                x + INNER_PADDING_PX + SWATCH_PX + 8.0,
                center,
                style.value_font_px,
                style.text_color,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Middle),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{LEGEND_HEADER, LegendEntry, legend_height, paint_legend};
    use crate::chart::ChartStyle;
    use crate::core::Viewport;
    use crate::interaction::{LegendConfig, LegendState};
    use crate::render::{CanvasLayerKind, RenderFrame};

    #[test]
    fn legend_rows_follow_selection() {
        let viewport = Viewport::new(800, 400);
        let mut legend = LegendState::new(LegendConfig::default());
        legend.attach(viewport, legend_height(2));
        let entries = vec![
            LegendEntry {
                name: "alpha".to_owned(),
                color_index: 0,
            },
            LegendEntry {
                name: "beta".to_owned(),
                color_index: 1,
            },
        ];

        let mut frame = RenderFrame::new(viewport);
        paint_legend(&mut frame, &legend, &entries, &ChartStyle::default());

        let layer = frame.layer(CanvasLayerKind::Legend).expect("legend layer");
        assert_eq!(layer.rects.len(), 3);
        let texts: Vec<_> = layer.texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec![LEGEND_HEADER, "alpha", "beta"]);
        assert!(legend_height(2) > legend_height(1));
    }
}
