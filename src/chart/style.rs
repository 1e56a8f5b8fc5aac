use crate::error::ChartResult;
use crate::render::Color;

/// Series palette; colors cycle by selection position.
pub const TABLE_PALETTE: [Color; 10] = [
    Color::from_hex(0x3b82f6),
    Color::from_hex(0xef4444),
    Color::from_hex(0x10b981),
    Color::from_hex(0xf59e0b),
    Color::from_hex(0x8b5cf6),
    Color::from_hex(0x06b6d4),
    Color::from_hex(0xf97316),
    Color::from_hex(0x6366f1),
    Color::from_hex(0xec4899),
    Color::from_hex(0x14b8a6),
];

/// Visual constants shared by every chart kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub background_color: Color,
    pub axis_color: Color,
    pub grid_color: Color,
    pub text_color: Color,
    pub title_color: Color,
    pub legend_background_color: Color,
    pub legend_border_color: Color,
    pub palette: Vec<Color>,
    pub tick_font_px: f64,
    pub value_font_px: f64,
    pub title_font_px: f64,
    pub message_font_px: f64,
    pub grid_line_width: f64,
    pub axis_line_width: f64,
    pub series_line_width: f64,
    pub marker_outer_radius: f64,
    pub marker_inner_radius: f64,
    /// Distance of point value labels above their marker.
    pub value_label_offset: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from_hex(0x111827),
            axis_color: Color::rgba(1.0, 1.0, 1.0, 0.1),
            grid_color: Color::rgba(1.0, 1.0, 1.0, 0.05),
            text_color: Color::rgba(1.0, 1.0, 1.0, 0.7),
            title_color: Color::rgba(1.0, 1.0, 1.0, 0.9),
            legend_background_color: Color::from_hex(0x1f2937).with_alpha(0.9),
            legend_border_color: Color::rgba(1.0, 1.0, 1.0, 0.15),
            palette: TABLE_PALETTE.to_vec(),
            tick_font_px: 13.0,
            value_font_px: 12.0,
            title_font_px: 14.0,
            message_font_px: 14.0,
            grid_line_width: 1.0,
            axis_line_width: 2.0,
            series_line_width: 2.5,
            marker_outer_radius: 6.0,
            marker_inner_radius: 3.0,
            value_label_offset: 25.0,
        }
    }
}

impl ChartStyle {
    /// Color for the table at `color_index` within the selection.
    #[must_use]
    pub fn series_color(&self, color_index: usize) -> Color {
        if self.palette.is_empty() {
            return self.text_color;
        }
        self.palette[color_index % self.palette.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background_color,
            self.axis_color,
            self.grid_color,
            self.text_color,
            self.title_color,
            self.legend_background_color,
            self.legend_border_color,
        ]
        .into_iter()
        .chain(self.palette.iter().copied())
        {
            color.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartStyle, TABLE_PALETTE};

    #[test]
    fn palette_cycles_by_selection_position() {
        let style = ChartStyle::default();
        assert_eq!(style.series_color(0), TABLE_PALETTE[0]);
        assert_eq!(style.series_color(10), TABLE_PALETTE[0]);
        assert_eq!(style.series_color(13), TABLE_PALETTE[3]);
        assert!(style.validate().is_ok());
    }
}
