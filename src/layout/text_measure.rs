/// Measures rendered label width so layout can reserve room for it.
pub trait TextMeasure {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64;
}

/// Deterministic, backend-independent width estimate.
///
/// Used by headless rendering and tests; raster backends supply their own
/// measurer so layout matches the drawn glyphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasure;

impl TextMeasure for EstimatedTextMeasure {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | 'i' | 'l' | 'j' | '\'' => 0.34,
                '-' | '+' | '%' | '(' | ')' => 0.42,
                ' ' => 0.33,
                'm' | 'w' | 'M' | 'W' => 0.86,
                _ => 0.58,
            }
        });
        units * font_size_px
    }
}
