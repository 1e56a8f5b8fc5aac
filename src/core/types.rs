use serde::{Deserialize, Serialize};

/// Visible drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

/// The three comparative views; exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Gaps between consecutive runs of each table.
    #[default]
    TimeBetweenRuns,
    /// Positional similarity of every run against the reference code.
    SimilarityToReference,
    /// First run that reproduces the reference code exactly.
    FirstMatch,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::TimeBetweenRuns,
        ChartKind::SimilarityToReference,
        ChartKind::FirstMatch,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::TimeBetweenRuns => "Time Between Runs",
            ChartKind::SimilarityToReference => "Compare to Ideal Code",
            ChartKind::FirstMatch => "Successful Runs",
        }
    }

    #[must_use]
    pub fn requires_reference(self) -> bool {
        !matches!(self, ChartKind::TimeBetweenRuns)
    }
}
