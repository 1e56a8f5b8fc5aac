use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, ExtractionConfig, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::LegendConfig;

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist dashboard setup next to their data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub legend: LegendConfig,
    #[serde(default = "default_initial_chart")]
    pub initial_chart: ChartKind,
}

impl DashboardConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            extraction: ExtractionConfig::default(),
            legend: LegendConfig::default(),
            initial_chart: default_initial_chart(),
        }
    }

    #[must_use]
    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_initial_chart(mut self, kind: ChartKind) -> Self {
        self.initial_chart = kind;
        self
    }

    /// Rejects zero-sized surfaces, blank column markers and unusable legends.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.extraction.marker_token.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "marker token must not be empty".to_owned(),
            ));
        }
        if self.extraction.time_header.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "time header must not be empty".to_owned(),
            ));
        }
        let legend = self.legend;
        let legend_values = [
            legend.width,
            legend.nominal_height,
            legend.right_offset,
            legend.top_offset,
        ];
        if legend_values.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "legend config values must be finite".to_owned(),
            ));
        }
        if legend.width <= 0.0 || legend.nominal_height <= 0.0 {
            return Err(ChartError::InvalidData(
                "legend size must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_initial_chart() -> ChartKind {
    ChartKind::TimeBetweenRuns
}
