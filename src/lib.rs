//! roboard-charts: run-log analytics and chart rendering for classroom robots.
//!
//! Raw run-log tables flow one way through extraction, metrics, layout and
//! painting into a backend-agnostic `RenderFrame`. Scroll and legend state
//! live in a separate interaction layer that recomputes never overwrite.

pub mod api;
pub mod chart;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod telemetry;

pub use api::{AnalyticsEngine, DashboardConfig};
pub use error::{ChartError, ChartResult};
