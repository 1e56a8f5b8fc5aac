//! Interaction-owned state: scroll offset and legend placement.
//!
//! Chart recomputes read these values but never write them.

mod legend;
mod viewport;

pub use legend::{LegendConfig, LegendDrag, LegendState};
pub use viewport::{ScrollMode, ViewportState};
