mod chart_pipeline;
mod data_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod interaction_controller;
mod json_contract;

pub use chart_pipeline::ChartPipelineOutput;
pub use engine::AnalyticsEngine;
pub use engine_config::DashboardConfig;
pub use engine_snapshot::EngineSnapshot;
pub use json_contract::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshotJsonContractV1};
