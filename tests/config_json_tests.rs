use roboard_charts::ChartError;
use roboard_charts::api::{AnalyticsEngine, DashboardConfig, EngineSnapshot};
use roboard_charts::core::{ChartKind, ExtractionConfig, Table, Viewport};
use roboard_charts::interaction::LegendConfig;
use roboard_charts::render::NullRenderer;

#[test]
fn minimal_json_fills_defaults() {
    let config = DashboardConfig::from_json_str(r#"{"viewport":{"width":640,"height":480}}"#)
        .expect("parse");
    assert_eq!(config.viewport, Viewport::new(640, 480));
    assert_eq!(config.extraction, ExtractionConfig::default());
    assert_eq!(config.extraction.marker_token, "button");
    assert_eq!(config.extraction.marker_sentinel, "Play");
    assert_eq!(config.extraction.time_header, "Time (seconds)");
    assert_eq!(config.legend, LegendConfig::default());
    assert_eq!(config.initial_chart, ChartKind::TimeBetweenRuns);
}

#[test]
fn config_json_round_trip_keeps_overrides() {
    let config = DashboardConfig::new(Viewport::new(1024, 768))
        .with_initial_chart(ChartKind::FirstMatch)
        .with_extraction(ExtractionConfig {
            marker_token: "trigger".to_owned(),
            marker_sentinel: "Run".to_owned(),
            time_header: "Seconds".to_owned(),
        });
    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"first_match\""));
    let parsed = DashboardConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = DashboardConfig::from_json_str("{").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn engine_rejects_invalid_config() {
    let err = AnalyticsEngine::new(
        NullRenderer::default(),
        DashboardConfig::new(Viewport::new(0, 480)),
    )
    .err()
    .expect("zero width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 480 }));

    let mut config = DashboardConfig::new(Viewport::new(640, 480));
    config.extraction.marker_token = "  ".to_owned();
    assert!(AnalyticsEngine::new(NullRenderer::default(), config).is_err());
}

#[test]
fn custom_marker_settings_drive_extraction() {
    let config = DashboardConfig::new(Viewport::new(640, 480)).with_extraction(ExtractionConfig {
        marker_token: "trigger".to_owned(),
        marker_sentinel: "Go".to_owned(),
        time_header: "t".to_owned(),
    });
    let mut engine = AnalyticsEngine::new(NullRenderer::default(), config).expect("engine init");
    let table = Table::new(
        "custom",
        vec!["t".to_owned(), "Trigger Event".to_owned(), "Moves".to_owned()],
        vec![
            vec!["0.5".to_owned(), "Go".to_owned(), "left".to_owned()],
            vec!["0.9".to_owned(), "Play".to_owned(), "right".to_owned()],
            vec!["2.5".to_owned(), "Go".to_owned(), "right".to_owned()],
        ],
    )
    .expect("table");
    let index = engine.add_table(table);
    engine.toggle_table_selected(index).expect("select");

    let runs = engine.extracted_runs();
    assert_eq!(runs[0].runs.len(), 2);
    assert_eq!(runs[0].runs[1].timestamp, Some(2.5));
}

#[test]
fn snapshot_contract_round_trips() {
    let config = DashboardConfig::new(Viewport::new(800, 400));
    let mut engine = AnalyticsEngine::new(NullRenderer::default(), config).expect("engine init");
    let table = Table::new(
        "team",
        vec![
            "Time (seconds)".to_owned(),
            "Button Pressed".to_owned(),
            "Program".to_owned(),
        ],
        vec![
            vec!["1.0".to_owned(), "Play".to_owned(), "forward".to_owned()],
            vec!["2.0".to_owned(), "Play".to_owned(), "left".to_owned()],
        ],
    )
    .expect("table");
    let index = engine.add_table(table);
    engine.toggle_table_selected(index).expect("select");
    engine.set_reference_code("forward").expect("reference");
    engine.set_chart_kind(ChartKind::SimilarityToReference);

    let snapshot = engine.snapshot().expect("snapshot");
    let contract = engine
        .snapshot_json_contract_v1_pretty()
        .expect("contract json");
    assert!(contract.contains("\"schema_version\": 1"));
    let parsed = EngineSnapshot::from_json_compat_str(&contract).expect("parse contract");
    assert_eq!(parsed, snapshot);

    let bare = engine.snapshot_json_pretty().expect("bare json");
    let parsed = EngineSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed.selection, vec![0]);
    assert_eq!(parsed.chart_kind, ChartKind::SimilarityToReference);
}
