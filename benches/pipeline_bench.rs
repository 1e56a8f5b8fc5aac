use criterion::{Criterion, criterion_group, criterion_main};
use roboard_charts::api::{AnalyticsEngine, DashboardConfig};
use roboard_charts::core::{
    ChartKind, ExtractionConfig, ReferenceCode, Table, Viewport, compute_series, extract_runs,
    similarity_score,
};
use roboard_charts::render::NullRenderer;
use std::hint::black_box;

const PROGRAMS: [&str; 4] = [
    "forward right right forward left",
    "forward left",
    "reverse reverse right",
    "forward right left forward left",
];

fn classroom_table(title: &str, runs: usize) -> Table {
    let headers = vec![
        "Time (seconds)".to_owned(),
        "Button Pressed".to_owned(),
        "Program".to_owned(),
    ];
    let rows = (0..runs * 2)
        .map(|i| {
            let marker = if i % 2 == 0 { "Play" } else { "Stop" };
            vec![
                format!("{:.1}", i as f64 * 1.7),
                marker.to_owned(),
                PROGRAMS[i % PROGRAMS.len()].to_owned(),
            ]
        })
        .collect();
    Table::new(title, headers, rows).expect("valid generated table")
}

fn bench_extract_1k_runs(c: &mut Criterion) {
    let table = classroom_table("rover", 1_000);
    let config = ExtractionConfig::default();

    c.bench_function("extract_1k_runs", |b| {
        b.iter(|| {
            let _ = extract_runs(black_box(&table), 0, black_box(&config));
        })
    });
}

fn bench_similarity_scoring(c: &mut Criterion) {
    let table = classroom_table("rover", 1_000);
    let runs = vec![extract_runs(&table, 0, &ExtractionConfig::default())];
    let reference =
        ReferenceCode::parse("forward right right forward left").expect("valid reference");

    c.bench_function("similarity_series_1k_runs", |b| {
        b.iter(|| {
            let _ = compute_series(
                ChartKind::SimilarityToReference,
                black_box(&runs),
                black_box(&reference),
            );
        })
    });

    let student = ["forward", "left", "right", "forward", "left"];
    let ideal = ["forward", "right", "right", "forward", "left"];
    c.bench_function("similarity_score_single_run", |b| {
        b.iter(|| {
            let _ = similarity_score(black_box(&student[..]), black_box(&ideal[..]));
        })
    });
}

fn bench_full_frame_build(c: &mut Criterion) {
    let config = DashboardConfig::new(Viewport::new(1280, 720));
    let mut engine = AnalyticsEngine::new(NullRenderer::default(), config).expect("engine init");
    for i in 0..12 {
        let index = engine.add_table(classroom_table(&format!("team {i}"), 40));
        engine.toggle_table_selected(index).expect("select table");
    }
    engine
        .set_reference_code("forward right right forward left")
        .expect("valid reference");

    for kind in ChartKind::ALL {
        engine.set_chart_kind(kind);
        c.bench_function(&format!("frame_build_{kind:?}"), |b| {
            b.iter(|| {
                let _ = engine.build_render_frame().expect("frame build");
            })
        });
    }
}

criterion_group!(
    benches,
    bench_extract_1k_runs,
    bench_similarity_scoring,
    bench_full_frame_build
);
criterion_main!(benches);
