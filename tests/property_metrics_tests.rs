use proptest::prelude::*;
use roboard_charts::api::{AnalyticsEngine, DashboardConfig};
use roboard_charts::core::{
    ChartKind, ReferenceCode, RunRecord, Table, Viewport, similarity_score, time_deltas,
    tokenize_commands,
};
use roboard_charts::layout::content_height;
use roboard_charts::render::NullRenderer;

const COMMANDS: [&str; 4] = ["forward", "left", "right", "reverse"];

fn program_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(COMMANDS.to_vec()), 0..8)
}

fn run(run_number: u32, timestamp: Option<f64>) -> RunRecord {
    RunRecord {
        table_index: 0,
        run_number,
        timestamp,
        commands: Default::default(),
    }
}

proptest! {
    #[test]
    fn time_deltas_are_non_negative_and_pair_valid_timestamps(
        samples in prop::collection::vec(prop::option::of(0.0f64..10_000.0f64), 0..64)
    ) {
        let runs: Vec<RunRecord> = samples
            .iter()
            .enumerate()
            .map(|(i, timestamp)| run(i as u32 + 1, *timestamp))
            .collect();
        let valid = samples.iter().filter(|sample| sample.is_some()).count();

        let deltas = time_deltas(&runs);
        prop_assert_eq!(deltas.len(), valid.saturating_sub(1));
        for point in &deltas {
            prop_assert!(point.time_diff >= 0.0);
            prop_assert!(point.from_run < point.to_run);
        }
    }

    #[test]
    fn similarity_stays_in_percent_range(
        student in program_strategy(),
        reference in program_strategy(),
    ) {
        let score = similarity_score(&student, &reference);
        prop_assert!((0.0..=100.0).contains(&score));
        if student.is_empty() || reference.is_empty() {
            prop_assert_eq!(score, 0.0);
        }
    }

    #[test]
    fn positionally_disjoint_programs_score_zero(
        student in prop::collection::vec(0usize..COMMANDS.len(), 1..8),
        shifts in prop::collection::vec(1usize..COMMANDS.len(), 1..8),
    ) {
        let reference: Vec<&str> = shifts
            .iter()
            .enumerate()
            .map(|(i, shift)| {
                let base = student.get(i).copied().unwrap_or(0);
                COMMANDS[(base + shift) % COMMANDS.len()]
            })
            .collect();
        let student: Vec<&str> = student.iter().map(|&i| COMMANDS[i]).collect();

        prop_assert_eq!(similarity_score(&student, &reference), 0.0);
    }

    #[test]
    fn identical_programs_score_full(program in prop::collection::vec(prop::sample::select(COMMANDS.to_vec()), 1..8)) {
        let joined = program.join(" ");
        let reference = ReferenceCode::parse(&joined).expect("valid reference");
        let tokens = tokenize_commands(&joined);
        let reference_tokens: Vec<&str> =
            reference.commands().iter().map(|command| command.as_str()).collect();
        prop_assert_eq!(similarity_score(&tokens, &reference_tokens), 100.0);
    }

    #[test]
    fn content_height_is_monotone_and_floored(count in 0usize..200) {
        for kind in ChartKind::ALL {
            let current = content_height(kind, count);
            prop_assert!(current >= 400.0);
            prop_assert!(content_height(kind, count + 1) >= current);
        }
    }

    #[test]
    fn frame_build_is_deterministic_and_finite(
        programs in prop::collection::vec((0u16..600u16, program_strategy()), 1..24),
        kind_index in 0usize..3,
    ) {
        let headers = vec![
            "Time (seconds)".to_owned(),
            "Button Pressed".to_owned(),
            "Program".to_owned(),
        ];
        let rows = programs
            .iter()
            .map(|(time, program)| vec![
                format!("{:.1}", f64::from(*time) / 2.0),
                "Play".to_owned(),
                program.join(" "),
            ])
            .collect();
        let table = Table::new("generated", headers, rows).expect("table");

        let config = DashboardConfig::new(Viewport::new(1280, 720));
        let mut engine = AnalyticsEngine::new(NullRenderer::default(), config).expect("engine init");
        let index = engine.add_table(table);
        engine.toggle_table_selected(index).expect("select");
        engine.set_reference_code("forward right right forward left").expect("reference");
        engine.set_chart_kind(ChartKind::ALL[kind_index]);

        let first = engine.build_render_frame().expect("first frame");
        let second = engine.build_render_frame().expect("second frame");
        prop_assert_eq!(&first, &second);
        prop_assert!(first.validate().is_ok());
        prop_assert!(first.lines().all(|line|
            line.x1.is_finite()
            && line.y1.is_finite()
            && line.x2.is_finite()
            && line.y2.is_finite()
            && line.stroke_width > 0.0
        ));
    }
}
