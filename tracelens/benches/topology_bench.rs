use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tracelens::prelude::*;

/// Synthetic board: `n` stages of R/C pairs chained net-to-net with an
/// opamp every tenth stage.
fn synthetic_circuit(stages: usize) -> SchematicDescription {
    let mut description = SchematicDescription::new();
    for i in 0..stages {
        description.add_component(
            ComponentRecord::new(format!("R{i}"))
                .with_value("10k")
                .with_position(i as f64 * 5.0, 0.0)
                .with_nets([format!("N{i}"), format!("N{}", i + 1)]),
        );
        description.add_component(
            ComponentRecord::new(format!("C{i}"))
                .with_value("100n")
                .with_position(i as f64 * 5.0, 5.0)
                .with_nets([format!("N{}", i + 1), "GND".to_string()]),
        );
        if i % 10 == 0 {
            description.add_component(
                ComponentRecord::new(format!("OPA{i}"))
                    .with_value("TL072")
                    .with_position(i as f64 * 5.0, 10.0)
                    .with_nets([format!("N{}", i + 1), "VCC".to_string(), "GND".to_string()]),
            );
        }
    }
    description
}

fn bench_analyze(c: &mut Criterion) {
    let description = synthetic_circuit(30);
    let analyzer = TopologyAnalyzer::new(AnalysisOptions::default());

    c.bench_function("analyze_30_stages", |b| {
        b.iter(|| analyzer.analyze(black_box(&description)));
    });
}

fn bench_frequency_response(c: &mut Criterion) {
    let description = synthetic_circuit(30);
    let analyzer = TopologyAnalyzer::new(AnalysisOptions::default());
    let analysis = analyzer.analyze(&description);
    let path = analysis
        .signal_paths
        .iter()
        .max_by_key(|p| p.path_components.len())
        .expect("paths exist");

    c.bench_function("frequency_response_longest_path", |b| {
        b.iter(|| analyzer.frequency_response(black_box(path), black_box(&analysis)));
    });
}

criterion_group!(benches, bench_analyze, bench_frequency_response);
criterion_main!(benches);
