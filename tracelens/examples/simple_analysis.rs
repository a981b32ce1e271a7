//! Minimal usage example: analyze a small preamp-style circuit and print
//! the findings.

use tracelens::prelude::*;

fn main() {
    let mut description = SchematicDescription::new();
    description.add_component(
        ComponentRecord::new("J1")
            .with_position(0.0, 0.0)
            .with_pins(["TIP", "SLEEVE"])
            .with_nets(["IN", "GND"]),
    );
    description.add_component(
        ComponentRecord::new("C1")
            .with_value("100n")
            .with_position(15.0, 0.0)
            .with_pins(["1", "2"])
            .with_nets(["IN", "SIG1"]),
    );
    description.add_component(
        ComponentRecord::new("R1")
            .with_value("1M")
            .with_position(25.0, 10.0)
            .with_pins(["1", "2"])
            .with_nets(["SIG1", "GND"]),
    );
    description.add_component(
        ComponentRecord::new("OPA1")
            .with_value("TL072")
            .with_position(40.0, 0.0)
            .with_pins(["IN+", "IN-", "OUT", "VCC", "GND"])
            .with_nets(["SIG1", "OUT", "VCC", "GND"]),
    );

    let analyzer = TopologyAnalyzer::new(AnalysisOptions::default());
    let analysis = analyzer.analyze(&description);

    println!("analysis score: {:.1}", analysis.analysis_score);
    println!("components: {}", analysis.components.len());
    println!("signal paths: {}", analysis.signal_paths.len());

    for path in &analysis.signal_paths {
        println!(
            "  {} -> {} [{}] {:.1} mm, {:.0} ohm",
            path.start, path.end, path.signal_type, path.length_mm, path.impedance_ohms
        );
    }

    for source in &analysis.noise_sources {
        println!(
            "noise: {} ({:?}, {:.0} dB) affects {:?}",
            source.reference, source.noise_type, source.amplitude_db, source.affected_components
        );
    }

    for recommendation in TopologyAnalyzer::recommendations(&analysis) {
        println!(
            "[{}] {}",
            recommendation.priority, recommendation.recommendation
        );
    }

    if let Some(path) = analysis.paths_between("C1", "OPA1").first() {
        let response = analyzer.frequency_response(path, &analysis);
        println!(
            "C1 -> OPA1 bandwidth: {:.0} Hz (flatness {:.2})",
            response.bandwidth_hz, response.passband_flatness
        );
    }
}
