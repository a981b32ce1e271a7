//! Tracelens CLI - circuit topology and signal-path analysis from the
//! command line.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;
use tracelens::{
    AnalysisOptions, GroundLoop, Recommendation, TopologyAnalysis, TopologyAnalyzer,
};

#[derive(Parser)]
#[command(name = "tracelens")]
#[command(about = "Circuit topology and signal-path analysis tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full topology analysis on a JSON circuit description
    Analyze {
        /// Path to a JSON file with a "components" list
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if the analysis score falls below this
        #[arg(long)]
        fail_under: Option<f64>,

        /// Use the three-segment high-precision frequency sweep
        #[arg(long)]
        high_precision: bool,

        /// Apply above-20kHz parasitic corrections in the frequency model
        #[arg(long)]
        extended_bandwidth: bool,
    },

    /// Print prioritized layout recommendations
    Recommendations {
        /// Path to a JSON file with a "components" list
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Report ground loops in the component-to-ground graph
    Loops {
        /// Path to a JSON file with a "components" list
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for CI/CD
    Json,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            format,
            fail_under,
            high_precision,
            extended_bandwidth,
        } => {
            let options = AnalysisOptions {
                high_precision_sweep: high_precision,
                extended_bandwidth,
                ..Default::default()
            };
            let analysis = run_analysis(&file, options);

            match format {
                OutputFormat::Human => print_analysis(&analysis),
                OutputFormat::Json => emit_json(serde_json::to_string_pretty(&analysis)),
            }

            if let Some(threshold) = fail_under {
                if analysis.analysis_score < threshold {
                    eprintln!(
                        "analysis score {:.1} below threshold {:.1}",
                        analysis.analysis_score, threshold
                    );
                    process::exit(1);
                }
            }
        }

        Commands::Recommendations { file, format } => {
            let analysis = run_analysis(&file, AnalysisOptions::default());
            let recommendations = TopologyAnalyzer::recommendations(&analysis);

            match format {
                OutputFormat::Human => print_recommendations(&recommendations),
                OutputFormat::Json => {
                    emit_json(serde_json::to_string_pretty(&recommendations))
                }
            }
        }

        Commands::Loops { file, format } => {
            let analysis = run_analysis(&file, AnalysisOptions::default());
            let loops = TopologyAnalyzer::detect_ground_loops(&analysis);

            match format {
                OutputFormat::Human => print_loops(&loops),
                OutputFormat::Json => emit_json(serde_json::to_string_pretty(&loops)),
            }
        }
    }
}

fn run_analysis(file: &Path, options: AnalysisOptions) -> TopologyAnalysis {
    let contents = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: cannot read {}: {e}", file.display());
            process::exit(2);
        }
    };

    let analyzer = TopologyAnalyzer::new(options);
    match analyzer.try_analyze_json(&contents) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    }
}

fn emit_json(result: Result<String, serde_json::Error>) {
    match result {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: cannot serialize output: {e}");
            process::exit(2);
        }
    }
}

fn print_analysis(analysis: &TopologyAnalysis) {
    println!("Analysis score: {:.1}/100", analysis.analysis_score);
    println!(
        "{} components, {} signal paths, {} critical, {} noise sources",
        analysis.components.len(),
        analysis.signal_paths.len(),
        analysis.critical_paths.len(),
        analysis.noise_sources.len()
    );

    if !analysis.skipped_components.is_empty() {
        println!("Skipped records:");
        for skipped in &analysis.skipped_components {
            println!("  {:?}: {}", skipped.reference, skipped.reason);
        }
    }

    for critical in &analysis.critical_paths {
        println!(
            "CRITICAL {} -> {} (score {:.2})",
            critical.path.start, critical.path.end, critical.criticality_score
        );
        for issue in &critical.issues {
            println!("  issue: {issue}");
        }
        for recommendation in &critical.recommendations {
            println!("  fix: {recommendation}");
        }
    }

    for source in &analysis.noise_sources {
        println!(
            "NOISE {} ({:.0} dB) affects {} component(s)",
            source.reference,
            source.amplitude_db,
            source.affected_components.len()
        );
    }
}

fn print_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("No recommendations.");
        return;
    }
    for r in recommendations {
        println!("[{}] {} (targets: {})", r.priority, r.recommendation, r.targets.join(", "));
    }
}

fn print_loops(loops: &[GroundLoop]) {
    if loops.is_empty() {
        println!("No ground loops detected.");
        return;
    }
    for l in loops {
        println!(
            "{:?} severity loop: {} -- {}",
            l.severity,
            l.nodes.join(" -> "),
            l.recommendation
        );
    }
}
