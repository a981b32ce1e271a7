//! Critical-path identification.
//!
//! Each rule contributes independently to a path's criticality score; a
//! path can trigger several rules at once. Only paths whose accumulated
//! score exceeds the configured threshold are materialized.

use crate::model::{CriticalPath, SignalPath, SignalType};

/// Maximum acceptable path length before the length rule fires (mm).
pub const MAX_PATH_LENGTH_MM: f64 = 100.0;

/// Minimum impedance-matching ratio for audio paths. The path impedance
/// is compared against this ratio directly.
pub const MIN_IMPEDANCE_RATIO: f64 = 0.9;

const DIGITAL_MAX_LENGTH_MM: f64 = 50.0;
const POWER_MAX_LENGTH_MM: f64 = 20.0;

const LENGTH_CONTRIBUTION: f64 = 0.3;
const AUDIO_IMPEDANCE_CONTRIBUTION: f64 = 0.4;
const DIGITAL_LENGTH_CONTRIBUTION: f64 = 0.2;
const POWER_LENGTH_CONTRIBUTION: f64 = 0.3;

/// Score every path against the rule set and keep those above `threshold`.
pub fn identify_critical_paths(paths: &[SignalPath], threshold: f64) -> Vec<CriticalPath> {
    paths
        .iter()
        .filter_map(|path| score_path(path, threshold))
        .collect()
}

fn score_path(path: &SignalPath, threshold: f64) -> Option<CriticalPath> {
    let mut score = 0.0;
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    if path.length_mm > MAX_PATH_LENGTH_MM {
        score += LENGTH_CONTRIBUTION;
        issues.push(format!(
            "path length {:.1} mm exceeds maximum {:.0} mm",
            path.length_mm, MAX_PATH_LENGTH_MM
        ));
        recommendations.push("reduce path length".to_string());
    }

    if path.signal_type == SignalType::Audio && path.impedance_ohms < MIN_IMPEDANCE_RATIO {
        score += AUDIO_IMPEDANCE_CONTRIBUTION;
        issues.push(format!(
            "audio path impedance {:.2} below matching ratio {:.1}",
            path.impedance_ohms, MIN_IMPEDANCE_RATIO
        ));
        recommendations.push("add impedance matching".to_string());
    }

    if path.signal_type == SignalType::Digital && path.length_mm > DIGITAL_MAX_LENGTH_MM {
        score += DIGITAL_LENGTH_CONTRIBUTION;
        issues.push(format!(
            "digital path length {:.1} mm exceeds {:.0} mm",
            path.length_mm, DIGITAL_MAX_LENGTH_MM
        ));
        recommendations.push("shorten digital path or add series termination".to_string());
    }

    if path.signal_type == SignalType::Power && path.length_mm > POWER_MAX_LENGTH_MM {
        score += POWER_LENGTH_CONTRIBUTION;
        issues.push(format!(
            "power path length {:.1} mm exceeds {:.0} mm",
            path.length_mm, POWER_MAX_LENGTH_MM
        ));
        recommendations.push("add decoupling capacitors".to_string());
    }

    if score > threshold {
        Some(CriticalPath {
            path: path.clone(),
            criticality_score: score,
            issues,
            recommendations,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(signal_type: SignalType, length_mm: f64, impedance_ohms: f64) -> SignalPath {
        SignalPath {
            start: "A".to_string(),
            end: "B".to_string(),
            path_components: vec!["A".to_string(), "B".to_string()],
            path_nets: vec!["N".to_string()],
            length_mm,
            impedance_ohms,
            signal_type,
        }
    }

    #[test]
    fn test_rules_accumulate() {
        // Long power path: 0.3 (length) + 0.3 (power length) = 0.6, below
        // the 0.7 default threshold.
        let p = path(SignalType::Power, 150.0, 50.0);
        assert!(identify_critical_paths(&[p], 0.7).is_empty());

        // Long audio path with mismatched impedance accumulates both the
        // length and the audio rule: 0.3 + 0.4 = 0.7.
        let p = path(SignalType::Audio, 150.0, 0.5);
        let critical = identify_critical_paths(&[p], 0.69);
        assert_eq!(critical.len(), 1);
        assert!((critical[0].criticality_score - 0.7).abs() < 1e-9);
        assert_eq!(critical[0].issues.len(), 2);
        assert_eq!(critical[0].recommendations.len(), 2);
    }

    #[test]
    fn test_threshold_is_strict() {
        let p = path(SignalType::Audio, 150.0, 0.5); // exactly 0.7
        assert!(identify_critical_paths(&[p.clone()], 0.7).is_empty());
        assert_eq!(identify_critical_paths(&[p], 0.6).len(), 1);
    }

    #[test]
    fn test_every_critical_path_exceeds_threshold() {
        let paths = vec![
            path(SignalType::Audio, 150.0, 0.5),
            path(SignalType::Power, 30.0, 50.0),
            path(SignalType::Digital, 80.0, 50.0),
            path(SignalType::Control, 10.0, 50.0),
        ];
        for critical in identify_critical_paths(&paths, 0.25) {
            assert!(critical.criticality_score > 0.25);
        }
    }

    #[test]
    fn test_digital_length_rule() {
        let p = path(SignalType::Digital, 60.0, 50.0);
        let critical = identify_critical_paths(&[p], 0.1);
        assert_eq!(critical.len(), 1);
        assert!((critical[0].criticality_score - 0.2).abs() < 1e-9);
        assert_eq!(
            critical[0].recommendations,
            vec!["shorten digital path or add series termination"]
        );
    }

    #[test]
    fn test_short_clean_path_is_not_critical() {
        let p = path(SignalType::Audio, 10.0, 1050.0);
        assert!(identify_critical_paths(&[p], 0.0).is_empty());
    }
}
