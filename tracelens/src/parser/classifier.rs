//! Component classification and best-effort record parsing.

use std::collections::BTreeMap;

use crate::model::{ComponentNode, ComponentType, Position, SkippedComponent};
use crate::parser::schema::SchematicDescription;

/// Ordered prefix table checked against both reference and value text.
///
/// Multi-letter prefixes come first so "REG1" resolves to a regulator
/// instead of being shadowed by the single-letter "R" entry.
const TYPE_PREFIXES: &[(&str, ComponentType)] = &[
    ("OPA", ComponentType::Opamp),
    ("TL", ComponentType::Opamp),
    ("NE", ComponentType::Opamp),
    ("LM", ComponentType::Opamp),
    ("REG", ComponentType::Regulator),
    ("OSC", ComponentType::Oscillator),
    ("MCU", ComponentType::Microcontroller),
    ("R", ComponentType::Resistor),
    ("C", ComponentType::Capacitor),
    ("L", ComponentType::Inductor),
    ("Q", ComponentType::Transistor),
    ("D", ComponentType::Diode),
    ("J", ComponentType::Connector),
];

/// Pin identifiers containing any of these substrings are power pins.
const POWER_PIN_PATTERNS: &[&str] = &["VCC", "VDD", "V+", "V-", "GND"];

/// Classify a component from its reference designator and value text.
///
/// First matching prefix wins. Falls back to the reference's leading
/// letter, then to [`ComponentType::Unknown`].
pub fn classify_component(reference: &str, value: &str) -> ComponentType {
    let ref_upper = reference.to_uppercase();
    let value_upper = value.to_uppercase();

    for (prefix, component_type) in TYPE_PREFIXES {
        if ref_upper.starts_with(prefix) || value_upper.starts_with(prefix) {
            return *component_type;
        }
    }

    // Reference-letter heuristic for designators like "R12a".
    match ref_upper.chars().next() {
        Some('R') => ComponentType::Resistor,
        Some('C') => ComponentType::Capacitor,
        Some('L') => ComponentType::Inductor,
        Some('Q') => ComponentType::Transistor,
        Some('D') => ComponentType::Diode,
        Some('J') => ComponentType::Connector,
        _ => ComponentType::Unknown,
    }
}

/// Whether a pin identifier names a power connection.
pub fn is_power_pin(pin: &str) -> bool {
    let upper = pin.to_uppercase();
    POWER_PIN_PATTERNS
        .iter()
        .any(|pattern| upper.contains(pattern))
}

/// Outcome of best-effort parsing: the component map plus every record
/// that was dropped, with its reason.
#[derive(Debug, Clone, Default)]
pub struct ParsedComponents {
    pub components: BTreeMap<String, ComponentNode>,
    pub skipped: Vec<SkippedComponent>,
}

/// Turn raw records into classified [`ComponentNode`]s.
///
/// Records with an empty or duplicate reference are skipped with a logged
/// diagnostic; parsing itself never fails.
pub fn parse_components(description: &SchematicDescription) -> ParsedComponents {
    let mut parsed = ParsedComponents::default();

    for record in &description.components {
        if record.reference.is_empty() {
            tracing::warn!("skipping component record with empty reference");
            parsed.skipped.push(SkippedComponent {
                reference: String::new(),
                reason: "empty reference".to_string(),
            });
            continue;
        }
        if parsed.components.contains_key(&record.reference) {
            tracing::warn!(
                reference = %record.reference,
                "skipping component record with duplicate reference"
            );
            parsed.skipped.push(SkippedComponent {
                reference: record.reference.clone(),
                reason: "duplicate reference".to_string(),
            });
            continue;
        }

        let component_type = classify_component(&record.reference, &record.value);

        let mut nets: Vec<String> = Vec::with_capacity(record.nets.len());
        for net in &record.nets {
            if !nets.iter().any(|n| n == net) {
                nets.push(net.clone());
            }
        }

        let (power_pins, signal_pins): (Vec<String>, Vec<String>) = record
            .pins
            .iter()
            .cloned()
            .partition(|pin| is_power_pin(pin));

        parsed.components.insert(
            record.reference.clone(),
            ComponentNode {
                reference: record.reference.clone(),
                value: record.value.clone(),
                component_type,
                position: Position::new(record.position.0, record.position.1),
                pins: record.pins.clone(),
                nets,
                power_pins,
                signal_pins,
            },
        );
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::ComponentRecord;

    #[test]
    fn test_classify_by_prefix_table() {
        assert_eq!(classify_component("OPA1", ""), ComponentType::Opamp);
        assert_eq!(classify_component("U1", "TL072"), ComponentType::Opamp);
        assert_eq!(classify_component("U2", "NE5532"), ComponentType::Opamp);
        assert_eq!(classify_component("U3", "LM358"), ComponentType::Opamp);
        assert_eq!(classify_component("R1", "10k"), ComponentType::Resistor);
        assert_eq!(classify_component("C5", "100n"), ComponentType::Capacitor);
        assert_eq!(classify_component("L2", "10uH"), ComponentType::Inductor);
        assert_eq!(classify_component("Q1", "2N3904"), ComponentType::Transistor);
        assert_eq!(classify_component("D3", "1N4148"), ComponentType::Diode);
        assert_eq!(classify_component("J1", ""), ComponentType::Connector);
        assert_eq!(classify_component("REG1", "7805"), ComponentType::Regulator);
        assert_eq!(classify_component("OSC1", "16MHz"), ComponentType::Oscillator);
        assert_eq!(
            classify_component("MCU1", "STM32"),
            ComponentType::Microcontroller
        );
    }

    #[test]
    fn test_multi_letter_prefixes_win_over_single_letter() {
        // "REG"/"OSC" must not be shadowed by "R"/"O" rules.
        assert_eq!(classify_component("REG2", ""), ComponentType::Regulator);
        assert_eq!(classify_component("r1", ""), ComponentType::Resistor);
    }

    #[test]
    fn test_unmatched_reference_is_unknown() {
        assert_eq!(classify_component("X1", "8MHz"), ComponentType::Unknown);
        assert_eq!(classify_component("SW1", ""), ComponentType::Unknown);
        assert_eq!(classify_component("", ""), ComponentType::Unknown);
    }

    #[test]
    fn test_power_pin_partition() {
        let mut description = SchematicDescription::new();
        description.add_component(
            ComponentRecord::new("U1")
                .with_value("TL072")
                .with_pins(["VCC", "GND", "IN+", "OUT", "vdd_io"]),
        );

        let parsed = parse_components(&description);
        let u1 = &parsed.components["U1"];

        assert_eq!(u1.power_pins, vec!["VCC", "GND", "vdd_io"]);
        assert_eq!(u1.signal_pins, vec!["IN+", "OUT"]);
        assert_eq!(u1.pins.len(), u1.power_pins.len() + u1.signal_pins.len());
    }

    #[test]
    fn test_skips_empty_and_duplicate_references() {
        let mut description = SchematicDescription::new();
        description.add_component(ComponentRecord::new("R1").with_value("10k"));
        description.add_component(ComponentRecord::new(""));
        description.add_component(ComponentRecord::new("R1").with_value("22k"));

        let parsed = parse_components(&description);

        assert_eq!(parsed.components.len(), 1);
        assert_eq!(parsed.components["R1"].value, "10k");
        assert_eq!(parsed.skipped.len(), 2);
        assert_eq!(parsed.skipped[0].reason, "empty reference");
        assert_eq!(parsed.skipped[1].reason, "duplicate reference");
    }

    #[test]
    fn test_nets_deduplicated_in_order() {
        let mut description = SchematicDescription::new();
        description.add_component(
            ComponentRecord::new("C1").with_nets(["SIG", "GND", "SIG"]),
        );

        let parsed = parse_components(&description);
        assert_eq!(parsed.components["C1"].nets, vec!["SIG", "GND"]);
    }
}
