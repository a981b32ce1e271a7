//! Resistance-value parsing.
//!
//! Component values arrive as free text ("10k", "4k7", "1M", "100R",
//! "470", but also "N/A" or a part number). Parsing is fallible by design:
//! callers get an `Option` and decide to skip the component's contribution.

/// Parse a resistance value string into ohms.
///
/// Handles `"10k"`, `"4.7k"`, `"4k7"`, `"100R"`, `"1M"`, `"470"`.
/// Returns `None` for anything that is not a positive resistance.
pub fn parse_resistance(value: &str) -> Option<f64> {
    let v = value.trim().to_lowercase();
    if v.is_empty() {
        return None;
    }

    // Infix or suffix engineering notation: "4k7" -> 4700, "1M" -> 1e6,
    // "100R" -> 100. The multiplier letter may also terminate the string.
    for (sep, mult) in [('k', 1_000.0), ('m', 1_000_000.0), ('r', 1.0)] {
        if let Some(pos) = v.find(sep) {
            let integer: f64 = match v[..pos].parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            let fraction_str = &v[pos + 1..];
            let fraction: f64 = if fraction_str.is_empty() {
                0.0
            } else {
                match fraction_str.parse::<f64>() {
                    Ok(f) => f / 10.0_f64.powi(fraction_str.len() as i32),
                    Err(_) => continue,
                }
            };
            let ohms = (integer + fraction) * mult;
            if ohms > 0.0 {
                return Some(ohms);
            }
        }
    }

    // Plain numeric, assume ohms.
    v.parse::<f64>().ok().filter(|&x| x > 0.0)
}
