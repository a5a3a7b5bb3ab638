//! Locale-independent numeric rendering shared by the writers.

/// Renderings longer than this switch to exponent form.
const MAX_PLAIN_LEN: usize = 20;

/// Shortest decimal that parses back to exactly `value`.
///
/// Uses plain notation (`130`, `0.025`) and exponent notation (`1e-20`) once
/// the plain form gets long. Negative zero is written as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let plain = format!("{}", value);
    if plain.len() > MAX_PLAIN_LEN {
        format!("{:e}", value)
    } else {
        plain
    }
}

/// Best representation of `value` in at most `width` characters.
///
/// When the exact rendering is too wide, every fixed and exponent rendering
/// that fits is compared and the one that re-parses closest to `value` wins
/// (shorter on ties).
pub fn format_fixed_width(value: f64, width: usize) -> String {
    let exact = format_number(value);
    if exact.len() <= width {
        return exact;
    }

    let mut best: Option<(f64, String)> = None;
    for precision in 0..width {
        let fixed = trim_fraction(format!("{:.*}", precision, value));
        let exponent = format!("{:.*e}", precision, value);
        for candidate in [fixed, exponent] {
            if candidate.len() > width {
                continue;
            }
            let error = match candidate.parse::<f64>() {
                Ok(parsed) => (parsed - value).abs(),
                Err(_) => continue,
            };
            let better = match &best {
                None => true,
                Some((best_error, best_text)) => {
                    error < *best_error || (error == *best_error && candidate.len() < best_text.len())
                }
            };
            if better {
                best = Some((error, candidate));
            }
        }
    }

    best.map(|(_, text)| text)
        .unwrap_or_else(|| format!("{:.0e}", value))
}

fn trim_fraction(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
