//! Formatting helpers for presenting emissions, areas and money.
//!
//! Output mirrors en-US browser formatting: comma thousands separators, at
//! most three fraction digits for plain numbers, and ties rounded away from
//! zero (`0.125` to two places is `0.13`).

/// Placeholder shown for absent values in the metrics table.
pub const MISSING: &str = "-";

/// Fixed-point rendering, e.g. `format_fixed(120.0, 2) == "120.00"`.
pub fn format_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let rounded = round_half_away(value, digits);
    let rendered = format!("{rounded:.digits$}");
    normalize_negative_zero(rendered)
}

/// Grouped number with up to three fraction digits, trailing zeros trimmed.
pub fn format_grouped(value: f64) -> String {
    grouped_with_digits(value, 3)
}

/// Whole-dollar currency: `$` prefix, grouped, no fraction.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("${}", grouped_with_digits(value, 0))
}

fn grouped_with_digits(value: f64, max_digits: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }

    let rounded = round_half_away(value.abs(), max_digits);
    let rendered = format!("{rounded:.max_digits$}");
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int, frac)) => (int, frac.trim_end_matches('0')),
        None => (rendered.as_str(), ""),
    };

    let mut out = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Rounds to `digits` places with ties going away from zero. `{:.N}` alone
/// would send exact ties to the even neighbour.
fn round_half_away(value: f64, digits: usize) -> f64 {
    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn normalize_negative_zero(rendered: String) -> String {
    match rendered.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => rendered,
    }
}
