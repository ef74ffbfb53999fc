//! Income-bracket normalization.
//!
//! The survey stores income as textual bracket labels ("5,001-10,000",
//! "50,001 o más", ...).  Statistics need a representative number per label.
//!
//! Policy (fixed, not derivable from the labels themselves):
//! * closed bracket `a-b`         → midpoint `(a + b) / 2`
//! * bounded above `Menos de b`   → `b / 2`
//! * open-ended   `a o más`       → `a + OPEN_BRACKET_DELTA`
//! * anything unrecognized        → `None` (row excluded from income
//!   aggregations, kept everywhere else)

/// Added to the lower bound of an open-ended bracket: half the 5,000-wide
/// step the dataset's closed brackets use.
pub const OPEN_BRACKET_DELTA: f64 = 2_500.0;

/// Map a bracket label to its representative numeric value.
///
/// Pure and deterministic: the same label always yields the same value.
/// Tolerates `$` prefixes, thousands separators, and surrounding whitespace.
pub fn normalize_income(label: &str) -> Option<f64> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    let lower = label.to_lowercase();

    // Open-ended: "50,001 o más" / "50,001 or more" / "Más de 50,000".
    if let Some(rest) = lower
        .strip_suffix("o más")
        .or_else(|| lower.strip_suffix("o mas"))
        .or_else(|| lower.strip_suffix("or more"))
    {
        return parse_amount(rest).map(|low| low + OPEN_BRACKET_DELTA);
    }
    if let Some(rest) = lower
        .strip_prefix("más de")
        .or_else(|| lower.strip_prefix("mas de"))
        .or_else(|| lower.strip_prefix("more than"))
    {
        return parse_amount(rest).map(|low| low + OPEN_BRACKET_DELTA);
    }

    // Bounded above: "Menos de 5,000" / "Less than 5,000".
    if let Some(rest) = lower
        .strip_prefix("menos de")
        .or_else(|| lower.strip_prefix("less than"))
    {
        return parse_amount(rest).map(|high| high / 2.0);
    }

    // Closed bracket: "5,001-10,000" (also tolerates "5,001 a 10,000").
    let (a, b) = split_bracket(&lower)?;
    let low = parse_amount(a)?;
    let high = parse_amount(b)?;
    if high < low {
        return None;
    }
    Some((low + high) / 2.0)
}

/// Split "a-b" or "a a b" into its two bounds.
fn split_bracket(label: &str) -> Option<(&str, &str)> {
    if let Some((a, b)) = label.split_once('-') {
        return Some((a, b));
    }
    if let Some((a, b)) = label.split_once(" a ") {
        return Some((a, b));
    }
    None
}

/// Parse a single amount: strips `$`, thousands separators and whitespace.
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_bracket_maps_to_midpoint() {
        assert_eq!(normalize_income("5,001-10,000"), Some(7_500.5));
        assert_eq!(normalize_income("10,001 - 15,000"), Some(12_500.5));
        assert_eq!(normalize_income("$5,001 a $10,000"), Some(7_500.5));
    }

    #[test]
    fn open_ended_bracket_uses_lower_bound_plus_delta() {
        assert_eq!(normalize_income("50,001 o más"), Some(52_501.0));
        assert_eq!(normalize_income("50,001 or more"), Some(52_501.0));
        assert_eq!(normalize_income("Más de 50,000"), Some(52_500.0));
    }

    #[test]
    fn bounded_above_bracket_uses_half_the_bound() {
        assert_eq!(normalize_income("Menos de 5,000"), Some(2_500.0));
        assert_eq!(normalize_income("Less than 5,000"), Some(2_500.0));
    }

    #[test]
    fn unrecognized_labels_map_to_none() {
        assert_eq!(normalize_income(""), None);
        assert_eq!(normalize_income("   "), None);
        assert_eq!(normalize_income("sin dato"), None);
        assert_eq!(normalize_income("10,000-"), None);
        assert_eq!(normalize_income("9,000-5,000"), None);
    }

    #[test]
    fn normalization_is_deterministic() {
        let label = "15,001-20,000";
        let first = normalize_income(label);
        for _ in 0..10 {
            assert_eq!(normalize_income(label), first);
        }
    }
}
