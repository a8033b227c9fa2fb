//! Character-based cost estimation.
//!
//! Observability only: these numbers feed log lines and never affect
//! control flow. Exact provider-side accounting is the optional
//! `LlmBackend::count_tokens` operation; this module supplies the local
//! approximation used when that call is unavailable or fails.

/// Provider price per 1000 billable characters, in USD.
pub const PRICE_PER_1K_CHARS: f64 = 0.000125;

/// Estimate the cost of processing `chars` characters.
pub fn estimate_cost(chars: usize) -> f64 {
    (chars as f64 / 1000.0) * PRICE_PER_1K_CHARS
}

/// Approximate billable characters for `text`.
///
/// The provider bills non-whitespace characters, which is what this
/// counts.
pub fn billable_characters(text: &str) -> u64 {
    text.chars().filter(|c| !c.is_whitespace()).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_cost_for_2000_chars() {
        assert!((estimate_cost(2000) - 0.00025).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_cost_zero_chars() {
        assert_eq!(estimate_cost(0), 0.0);
    }

    #[test]
    fn test_billable_characters_skip_whitespace() {
        assert_eq!(billable_characters("a b\tc\nd"), 4);
        assert_eq!(billable_characters("   "), 0);
        assert_eq!(billable_characters(""), 0);
    }
}
