//! Formatting utilities used for CLI and export outputs.

/// Remove every whitespace character, not just the ends.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Comparison key for search terms and fields: whitespace removed,
/// lowercased with full Unicode rules. The store registers the same
/// function in SQL so cache matching and totals agree.
pub fn casefold(s: &str) -> String {
    strip_whitespace(s).to_lowercase()
}

/// Render an hours value the way a spreadsheet would show it:
/// integral values without a fractional part, others with at most two decimals.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        let s = format!("{:.2}", hours);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_whitespace_removes_inner_spaces() {
        assert_eq!(strip_whitespace(" Alpha  Contract\t1 "), "AlphaContract1");
        assert_eq!(strip_whitespace("   "), "");
    }

    #[test]
    fn casefold_handles_non_ascii() {
        assert_eq!(casefold(" Über Bau "), "überbau");
        assert_eq!(casefold("ÉCLAIR"), "éclair");
    }

    #[test]
    fn hours_formatting() {
        assert_eq!(format_hours(8.0), "8");
        assert_eq!(format_hours(7.5), "7.5");
        assert_eq!(format_hours(0.25), "0.25");
        assert_eq!(format_hours(1.0 / 3.0), "0.33");
        assert_eq!(format_hours(0.0), "0");
    }
}
