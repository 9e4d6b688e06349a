use chrono::{DateTime, Local};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_datetime(dt: &DateTime<Local>) -> String {
    dt.format(FORMAT).to_string()
}

/// Format a target or actual value without trailing zeros
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        let s = format!("{:.4}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Truncate a string to `max_chars` characters, marking the cut with an ellipsis
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return s.chars().take(max_chars).collect();
    }
    let truncated: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(100.0), "100.0");
        assert_eq!(format_value(80.5), "80.5");
        assert_eq!(format_value(0.125), "0.125");
        assert_eq!(format_value(-3.0), "-3.0");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(80.0), "80.00");
        assert_eq!(format_score(33.33), "33.33");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Revenue", 10), "Revenue");
        assert_eq!(truncate_string("Revenue Growth", 10), "Revenue...");
        assert_eq!(truncate_string("Revenue", 2), "Re");
        assert_eq!(truncate_string("Lernen & Wachstum", 9), "Lernen...");
    }
}
