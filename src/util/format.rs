//! Display formatting helpers

/// Format a score with thousands separators, e.g. `-1,200`
pub fn format_score(score: i64) -> String {
    let digits = score.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if score < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a cell value with a leading dollar sign, e.g. `$400`
pub fn format_points(points: i64) -> String {
    format!("${}", format_score(points))
}

/// Shorten `text` to at most `width` characters, marking the cut with `…`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(400), "400");
        assert_eq!(format_score(1200), "1,200");
        assert_eq!(format_score(-300), "-300");
        assert_eq!(format_score(-1_234_567), "-1,234,567");
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(2000), "$2,000");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("History", 10), "History");
        assert_eq!(truncate("Geography", 5), "Geog…");
        assert_eq!(truncate("abc", 0), "");
    }
}
