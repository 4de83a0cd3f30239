/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// 0.4 -> "40%"
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

pub fn check_mark(done: bool) -> &'static str {
    if done { "●" } else { "○" }
}

/// Show free text, or a dim placeholder when empty.
pub fn or_placeholder(text: &str) -> &str {
    if text.trim().is_empty() { "—" } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 5, 5), "░░░░░");
        assert_eq!(progress_bar(2, 5, 5), "██░░░");
        assert_eq!(progress_bar(5, 5, 5), "█████");
        assert_eq!(progress_bar(7, 5, 5), "█████");
        assert_eq!(progress_bar(1, 0, 3), "░░░");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(0.4), "40%");
        assert_eq!(format_percent(1.0), "100%");
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder("  "), "—");
        assert_eq!(or_placeholder("sabr"), "sabr");
    }
}
