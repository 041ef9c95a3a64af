//! Shared utility functions

use unicode_width::UnicodeWidthChar;

/// Truncate a string to at most `max_chars` characters, appending an
/// ellipsis when anything was cut. Used for the badge fields the backend
/// does not bound itself (content type, source IP).
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Truncate a single feed line to fit `max_width` terminal columns.
///
/// Uses unicode display width (not byte or char length) so emojis and CJK
/// text are measured by the columns they actually occupy.
pub fn fit_line(line: &str, max_width: usize) -> String {
    let mut current_width = 0;
    let mut truncate_at = line.len();
    let mut overflow = false;

    for (i, c) in line.char_indices() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            truncate_at = i;
            overflow = true;
            break;
        }
        current_width += char_width;
    }

    if !overflow {
        return line.to_string();
    }
    let mut out = line[..truncate_at].to_string();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_shorter_than_max() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn truncate_caps_char_count() {
        // 48-char cap on content types, per the display contract
        let long = "a".repeat(60);
        let cut = truncate_chars(&long, 48);
        assert_eq!(cut.chars().count(), 48);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn truncate_multibyte() {
        assert_eq!(truncate_chars("日本語テスト", 4), "日本語…");
    }

    #[test]
    fn fit_line_respects_display_width() {
        // Each CJK char is 2 columns wide
        let fitted = fit_line("日本語", 5);
        assert_eq!(fitted, "日本…");
    }

    #[test]
    fn fit_line_no_overflow_unchanged() {
        assert_eq!(fit_line("short", 40), "short");
    }
}
