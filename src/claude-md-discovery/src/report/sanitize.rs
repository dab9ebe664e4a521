//! Escaping of free text embedded in reports.

/// Longest sanitized text before truncation, in characters.
pub const MAX_TEXT_LENGTH: usize = 500;

/// Appended to truncated text.
const ELLIPSIS: &str = "...";

/// Escapes `& < > " '` as HTML entities.
#[must_use]
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// HTML-escapes `text` and cuts it to [`MAX_TEXT_LENGTH`] characters plus `...`.
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    let escaped = html_escape(text);
    if escaped.chars().count() <= MAX_TEXT_LENGTH {
        return escaped;
    }

    let mut truncated: String = escaped.chars().take(MAX_TEXT_LENGTH).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            sanitize_text("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn leaves_safe_text_alone() {
        assert_eq!(sanitize_text("A plain description"), "A plain description");
        assert_eq!(sanitize_text(""), "");
    }

    #[test]
    fn truncates_long_text() {
        let sanitized = sanitize_text(&"a".repeat(600));
        assert_eq!(sanitized.len(), MAX_TEXT_LENGTH + 3);
        assert!(sanitized.ends_with("..."));
    }

    #[test]
    fn keeps_text_at_limit() {
        assert_eq!(sanitize_text(&"a".repeat(500)), "a".repeat(500));
    }

    #[test]
    fn truncates_on_char_boundaries() {
        let sanitized = sanitize_text(&"é".repeat(501));
        assert_eq!(sanitized.chars().count(), MAX_TEXT_LENGTH + 3);
    }
}
