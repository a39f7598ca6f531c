//! Text helpers shared by the outer layers.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Used for log previews of persona replies, which are frequently Cyrillic
/// and emoji-heavy.
pub fn preview(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Split off the first whitespace-delimited token.
///
/// Returns `(token, rest)` with `rest` trimmed; `None` when `s` is blank.
pub fn split_first_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => Some((head, tail.trim())),
        None => Some((s, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cyrillic_boundary() {
        // Each Cyrillic letter is 2 bytes
        let s = "привет";
        assert_eq!(preview(s, 3), "п");
        assert_eq!(preview(s, 4), "пр");
    }

    #[test]
    fn preview_no_op_when_short() {
        assert_eq!(preview("hi", 10), "hi");
    }

    #[test]
    fn split_first_token_variants() {
        assert_eq!(
            split_first_token("  CEO how to grow?  "),
            Some(("CEO", "how to grow?"))
        );
        assert_eq!(split_first_token("CEO"), Some(("CEO", "")));
        assert_eq!(split_first_token("   "), None);
    }
}
