//! Presence checks

/// Returns true when the text is empty or only whitespace
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));

        assert!(!is_blank("a"));
        assert!(!is_blank("  0  "));
    }
}
