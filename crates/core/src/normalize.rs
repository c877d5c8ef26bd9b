//! Normalization of optional text fields.
//!
//! The backend stores absent optional fields as NULL, while the editing
//! surface hands us whatever the user typed. The rule applied uniformly
//! at the repository boundary is: trim, and treat the empty result as
//! absent.

/// Normalize an optional text field: trim whitespace, map empty to `None`.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize a field that is already optional, collapsing blank values.
pub fn collapse_blank(value: Option<&str>) -> Option<String> {
    value.and_then(optional_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(optional_text("call the client"), Some("call the client".to_string()));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(optional_text("  follow up  "), Some("follow up".to_string()));
    }

    #[test]
    fn empty_becomes_absent() {
        assert_eq!(optional_text(""), None);
    }

    #[test]
    fn whitespace_only_becomes_absent() {
        assert_eq!(optional_text("   "), None);
    }

    #[test]
    fn collapse_blank_handles_both_layers() {
        assert_eq!(collapse_blank(None), None);
        assert_eq!(collapse_blank(Some("  ")), None);
        assert_eq!(collapse_blank(Some(" ok ")), Some("ok".to_string()));
    }
}
