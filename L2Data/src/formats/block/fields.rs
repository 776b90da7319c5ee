//! Bracket wrapping and line-break escaping for text fields

/// Escaping depth for line breaks inside text values.
///
/// Item text stores a break as `\n`; skill text stores it as `\\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlineEscape {
    /// `\n`
    Single,
    /// `\\n`
    Double,
}

impl NewlineEscape {
    fn marker(self) -> &'static str {
        match self {
            NewlineEscape::Single => "\\n",
            NewlineEscape::Double => "\\\\n",
        }
    }

    /// Replace real line breaks with the escaped marker
    pub fn escape(self, text: &str) -> String {
        text.replace('\n', self.marker())
    }

    /// Replace the escaped marker with real line breaks
    pub fn unescape(self, raw: &str) -> String {
        raw.replace(self.marker(), "\n")
    }
}

/// Remove one surrounding `[` `]` pair, if present
pub fn strip_brackets(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Wrap a value for storage in a bracket field.
///
/// Blank values become `[]`; values already starting with `[` are kept.
pub fn wrap_brackets(value: &str) -> String {
    if value.trim().is_empty() {
        "[]".to_string()
    } else if value.starts_with('[') {
        value.to_string()
    } else {
        format!("[{value}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_brackets() {
        assert_eq!(wrap_brackets(""), "[]");
        assert_eq!(wrap_brackets("   "), "[]");
        assert_eq!(strip_brackets("[]"), "");
    }

    #[test]
    fn test_wrap_is_idempotent() {
        assert_eq!(wrap_brackets("Small Sword"), "[Small Sword]");
        assert_eq!(wrap_brackets("[Small Sword]"), "[Small Sword]");
        assert_eq!(strip_brackets("[Small Sword]"), "Small Sword");
        assert_eq!(strip_brackets("Small Sword"), "Small Sword");
        assert_eq!(strip_brackets("["), "[");
    }

    #[test]
    fn test_escape_depths() {
        assert_eq!(NewlineEscape::Single.escape("a\nb"), "a\\nb");
        assert_eq!(NewlineEscape::Double.escape("a\nb"), "a\\\\nb");
        assert_eq!(NewlineEscape::Single.unescape("a\\nb"), "a\nb");
        assert_eq!(NewlineEscape::Double.unescape("a\\\\nb"), "a\nb");
    }
}
