//! Transcript of a driven calculator session.

use serde::Serialize;

use crate::calculator::{ERROR_MARKER, Key, KeyOutcome};

/// One key press and the display it left behind.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranscriptEntry {
    /// Keypad label of the key pressed.
    pub key: String,
    /// Display text after the key.
    pub display: String,
    /// Whether the display holds the error marker.
    pub is_error: bool,
    /// Set when the key was not applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl TranscriptEntry {
    /// Record the result of pressing `key`.
    pub fn new(key: &Key, outcome: &KeyOutcome, display: &str) -> Self {
        Self {
            key: key.label(),
            display: display.to_string(),
            is_error: display == ERROR_MARKER,
            notice: outcome.notice(),
        }
    }

    /// Text to copy to the clipboard; errors have none.
    pub fn clipboard_text(&self) -> Option<&str> {
        if self.is_error {
            None
        } else {
            Some(&self.display)
        }
    }

    /// Human-readable line for terminal output.
    pub fn render(&self) -> String {
        match &self.notice {
            Some(notice) => format!("{:>6}  {}  ({})", self.key, self.display, notice),
            None => format!("{:>6}  {}", self.key, self.display),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Operator;

    #[test]
    fn test_applied_entry() {
        let entry = TranscriptEntry::new(
            &Key::Operator(Operator::Multiply),
            &KeyOutcome::Applied,
            "5",
        );
        assert_eq!(entry.key, "×");
        assert!(!entry.is_error);
        assert_eq!(entry.clipboard_text(), Some("5"));
        assert_eq!(entry.render(), "     ×  5");
    }

    #[test]
    fn test_error_entry_has_no_clipboard_text() {
        let entry = TranscriptEntry::new(&Key::Equals, &KeyOutcome::Applied, ERROR_MARKER);
        assert!(entry.is_error);
        assert_eq!(entry.clipboard_text(), None);
    }

    #[test]
    fn test_unsupported_entry_json() {
        let key = Key::Unsupported("mr".to_string());
        let entry = TranscriptEntry::new(&key, &KeyOutcome::Unsupported("mr".to_string()), "0");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"key":"mr","display":"0","is_error":false,"notice":"'mr' is not supported"}"#
        );

        let applied = TranscriptEntry::new(&Key::Digit(4), &KeyOutcome::Applied, "4");
        assert_eq!(
            serde_json::to_string(&applied).unwrap(),
            r#"{"key":"4","display":"4","is_error":false}"#
        );
    }
}
