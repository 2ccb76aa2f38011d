//! Clipboard functionality for copying calculator results.

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use super::format::ERROR_MARKER;

/// Copy a display value to the system clipboard.
///
/// The error marker is never copied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    if text == ERROR_MARKER {
        bail!("Refusing to copy an error result");
    }

    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to copy to clipboard")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_marker_not_copied() {
        let err = copy_to_clipboard(ERROR_MARKER).unwrap_err();
        assert!(err.to_string().contains("error result"));
    }
}
