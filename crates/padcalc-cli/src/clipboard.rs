//! Clipboard access for copying answers

use arboard::Clipboard;
use tracing::info;

use crate::error::{CliError, CliResult};

/// Copy text to the system clipboard
pub fn copy_to_clipboard(text: &str) -> CliResult<()> {
    let mut clipboard = Clipboard::new()
        .map_err(|e| CliError::clipboard(format!("failed to access clipboard: {e}")))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| CliError::clipboard(format!("failed to copy to clipboard: {e}")))?;
    info!(text, "copied answer to clipboard");
    Ok(())
}
