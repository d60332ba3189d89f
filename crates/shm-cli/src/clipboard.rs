//! Clipboard access for copied markup.
//!
//! A terminal on stdout gets an OSC 52 sequence, which also reaches the
//! local clipboard over SSH. The system clipboard (`arboard`) is the
//! fallback.

use std::io::{self, IsTerminal, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("OSC 52 clipboard failed: {0}")]
    Osc52(#[from] io::Error),
    #[error("System clipboard failed: {0}")]
    System(#[from] arboard::Error),
}

/// Places `text` on the clipboard.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    let mut stdout = io::stdout();
    if stdout.is_terminal() {
        match write_osc52(&mut stdout, text) {
            Ok(()) => {
                tracing::debug!(transport = "osc52", bytes = text.len(), "copied");
                return Ok(());
            }
            Err(err) => tracing::debug!(%err, "osc52_failed"),
        }
    }

    arboard::Clipboard::new()?.set_text(text)?;
    tracing::debug!(transport = "system", bytes = text.len(), "copied");
    Ok(())
}

/// ESC ] 52 ; c ; <base64> ESC \
fn write_osc52(out: &mut impl Write, text: &str) -> Result<(), ClipboardError> {
    write!(out, "\x1b]52;c;{}\x1b\\", STANDARD.encode(text))?;
    out.flush()?;
    Ok(())
}
