//! UI effect types.
//!
//! Effects are commands returned by the reducer that the host executes:
//! I/O, prompts and focus changes. The reducer itself never performs I/O.

use std::collections::BTreeMap;
use std::path::PathBuf;

use shm_core::ShmError;

use crate::events::ConfirmAction;
use crate::mirror::{SecondaryHandle, SurfaceId};

/// Severity of a [`UiEffect::Notify`] notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug)]
pub enum UiEffect {
    /// Show an error or warning. The session continues either way.
    Report(ShmError),

    /// Show an informational notice.
    Notify { level: NoticeLevel, message: String },

    /// Ask the user to confirm; answer with `Confirmed` or `Cancelled`.
    RequestConfirmation {
        action: ConfirmAction,
        prompt: &'static str,
    },

    /// Copy text to the clipboard.
    CopyToClipboard { text: String },

    /// Write a file atomically.
    WriteFile { path: PathBuf, contents: String },

    /// A secondary view was created; the host shows it.
    SecondaryOpened { handle: SecondaryHandle },

    /// A secondary view already exists; the host brings it to front.
    FocusSecondary { handle: SecondaryHandle },

    /// Scroll a surface so its last line is visible.
    ScrollToEnd { surface: SurfaceId },

    /// Persist field values keyed by field key.
    PersistFields { values: BTreeMap<String, String> },

    /// Quit the application.
    Quit,
}
