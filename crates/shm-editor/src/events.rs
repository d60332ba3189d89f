//! UI event types.
//!
//! Everything the host shell can tell the core. Events go through
//! [`crate::update::update`], which mutates state and returns effects.

use std::path::PathBuf;

use crossterm::event::KeyEvent;

use crate::annotate::GutterMode;
use crate::fields::FieldId;
use crate::mirror::{SecondaryHandle, SurfaceId};

/// Actions that only run after the user confirms them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Clear the entry log and the output buffer.
    ClearOutput,
    /// Restore every field to its default.
    ResetFields,
}

impl ConfirmAction {
    /// Question the host shows the user.
    pub fn prompt(self) -> &'static str {
        match self {
            ConfirmAction::ClearOutput => "Are you sure you want to clear the contents?",
            ConfirmAction::ResetFields => "Reset every field to its default value?",
        }
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A field's text changed.
    SetField { field: FieldId, value: String },
    /// Render the current fields and append the result.
    Generate,
    /// Key press in a text surface.
    Key { surface: SurfaceId, key: KeyEvent },
    /// Text pasted at the cursor of a surface.
    Paste { surface: SurfaceId, text: String },
    /// Whole content of a surface replaced by the host.
    ReplaceText { surface: SurfaceId, text: String },
    /// Clear the output (asks for confirmation with more than one entry).
    Clear,
    /// Reset all fields (always asks for confirmation).
    ResetFields,
    /// The user accepted a pending confirmation.
    Confirmed(ConfirmAction),
    /// The user declined a pending confirmation.
    Cancelled,
    /// Copy the output to the clipboard.
    Copy,
    /// Save the output to a file.
    Save { path: PathBuf },
    /// Open (or focus) the mirrored secondary view.
    OpenSecondary,
    /// Close the secondary view.
    CloseSecondary(SecondaryHandle),
    /// Turn syntax highlighting on or off.
    SetHighlight(bool),
    ToggleHighlight,
    /// Switch between logical and visual line numbering.
    SetGutterMode(GutterMode),
    /// Visible row count of a surface changed.
    Resize { surface: SurfaceId, height: usize },
    /// First visible row of a surface changed.
    Scroll { surface: SurfaceId, first_row: usize },
    /// The application is shutting down.
    Quit,
}
