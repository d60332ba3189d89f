//! Error taxonomy shared by the editor core and the CLI.
//!
//! A corrupt config file has no variant here: it degrades to
//! defaults with a logged warning instead of surfacing as an error.

use std::io;
use std::path::PathBuf;

/// Errors reported to the user. None of them end the session.
#[derive(Debug, thiserror::Error)]
pub enum ShmError {
    /// The "Number of Shines" field is not a positive whole number.
    #[error("Number of Shines must be a positive whole number, got {value:?}")]
    MalformedCount { value: String },

    /// The "Number of Shines" field parses but exceeds the per-generate cap.
    #[error("Number of Shines must be at most {max}, got {value:?}")]
    TooManyShines { value: String, max: u32 },

    /// Save requested while the output buffer is blank.
    #[error("Nothing to save: the output is empty")]
    EmptySave,

    /// Reading or writing a file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ShmError {
    /// Returns true for conditions shown as warnings rather than errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, ShmError::EmptySave)
    }
}
