//! Shine Maker editor core.
//!
//! Turns field values into `SpriteType` markup, keeps it in an output buffer
//! that can be mirrored into a second view, and derives line-number and
//! highlight overlays from the text. Hosts drive everything through
//! [`update`] and execute the [`UiEffect`]s it returns.

pub mod annotate;
pub mod effects;
pub mod entry_log;
pub mod events;
pub mod fields;
pub mod mirror;
pub mod state;
pub mod template;
pub mod text_buffer;
pub mod update;

pub use effects::{NoticeLevel, UiEffect};
pub use events::{ConfirmAction, UiEvent};
pub use state::AppState;
pub use update::update;
