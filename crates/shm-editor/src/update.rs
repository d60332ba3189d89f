//! Reducer.
//!
//! All state mutations happen here. The host calls `update(app, event)` and
//! executes the returned effects.

use std::path::PathBuf;

use shm_core::ShmError;
use shm_core::config::Layout;

use crate::effects::{NoticeLevel, UiEffect};
use crate::entry_log::BLOCK_SEPARATOR;
use crate::events::{ConfirmAction, UiEvent};
use crate::mirror::{SecondaryOpen, SurfaceId};
use crate::state::AppState;
use crate::template;
use crate::text_buffer::TextBuffer;

/// Takes the current state and an event, mutates state, and returns effects
/// for the host to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::SetField { field, value } => {
            app.fields.set(field, value);
            vec![]
        }
        UiEvent::Generate => handle_generate(app),
        UiEvent::Key { surface, key } => handle_edit(app, surface, |buf| {
            buf.input(key);
        }),
        UiEvent::Paste { surface, text } => {
            handle_edit(app, surface, |buf| buf.insert_str(&text))
        }
        UiEvent::ReplaceText { surface, text } => {
            handle_edit(app, surface, |buf| buf.set_text(&text))
        }
        UiEvent::Clear => {
            if app.log.needs_clear_confirmation() {
                request_confirmation(app, ConfirmAction::ClearOutput)
            } else {
                clear_output(app);
                vec![]
            }
        }
        UiEvent::ResetFields => request_confirmation(app, ConfirmAction::ResetFields),
        UiEvent::Confirmed(action) => handle_confirmed(app, action),
        UiEvent::Cancelled => {
            if let Some(action) = app.pending_confirmation.take() {
                tracing::debug!(?action, "confirmation_cancelled");
            }
            vec![]
        }
        UiEvent::Copy => handle_copy(app),
        UiEvent::Save { path } => handle_save(app, path),
        UiEvent::OpenSecondary => handle_open_secondary(app),
        UiEvent::CloseSecondary(handle) => {
            if app.mirror.close_secondary(handle) {
                app.viewports[SurfaceId::Secondary] = Default::default();
                app.reannotate(SurfaceId::Secondary);
            } else {
                tracing::debug!(?handle, "stale_secondary_handle");
            }
            vec![]
        }
        UiEvent::SetHighlight(enabled) => {
            set_highlighting(app, enabled);
            vec![]
        }
        UiEvent::ToggleHighlight => {
            let enabled = !app.annotator.highlighting();
            set_highlighting(app, enabled);
            vec![]
        }
        UiEvent::SetGutterMode(mode) => {
            if app.annotator.gutter_mode() != mode {
                app.annotator.set_gutter_mode(mode);
                app.reannotate_all();
            }
            vec![]
        }
        UiEvent::Resize { surface, height } => {
            app.viewports[surface].height = Some(height);
            app.reannotate(surface);
            vec![]
        }
        UiEvent::Scroll { surface, first_row } => {
            app.viewports[surface].first_row = first_row;
            app.reannotate(surface);
            vec![]
        }
        UiEvent::Quit => vec![
            UiEffect::PersistFields {
                values: app.fields.to_persisted(),
            },
            UiEffect::Quit,
        ],
    }
}

fn handle_generate(app: &mut AppState) -> Vec<UiEffect> {
    let values = app.fields.snapshot();
    let blocks = match template::render_all(&values, app.layout) {
        Ok(blocks) => blocks,
        Err(err) => {
            tracing::warn!(%err, "generate_rejected");
            return vec![UiEffect::Report(err)];
        }
    };

    let count = blocks.len();
    let mut text = String::new();
    for block in blocks {
        text.push_str(block.as_str());
        text.push_str(BLOCK_SEPARATOR);
        app.log.append(block);
    }

    app.mirror.edit(SurfaceId::Primary, |buf| buf.append_str(&text));
    app.scroll_to_end(SurfaceId::Primary);
    app.reannotate_all();
    tracing::debug!(count, total = app.log.count(), layout = %app.layout, "generated");

    vec![UiEffect::ScrollToEnd {
        surface: SurfaceId::Primary,
    }]
}

fn handle_edit(
    app: &mut AppState,
    surface: SurfaceId,
    f: impl FnOnce(&mut TextBuffer),
) -> Vec<UiEffect> {
    let Some(((), propagation)) = app.mirror.edit(surface, f) else {
        tracing::debug!(?surface, "edit_on_closed_surface");
        return vec![];
    };

    if let Some(propagation) = propagation {
        app.log_authoritative = false;
        tracing::trace!(?surface, depth = propagation.depth, "edited");
        app.reannotate_all();
    }
    vec![]
}

fn request_confirmation(app: &mut AppState, action: ConfirmAction) -> Vec<UiEffect> {
    app.pending_confirmation = Some(action);
    vec![UiEffect::RequestConfirmation {
        action,
        prompt: action.prompt(),
    }]
}

fn handle_confirmed(app: &mut AppState, action: ConfirmAction) -> Vec<UiEffect> {
    if app.pending_confirmation != Some(action) {
        tracing::debug!(?action, "unrequested_confirmation");
        return vec![];
    }
    app.pending_confirmation = None;

    match action {
        ConfirmAction::ClearOutput => {
            clear_output(app);
            vec![]
        }
        ConfirmAction::ResetFields => {
            app.fields.reset_all();
            tracing::debug!("fields_reset");
            vec![UiEffect::Notify {
                level: NoticeLevel::Info,
                message: "Every field is back to its default value".to_string(),
            }]
        }
    }
}

fn clear_output(app: &mut AppState) {
    app.log.clear();
    app.mirror.edit(SurfaceId::Primary, |buf| buf.set_text(""));
    app.log_authoritative = true;
    app.viewports[SurfaceId::Primary].first_row = 0;
    app.viewports[SurfaceId::Secondary].first_row = 0;
    app.reannotate_all();
    tracing::debug!("output_cleared");
}

fn handle_copy(app: &AppState) -> Vec<UiEffect> {
    let text = app.output_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return vec![UiEffect::Notify {
            level: NoticeLevel::Warning,
            message: "Nothing to copy".to_string(),
        }];
    }
    vec![UiEffect::CopyToClipboard {
        text: trimmed.to_string(),
    }]
}

fn handle_save(app: &AppState, path: PathBuf) -> Vec<UiEffect> {
    if app.mirror.primary().is_blank() {
        tracing::warn!(path = %path.display(), "save_rejected_empty");
        return vec![UiEffect::Report(ShmError::EmptySave)];
    }

    let mut effects = Vec::new();
    let contents = match app.layout {
        Layout::Classic => {
            if !app.log_authoritative {
                effects.push(UiEffect::Notify {
                    level: NoticeLevel::Warning,
                    message: "Manual edits to the output are not included in the saved file"
                        .to_string(),
                });
            }
            template::wrap_sprite_types(app.log.blocks())
        }
        Layout::Tabbed => app.output_text(),
    };

    effects.push(UiEffect::WriteFile { path, contents });
    effects
}

fn handle_open_secondary(app: &mut AppState) -> Vec<UiEffect> {
    match app.mirror.open_secondary() {
        SecondaryOpen::Opened(handle) => {
            app.viewports[SurfaceId::Secondary] = Default::default();
            app.reannotate(SurfaceId::Secondary);
            vec![UiEffect::SecondaryOpened { handle }]
        }
        SecondaryOpen::Refocused(handle) => vec![UiEffect::FocusSecondary { handle }],
    }
}

fn set_highlighting(app: &mut AppState, enabled: bool) {
    app.annotator.set_highlighting(enabled);
    app.reannotate_all();
    tracing::debug!(enabled, "highlighting_set");
}
