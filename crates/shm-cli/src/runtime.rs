//! Effect runtime.
//!
//! Feeds events to the reducer and executes the effects it returns. Status
//! lines go to `out`; confirmation answers are read from `input`.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use shm_core::config::Config;
use shm_core::{ShmError, output};
use shm_editor::{AppState, NoticeLevel, UiEffect, UiEvent, update};

use crate::clipboard;

pub struct Runtime<R, W> {
    input: R,
    out: W,
    persist_fields: bool,
    strict: bool,
    quit: bool,
}

impl<R: BufRead, W: Write> Runtime<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self {
            input,
            out,
            persist_fields: true,
            strict: false,
            quit: false,
        }
    }

    /// Whether `PersistFields` writes to the config file.
    pub fn persist_fields(mut self, enabled: bool) -> Self {
        self.persist_fields = enabled;
        self
    }

    /// In strict mode reported errors (not warnings) abort with `Err`
    /// instead of being printed.
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn input(&mut self) -> &mut R {
        &mut self.input
    }

    /// Runs one event and every effect (and follow-up event) it causes.
    pub fn dispatch(&mut self, app: &mut AppState, event: UiEvent) -> Result<()> {
        let mut queue: VecDeque<UiEffect> = update(app, event).into();
        while let Some(effect) = queue.pop_front() {
            if let Some(follow_up) = self.execute(effect)? {
                queue.extend(update(app, follow_up));
            }
        }
        Ok(())
    }

    fn execute(&mut self, effect: UiEffect) -> Result<Option<UiEvent>> {
        match effect {
            UiEffect::Report(err) => self.report(err)?,
            UiEffect::Notify { level, message } => {
                let label = match level {
                    NoticeLevel::Info => "info",
                    NoticeLevel::Warning => "warning",
                };
                writeln!(self.out, "{label}: {message}")?;
            }
            UiEffect::RequestConfirmation { action, prompt } => {
                let follow_up = if self.confirm(prompt)? {
                    UiEvent::Confirmed(action)
                } else {
                    UiEvent::Cancelled
                };
                return Ok(Some(follow_up));
            }
            UiEffect::CopyToClipboard { text } => match clipboard::copy(&text) {
                Ok(()) => writeln!(
                    self.out,
                    "Copied {} characters to the clipboard",
                    text.chars().count()
                )?,
                Err(err) => {
                    tracing::warn!(%err, "clipboard_failed");
                    if self.strict {
                        return Err(err).context("copy to clipboard");
                    }
                    writeln!(self.out, "error: {err}")?;
                }
            },
            UiEffect::WriteFile { path, contents } => self.write_file(&path, &contents)?,
            UiEffect::SecondaryOpened { handle } => {
                tracing::debug!(?handle, "secondary_shown");
                writeln!(self.out, "Opened the secondary view")?;
            }
            UiEffect::FocusSecondary { handle } => {
                tracing::debug!(?handle, "secondary_focused");
                writeln!(self.out, "The secondary view is already open")?;
            }
            UiEffect::ScrollToEnd { surface } => {
                tracing::trace!(?surface, "scroll_to_end");
            }
            UiEffect::PersistFields { values } => {
                if self.persist_fields
                    && let Err(err) = Config::save_fields(&values)
                {
                    tracing::warn!(error = %format!("{err:#}"), "persist_fields_failed");
                    if self.strict {
                        return Err(err);
                    }
                    writeln!(self.out, "warning: {err:#}")?;
                }
            }
            UiEffect::Quit => self.quit = true,
        }
        Ok(None)
    }

    fn report(&mut self, err: ShmError) -> Result<()> {
        if err.is_warning() {
            writeln!(self.out, "warning: {err}")?;
            return Ok(());
        }
        if self.strict {
            return Err(err.into());
        }
        writeln!(self.out, "error: {err}")?;
        Ok(())
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()> {
        let path = output::with_default_extension(path);
        match output::write_atomic(&path, contents) {
            Ok(()) => {
                writeln!(self.out, "Saved to {}", path.display())?;
                Ok(())
            }
            Err(err) => {
                tracing::error!(path = %path.display(), %err, "save_failed");
                self.report(err)
            }
        }
    }

    /// Asks a yes/no question. End of input counts as "no".
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.out, "{prompt} [y/N] ")?;
        self.out.flush()?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .context("read confirmation")?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use shm_editor::ConfirmAction;
    use shm_editor::fields::FieldId;

    use super::*;

    fn runtime(input: &str) -> Runtime<Cursor<Vec<u8>>, Vec<u8>> {
        Runtime::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()).persist_fields(false)
    }

    fn printed(rt: &mut Runtime<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(rt.out()).into_owned()
    }

    fn generate_twice(app: &mut AppState) {
        app.fields.set(FieldId::NumberOfShines, "2");
        let mut rt = runtime("");
        rt.dispatch(app, UiEvent::Generate).unwrap();
    }

    #[test]
    fn test_declined_confirmation_keeps_output() {
        let mut app = AppState::default();
        generate_twice(&mut app);
        let mut rt = runtime("n\n");

        rt.dispatch(&mut app, UiEvent::Clear).unwrap();

        assert_eq!(app.log.count(), 2);
        assert_eq!(app.pending_confirmation(), None);
        assert!(printed(&mut rt).contains(ConfirmAction::ClearOutput.prompt()));
    }

    #[test]
    fn test_accepted_confirmation_clears_output() {
        let mut app = AppState::default();
        generate_twice(&mut app);
        let mut rt = runtime("yes\n");

        rt.dispatch(&mut app, UiEvent::Clear).unwrap();

        assert!(app.log.is_empty());
        assert_eq!(app.output_text(), "");
    }

    #[test]
    fn test_end_of_input_declines() {
        let mut app = AppState::default();
        let mut rt = runtime("");

        rt.dispatch(&mut app, UiEvent::ResetFields).unwrap();

        assert_eq!(app.pending_confirmation(), None);
    }

    #[test]
    fn test_accepted_reset_prints_info_notice() {
        let mut app = AppState::default();
        app.fields.set(FieldId::Name, "beacon");
        let mut rt = runtime("y\n");

        rt.dispatch(&mut app, UiEvent::ResetFields).unwrap();

        assert_eq!(app.fields.raw(FieldId::Name), "");
        assert!(printed(&mut rt).contains("info: Every field is back to its default value"));
    }

    #[test]
    fn test_strict_mode_fails_on_malformed_count() {
        let mut app = AppState::default();
        app.fields.set(FieldId::NumberOfShines, "abc");
        let mut rt = runtime("").strict(true);

        let err = rt.dispatch(&mut app, UiEvent::Generate).unwrap_err();

        assert!(err.to_string().contains("positive whole number"));
    }

    #[test]
    fn test_lenient_mode_prints_errors_and_warnings() {
        let mut app = AppState::default();
        app.fields.set(FieldId::NumberOfShines, "0");
        let mut rt = runtime("");

        rt.dispatch(&mut app, UiEvent::Generate).unwrap();
        rt.dispatch(
            &mut app,
            UiEvent::Save {
                path: "unused".into(),
            },
        )
        .unwrap();

        let out = printed(&mut rt);
        assert!(out.contains("error: Number of Shines"));
        assert!(out.contains("warning: Nothing to save"));
    }

    #[test]
    fn test_save_appends_default_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = AppState::default();
        let mut rt = runtime("");
        rt.dispatch(&mut app, UiEvent::Generate).unwrap();

        rt.dispatch(
            &mut app,
            UiEvent::Save {
                path: dir.path().join("shines"),
            },
        )
        .unwrap();

        let saved = std::fs::read_to_string(dir.path().join("shines.txt")).unwrap();
        assert!(saved.starts_with("spriteTypes = {\n"));
        assert!(printed(&mut rt).contains("Saved to"));
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut app = AppState::default();
        let mut rt = runtime("");

        rt.dispatch(&mut app, UiEvent::Quit).unwrap();

        assert!(rt.should_quit());
    }
}
