//! Application state.
//!
//! ```text
//! AppState
//! ├── fields: FieldStore        (form values)
//! ├── log: EntryLog             (blocks generated so far)
//! ├── mirror: BufferMirror      (primary + optional secondary surface)
//! ├── annotator: Annotator      (gutter mode, highlight switch)
//! ├── annotations[surface]      (derived overlays, per surface)
//! └── viewports[surface]        (visible rows, per surface)
//! ```
//!
//! All of it is owned here and mutated only by [`crate::update::update`].

use enum_map::EnumMap;
use shm_core::config::{Config, Layout};

use crate::annotate::{Annotations, Annotator, GutterMode, Viewport, row_count};
use crate::entry_log::EntryLog;
use crate::events::ConfirmAction;
use crate::fields::{BlankPolicy, FieldStore};
use crate::mirror::{BufferMirror, SurfaceId};

/// Blank-field substitution used by each layout.
pub fn blank_policy(layout: Layout) -> BlankPolicy {
    match layout {
        Layout::Classic => BlankPolicy::Placeholder,
        Layout::Tabbed => BlankPolicy::FieldDefault,
    }
}

#[derive(Debug)]
pub struct AppState {
    pub fields: FieldStore,
    pub layout: Layout,
    pub log: EntryLog,
    pub mirror: BufferMirror,
    pub annotator: Annotator,
    annotations: EnumMap<SurfaceId, Annotations>,
    pub(crate) viewports: EnumMap<SurfaceId, Viewport>,
    /// False once the user edits the output by hand. While true the primary
    /// text equals `log.text()`.
    pub(crate) log_authoritative: bool,
    pub(crate) pending_confirmation: Option<ConfirmAction>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Layout::default(), Annotator::default())
    }
}

impl AppState {
    pub fn new(layout: Layout, annotator: Annotator) -> Self {
        let mut state = Self {
            fields: FieldStore::new(blank_policy(layout)),
            layout,
            log: EntryLog::default(),
            mirror: BufferMirror::default(),
            annotator,
            annotations: EnumMap::default(),
            viewports: EnumMap::default(),
            log_authoritative: true,
            pending_confirmation: None,
        };
        state.reannotate_all();
        state
    }

    /// Builds the session state from the user's config, restoring the
    /// remembered field values.
    pub fn from_config(config: &Config) -> Self {
        let annotator = Annotator::new(
            GutterMode::from_wrap_width(config.editor.wrap_width),
            config.editor.highlight,
        );
        let mut state = Self::new(config.editor.layout, annotator);
        state.fields.load_persisted(&config.fields);
        state
    }

    /// Full text of the primary output buffer.
    pub fn output_text(&self) -> String {
        self.mirror.primary().text()
    }

    /// Whether the primary text still mirrors the entry log exactly.
    pub fn log_authoritative(&self) -> bool {
        self.log_authoritative
    }

    pub fn pending_confirmation(&self) -> Option<ConfirmAction> {
        self.pending_confirmation
    }

    pub fn annotations(&self, surface: SurfaceId) -> &Annotations {
        &self.annotations[surface]
    }

    pub fn viewport(&self, surface: SurfaceId) -> Viewport {
        self.viewports[surface]
    }

    /// Recomputes the overlays of one surface. A closed surface gets empty
    /// overlays.
    pub fn reannotate(&mut self, surface: SurfaceId) {
        self.annotations[surface] = match self.mirror.surface(surface) {
            Some(buf) => self
                .annotator
                .annotate(&buf.text(), self.viewports[surface]),
            None => Annotations::default(),
        };
    }

    pub fn reannotate_all(&mut self) {
        self.reannotate(SurfaceId::Primary);
        self.reannotate(SurfaceId::Secondary);
    }

    /// Moves the viewport of `surface` so its last row is visible.
    pub(crate) fn scroll_to_end(&mut self, surface: SurfaceId) {
        let Some(height) = self.viewports[surface].height else {
            return;
        };
        let Some(buf) = self.mirror.surface(surface) else {
            return;
        };
        let total = row_count(&buf.text(), self.annotator.gutter_mode());
        self.viewports[surface] = Viewport::scrolled_to_end(total, height);
    }
}
