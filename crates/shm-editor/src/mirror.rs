//! Buffer mirror: keeps an optional secondary surface identical to the
//! primary output buffer, in either direction.
//!
//! A programmatic write into the receiving surface reports a change of its
//! own, exactly like a user edit would. The shared `syncing` flag turns that
//! report into a no-op, so propagation stops after one hop and never writes
//! back into the surface the change came from.

use enum_map::Enum;

use crate::text_buffer::TextBuffer;

/// Which text surface an event or overlay belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum SurfaceId {
    Primary,
    Secondary,
}

impl SurfaceId {
    pub fn other(self) -> SurfaceId {
        match self {
            SurfaceId::Primary => SurfaceId::Secondary,
            SurfaceId::Secondary => SurfaceId::Primary,
        }
    }
}

/// Handle to the secondary surface, returned when it is opened.
///
/// Each open produces a new handle, so a handle kept past `close_secondary`
/// no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecondaryHandle(u64);

/// Result of asking for the secondary surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryOpen {
    /// A new surface was created, seeded with the primary text.
    Opened(SecondaryHandle),
    /// A surface was already open; the host should focus it.
    Refocused(SecondaryHandle),
}

impl SecondaryOpen {
    pub fn handle(self) -> SecondaryHandle {
        match self {
            SecondaryOpen::Opened(handle) | SecondaryOpen::Refocused(handle) => handle,
        }
    }
}

/// Outcome of one `on_change` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Propagation {
    /// Surface whose content was overwritten, if any.
    pub receiver: Option<SurfaceId>,
    /// Deepest nesting of `on_change` reached, counting the outer call.
    pub depth: usize,
}

#[derive(Debug, Default)]
pub struct BufferMirror {
    primary: TextBuffer,
    secondary: Option<(SecondaryHandle, TextBuffer)>,
    next_handle: u64,
    syncing: bool,
}

impl BufferMirror {
    pub fn primary(&self) -> &TextBuffer {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&TextBuffer> {
        self.secondary.as_ref().map(|(_, buf)| buf)
    }

    pub fn secondary_handle(&self) -> Option<SecondaryHandle> {
        self.secondary.as_ref().map(|(handle, _)| *handle)
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&TextBuffer> {
        match id {
            SurfaceId::Primary => Some(&self.primary),
            SurfaceId::Secondary => self.secondary(),
        }
    }

    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut TextBuffer> {
        match id {
            SurfaceId::Primary => Some(&mut self.primary),
            SurfaceId::Secondary => self.secondary.as_mut().map(|(_, buf)| buf),
        }
    }

    /// True while a mirror write is in flight.
    pub fn is_syncing(&self) -> bool {
        self.syncing
    }

    /// Opens the secondary surface, or returns the existing one.
    pub fn open_secondary(&mut self) -> SecondaryOpen {
        if let Some(handle) = self.secondary_handle() {
            return SecondaryOpen::Refocused(handle);
        }

        self.next_handle += 1;
        let handle = SecondaryHandle(self.next_handle);
        self.secondary = Some((handle, TextBuffer::from_text(&self.primary.text())));
        tracing::debug!(?handle, "secondary_opened");
        SecondaryOpen::Opened(handle)
    }

    /// Closes the secondary surface. Returns false for a stale handle.
    pub fn close_secondary(&mut self, handle: SecondaryHandle) -> bool {
        if self.secondary_handle() != Some(handle) {
            return false;
        }
        self.secondary = None;
        tracing::debug!(?handle, "secondary_closed");
        true
    }

    /// Applies an edit to one surface, then propagates it if the content
    /// changed. Returns `None` if the surface is not open.
    pub fn edit<R>(
        &mut self,
        surface: SurfaceId,
        f: impl FnOnce(&mut TextBuffer) -> R,
    ) -> Option<(R, Option<Propagation>)> {
        let buf = self.surface_mut(surface)?;
        let before = buf.revision();
        let result = f(buf);
        let changed = buf.revision() != before;

        let propagation = changed.then(|| self.on_change(surface));
        Some((result, propagation))
    }

    /// Copies `origin`'s content into the other surface.
    ///
    /// No-op while a sync is already in flight, or when the other surface
    /// is closed.
    pub fn on_change(&mut self, origin: SurfaceId) -> Propagation {
        self.propagate(origin, 1)
    }

    fn propagate(&mut self, origin: SurfaceId, depth: usize) -> Propagation {
        let idle = Propagation {
            receiver: None,
            depth,
        };
        if self.syncing {
            return idle;
        }

        let target = origin.other();
        let Some(text) = self.surface(origin).map(TextBuffer::text) else {
            return idle;
        };
        if self.surface(target).is_none() {
            return idle;
        }

        self.syncing = true;
        let changed = self.surface_mut(target).is_some_and(|receiver| {
            let before = receiver.revision();
            receiver.set_text(&text);
            receiver.revision() != before
        });

        // Deliver the receiver's own change report; the flag swallows it.
        let inner_depth = if changed {
            self.propagate(target, depth + 1).depth
        } else {
            depth
        };
        self.syncing = false;

        tracing::debug!(?origin, ?target, changed, "mirror_synced");
        Propagation {
            receiver: Some(target),
            depth: inner_depth,
        }
    }
}
