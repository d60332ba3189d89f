//! Presentation overlays derived from buffer content.
//!
//! Both passes are recomputed in full from the text on every change; nothing
//! is patched incrementally.

pub mod gutter;
pub mod highlight;

pub use gutter::{
    Gutter, GutterLabel, GutterMode, Viewport, line_numbers, row_count, visual_row_ranges,
};
pub use highlight::{HighlightKind, HighlightOverlay, HighlightSpan, highlight};

/// Overlays for one surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotations {
    pub gutter: Gutter,
    pub highlights: HighlightOverlay,
}

/// Annotation settings shared by every surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotator {
    gutter_mode: GutterMode,
    highlighting: bool,
}

impl Default for Annotator {
    fn default() -> Self {
        Self {
            gutter_mode: GutterMode::Logical,
            highlighting: true,
        }
    }
}

impl Annotator {
    pub fn new(gutter_mode: GutterMode, highlighting: bool) -> Self {
        Self {
            gutter_mode,
            highlighting,
        }
    }

    pub fn gutter_mode(&self) -> GutterMode {
        self.gutter_mode
    }

    pub fn set_gutter_mode(&mut self, mode: GutterMode) {
        self.gutter_mode = mode;
    }

    pub fn highlighting(&self) -> bool {
        self.highlighting
    }

    /// Turns highlighting on or off. Callers recompute annotations afterwards.
    pub fn set_highlighting(&mut self, enabled: bool) {
        self.highlighting = enabled;
    }

    /// Derives both overlays for `text`. With highlighting off the overlay
    /// is empty.
    pub fn annotate(&self, text: &str, viewport: Viewport) -> Annotations {
        let gutter = line_numbers(text, self.gutter_mode, viewport);
        let highlights = if self.highlighting {
            highlight(text)
        } else {
            HighlightOverlay::default()
        };
        tracing::trace!(
            rows = gutter.total_rows(),
            spans = highlights.spans().len(),
            "annotated"
        );
        Annotations { gutter, highlights }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "SpriteType = {\n    name = \"a_shine\"\n    animationtime = 4\n}";

    #[test]
    fn test_disabled_highlighting_clears_spans() {
        let mut annotator = Annotator::default();
        annotator.set_highlighting(false);

        let annotations = annotator.annotate(TEXT, Viewport::default());

        assert!(annotations.highlights.is_empty());
        assert_eq!(annotations.gutter.total_rows(), 4);
    }

    #[test]
    fn test_toggle_off_on_matches_direct_pass() {
        let mut annotator = Annotator::default();
        let direct = annotator.annotate(TEXT, Viewport::default());

        annotator.set_highlighting(false);
        let _ = annotator.annotate(TEXT, Viewport::default());
        annotator.set_highlighting(true);
        let toggled = annotator.annotate(TEXT, Viewport::default());

        assert_eq!(toggled, direct);
        assert_eq!(toggled.highlights, highlight(TEXT));
    }
}
