//! Line-number gutter.
//!
//! Numbers either logical lines or visual rows. In visual mode every row a
//! long line wraps onto gets its own number, wrapping by character at the
//! given display width (measured with `unicode-width`).

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// How gutter rows are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GutterMode {
    /// One number per `\n`-separated line.
    #[default]
    Logical,
    /// One number per visual row at this display width.
    Visual { width: u16 },
}

impl GutterMode {
    /// Visual numbering at `width`, or logical numbering without a width.
    pub fn from_wrap_width(width: Option<u16>) -> Self {
        match width {
            Some(width) if width > 0 => GutterMode::Visual { width },
            _ => GutterMode::Logical,
        }
    }
}

/// The visible row range of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First visible row (0-based, in gutter rows).
    pub first_row: usize,
    /// Visible row count; `None` shows everything.
    pub height: Option<usize>,
}

impl Viewport {
    /// Viewport with `height` rows whose last row is the document's last row.
    pub fn scrolled_to_end(total_rows: usize, height: usize) -> Self {
        Self {
            first_row: total_rows.saturating_sub(height),
            height: Some(height),
        }
    }
}

/// One gutter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterLabel {
    /// 1-based number shown in the gutter.
    pub number: usize,
    /// 0-based logical line this row belongs to.
    pub line: usize,
    /// True for soft-wrapped continuation rows.
    pub continuation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gutter {
    labels: Vec<GutterLabel>,
    total_rows: usize,
    digits: usize,
}

impl Gutter {
    /// Labels for the visible rows.
    pub fn labels(&self) -> &[GutterLabel] {
        &self.labels
    }

    /// Row count of the whole document, visible or not.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Column width needed for the widest number in the document.
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Gutter text: one right-aligned number per visible row.
    pub fn render(&self) -> String {
        self.labels
            .iter()
            .map(|label| format!("{:>width$}", label.number, width = self.digits))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Computes gutter labels for `text` within `viewport`.
pub fn line_numbers(text: &str, mode: GutterMode, viewport: Viewport) -> Gutter {
    let mut rows: Vec<(usize, bool)> = Vec::new();
    for (line_idx, line) in text.split('\n').enumerate() {
        let count = match mode {
            GutterMode::Logical => 1,
            GutterMode::Visual { width } => visual_rows(line, usize::from(width)),
        };
        rows.extend((0..count).map(|i| (line_idx, i > 0)));
    }

    let total_rows = rows.len();
    let digits = total_rows.to_string().len();
    let end = viewport
        .height
        .map_or(total_rows, |h| viewport.first_row.saturating_add(h).min(total_rows));
    let start = viewport.first_row.min(end);

    let labels = rows[start..end]
        .iter()
        .enumerate()
        .map(|(offset, &(line, continuation))| GutterLabel {
            number: start + offset + 1,
            line,
            continuation,
        })
        .collect();

    Gutter {
        labels,
        total_rows,
        digits,
    }
}

/// Row count of `text` under `mode`, the same count [`line_numbers`] uses.
pub fn row_count(text: &str, mode: GutterMode) -> usize {
    text.split('\n')
        .map(|line| match mode {
            GutterMode::Logical => 1,
            GutterMode::Visual { width } => visual_rows(line, usize::from(width)),
        })
        .sum()
}

/// Number of rows `line` occupies when wrapped by character at `width`.
fn visual_rows(line: &str, width: usize) -> usize {
    visual_row_ranges(line, width).len()
}

/// Byte ranges of the rows `line` wraps onto at `width` display columns.
/// Always at least one range; a zero width disables wrapping.
pub fn visual_row_ranges(line: &str, width: usize) -> Vec<Range<usize>> {
    if width == 0 {
        return vec![0..line.len()];
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (idx, ch) in line.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > width && used > 0 {
            ranges.push(start..idx);
            start = idx;
            used = 0;
        }
        used += w;
    }
    ranges.push(start..line.len());
    ranges
}
