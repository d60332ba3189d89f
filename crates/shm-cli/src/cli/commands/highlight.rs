//! Annotated printing: gutter numbers plus colored highlight spans.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use crossterm::style::{Color, Stylize, style};
use shm_editor::annotate::{
    Annotations, Annotator, GutterMode, HighlightKind, HighlightOverlay, Viewport,
    visual_row_ranges,
};

pub fn run(file: Option<&Path>, wrap: Option<u16>, color: bool, spans: bool) -> Result<()> {
    let text = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };
    let text = text.strip_suffix('\n').unwrap_or(&text);

    let mode = GutterMode::from_wrap_width(wrap);
    let annotations = Annotator::new(mode, true).annotate(text, Viewport::default());

    if spans {
        println!("{}", span_table(text, &annotations.highlights));
    } else {
        let color = color && io::stdout().is_terminal();
        print!("{}", render_annotated(text, &annotations, mode, color));
    }
    Ok(())
}

/// Renders the rows covered by the gutter labels, each prefixed with its
/// number. With `color`, highlighted spans get ANSI colors.
pub fn render_annotated(
    text: &str,
    annotations: &Annotations,
    mode: GutterMode,
    color: bool,
) -> String {
    let labels = annotations.gutter.labels();
    let Some(first) = labels.first() else {
        return String::new();
    };

    let kinds = paint(text.len(), &annotations.highlights);
    let rows = row_ranges(text, mode);
    let digits = annotations.gutter.digits();

    let mut out = String::new();
    for (label, range) in labels.iter().zip(&rows[first.number - 1..]) {
        let bar = if label.continuation { '┆' } else { '│' };
        let _ = write!(out, "{:>digits$} {bar} ", label.number);
        push_segments(&mut out, text, range.clone(), &kinds, color);
        out.push('\n');
    }
    out
}

/// Absolute byte range of every gutter row.
fn row_ranges(text: &str, mode: GutterMode) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        match mode {
            GutterMode::Logical => rows.push(offset..offset + line.len()),
            GutterMode::Visual { width } => rows.extend(
                visual_row_ranges(line, usize::from(width))
                    .into_iter()
                    .map(|r| offset + r.start..offset + r.end),
            ),
        }
        offset += line.len() + 1;
    }
    rows
}

/// Category per byte. Overlapping spans resolve to the one starting first,
/// so a keyword inside a string literal is shown as part of the string.
fn paint(len: usize, overlay: &HighlightOverlay) -> Vec<Option<HighlightKind>> {
    let mut kinds = vec![None; len];
    for span in overlay.spans() {
        for slot in &mut kinds[span.start..span.end] {
            if slot.is_none() {
                *slot = Some(span.kind);
            }
        }
    }
    kinds
}

fn push_segments(
    out: &mut String,
    text: &str,
    range: Range<usize>,
    kinds: &[Option<HighlightKind>],
    color: bool,
) {
    let mut start = range.start;
    while start < range.end {
        let kind = kinds[start];
        let mut end = start + 1;
        while end < range.end && kinds[end] == kind {
            end += 1;
        }

        let segment = &text[start..end];
        match kind {
            Some(kind) if color => {
                let _ = write!(out, "{}", style(segment).with(kind_color(kind)));
            }
            _ => out.push_str(segment),
        }
        start = end;
    }
}

fn kind_color(kind: HighlightKind) -> Color {
    match kind {
        HighlightKind::Keyword => Color::Blue,
        HighlightKind::StringLiteral => Color::Green,
        HighlightKind::Number => Color::Magenta,
        HighlightKind::Brace => Color::Yellow,
    }
}

fn span_table(text: &str, overlay: &HighlightOverlay) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Start", "End", "Text"]);
    for span in overlay.spans() {
        table.add_row(vec![
            span.kind.name().to_string(),
            span.start.to_string(),
            span.end.to_string(),
            text[span.start..span.end].to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "SpriteType = {\n    name = \"a_shine\"\n}";

    fn annotate(text: &str, mode: GutterMode, viewport: Viewport) -> Annotations {
        Annotator::new(mode, true).annotate(text, viewport)
    }

    #[test]
    fn test_plain_render_numbers_each_line() {
        let annotations = annotate(TEXT, GutterMode::Logical, Viewport::default());

        let out = render_annotated(TEXT, &annotations, GutterMode::Logical, false);

        assert_eq!(
            out,
            "1 │ SpriteType = {\n2 │     name = \"a_shine\"\n3 │ }\n"
        );
    }

    #[test]
    fn test_visual_render_marks_continuations() {
        let mode = GutterMode::Visual { width: 10 };
        let annotations = annotate(TEXT, mode, Viewport::default());

        let out = render_annotated(TEXT, &annotations, mode, false);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "1 │ SpriteType");
        assert_eq!(lines[1], "2 ┆  = {");
        assert_eq!(lines.len(), annotations.gutter.total_rows());
    }

    #[test]
    fn test_render_respects_viewport() {
        let viewport = Viewport {
            first_row: 1,
            height: Some(1),
        };
        let annotations = annotate(TEXT, GutterMode::Logical, viewport);

        let out = render_annotated(TEXT, &annotations, GutterMode::Logical, false);

        assert_eq!(out, "2 │     name = \"a_shine\"\n");
    }

    #[test]
    fn test_color_render_wraps_spans_in_escapes() {
        let annotations = annotate(TEXT, GutterMode::Logical, Viewport::default());

        let out = render_annotated(TEXT, &annotations, GutterMode::Logical, true);

        // crossterm drops color codes when NO_COLOR is set.
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(out.contains('\x1b'));
        }
        assert!(out.contains("SpriteType"));
    }

    #[test]
    fn test_string_wins_over_keyword_inside_it() {
        let text = "\"name\"";
        let kinds = paint(text.len(), &shm_editor::annotate::highlight(text));
        assert!(kinds.iter().all(|k| *k == Some(HighlightKind::StringLiteral)));
    }
}
