//! Syntax highlighting for generated markup.
//!
//! A full rescan of the text on every call. Each category is matched
//! independently, so spans of different categories may overlap (a keyword
//! inside a string literal is tagged as both).

use std::sync::LazyLock;

use regex::Regex;

/// Reserved words of the `SpriteType` grammar, matched as whole words.
pub const KEYWORDS: [&str; 16] = [
    "SpriteType",
    "name",
    "texturefile",
    "effectFile",
    "animation",
    "animationmaskfile",
    "animationtexturefile",
    "animationrotation",
    "animationlooping",
    "animationtime",
    "animationdelay",
    "animationblendmode",
    "animationtype",
    "animationrotationoffset",
    "animationtexturescale",
    "legacy_lazy_load",
];

static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", KEYWORDS.join("|"))).expect("keyword pattern is valid")
});
// A literal never spans lines, so a stray quote only affects its own line.
static STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"\n]*""#).expect("string pattern is valid"));
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").expect("number pattern is valid"));
static BRACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[{}]").expect("brace pattern is valid"));

/// Highlight category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HighlightKind {
    Keyword,
    StringLiteral,
    Number,
    Brace,
}

impl HighlightKind {
    pub const ALL: [HighlightKind; 4] = [
        HighlightKind::Keyword,
        HighlightKind::StringLiteral,
        HighlightKind::Number,
        HighlightKind::Brace,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            HighlightKind::Keyword => &*KEYWORD_RE,
            HighlightKind::StringLiteral => &*STRING_RE,
            HighlightKind::Number => &*NUMBER_RE,
            HighlightKind::Brace => &*BRACE_RE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HighlightKind::Keyword => "keyword",
            HighlightKind::StringLiteral => "string",
            HighlightKind::Number => "number",
            HighlightKind::Brace => "brace",
        }
    }
}

/// A tagged byte range `start..end` of the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub kind: HighlightKind,
}

/// All highlight spans for one text, sorted by start offset then category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightOverlay {
    spans: Vec<HighlightSpan>,
}

impl HighlightOverlay {
    pub fn spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Spans of one category.
    pub fn of_kind(&self, kind: HighlightKind) -> impl Iterator<Item = &HighlightSpan> {
        self.spans.iter().filter(move |span| span.kind == kind)
    }
}

/// Scans `text` and tags every category.
pub fn highlight(text: &str) -> HighlightOverlay {
    let mut spans: Vec<HighlightSpan> = HighlightKind::ALL
        .into_iter()
        .flat_map(|kind| {
            kind.pattern().find_iter(text).map(move |m| HighlightSpan {
                start: m.start(),
                end: m.end(),
                kind,
            })
        })
        .collect();
    spans.sort_by_key(|span| (span.start, span.kind, span.end));
    HighlightOverlay { spans }
}
