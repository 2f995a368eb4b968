//! Styled-content input tree for the layout engine.
//!
//! A `ContentBlock` holds one or more `AlignedGroup`s that nominally share a
//! row; each group holds a run of `StyledSpan`s in a single colour. The JSON
//! field names (`content`, `colour`, `postWrapLimit`) follow the record shape
//! the scrapers submit, so blocks can come straight off a feed document.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Colour
// ────────────────────────────────────────────────────────────────────────────

/// The seven alphanumeric teletext colours.
///
/// Each colour has a one-byte control code (U+0001..U+0007) that occupies one
/// column on the rendered row. White is the default colour of a fresh row, so
/// white text at a row or segment start needs no control code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    #[default]
    White,
}

impl Colour {
    /// The control character that switches a row to this colour.
    pub fn code(self) -> char {
        match self {
            Colour::Red => '\u{1}',
            Colour::Green => '\u{2}',
            Colour::Yellow => '\u{3}',
            Colour::Blue => '\u{4}',
            Colour::Magenta => '\u{5}',
            Colour::Cyan => '\u{6}',
            Colour::White => '\u{7}',
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Alignment
// ────────────────────────────────────────────────────────────────────────────

/// Horizontal alignment slot of a group on its row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

// ────────────────────────────────────────────────────────────────────────────
// Spans and groups
// ────────────────────────────────────────────────────────────────────────────

/// An atomic run of text in one colour. No nested styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub colour: Colour,
    pub text: String,
}

impl StyledSpan {
    pub fn new(colour: Colour, text: impl Into<String>) -> Self {
        StyledSpan {
            colour,
            text: text.into(),
        }
    }
}

/// Caps the number of wrapped rows a group may produce.
///
/// When the text needs more than `max_lines` rows, the row at index
/// `max_lines - 1` is cut to at most `cutoff` columns and ends with the
/// truncation marker `".."` (suppressed when `cutoff < 3`, where a plain
/// hard cut remains).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWrapLimit {
    #[serde(rename = "maxLines")]
    pub max_lines: usize,
    pub cutoff: usize,
}

/// One or more spans occupying a single alignment slot on a row.
///
/// Left groups word-wrap across rows; right and centre groups are assumed
/// short (a page number, a label) and are emitted once on the first row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedGroup {
    pub align: Align,
    #[serde(
        rename = "postWrapLimit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub post_wrap_limit: Option<PostWrapLimit>,
    #[serde(rename = "content")]
    pub spans: Vec<StyledSpan>,
}

impl AlignedGroup {
    pub fn new(align: Align) -> Self {
        AlignedGroup {
            align,
            post_wrap_limit: None,
            spans: Vec::new(),
        }
    }

    pub fn left() -> Self {
        Self::new(Align::Left)
    }

    pub fn right() -> Self {
        Self::new(Align::Right)
    }

    pub fn center() -> Self {
        Self::new(Align::Center)
    }

    /// Appends a span in the given colour.
    pub fn span(mut self, colour: Colour, text: impl Into<String>) -> Self {
        self.spans.push(StyledSpan::new(colour, text));
        self
    }

    /// Caps wrapped output at `max_lines` rows with a `cutoff`-column last row.
    pub fn wrap_limit(mut self, max_lines: usize, cutoff: usize) -> Self {
        self.post_wrap_limit = Some(PostWrapLimit { max_lines, cutoff });
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content block
// ────────────────────────────────────────────────────────────────────────────

/// The full styled-content tree submitted for one layout call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub content: Vec<AlignedGroup>,
}

impl ContentBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(mut self, group: AlignedGroup) -> Self {
        self.content.push(group);
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
