//! Wire encoding of structured rows.
//!
//! The engine works on `(colour, text)` runs grouped into positioned
//! segments; only here do they become the embedded-control-code row string.
//! A colour code occupies one column, exactly as on a receiver. The running
//! colour starts at white for every segment, so padding between segments
//! renders in the row default and alignment slots stay independent.

use crate::models::Colour;

/// A run of text in one colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Run {
    pub colour: Colour,
    pub text: String,
}

impl Run {
    pub fn new(colour: Colour, text: impl Into<String>) -> Self {
        Run {
            colour,
            text: text.into(),
        }
    }
}

/// A sequence of runs placed at a fixed column on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
    pub at: usize,
    pub runs: Vec<Run>,
}

/// Columns the runs occupy when rendered: text cells plus one cell per
/// colour change, starting from the white row default.
pub(crate) fn rendered_width(runs: &[Run]) -> usize {
    let mut current = Colour::White;
    let mut cells = 0;
    for run in runs {
        if run.colour != current {
            cells += 1;
            current = run.colour;
        }
        cells += run.text.chars().count();
    }
    cells
}

/// Cuts runs down to at most `cap` rendered columns.
///
/// Used for `postWrapLimit` cutoffs and as a guard against right/centre
/// groups wider than the row.
pub(crate) fn cut_runs(runs: &[Run], cap: usize) -> Vec<Run> {
    let mut out = Vec::new();
    let mut current = Colour::White;
    let mut cells = 0;
    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        let marker = usize::from(run.colour != current);
        if cells + marker >= cap {
            break;
        }
        let avail = cap - cells - marker;
        let take: String = run.text.chars().take(avail).collect();
        let taken = take.chars().count();
        let partial = taken < run.text.chars().count();
        cells += marker + taken;
        current = run.colour;
        out.push(Run::new(run.colour, take));
        if partial {
            break;
        }
    }
    out
}

/// Serialises one row of segments to a string of exactly `width` characters,
/// colour codes included. Gaps between segments are filled with spaces.
pub(crate) fn encode_row(segments: &[Segment], width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut col = 0;
    for seg in segments {
        debug_assert!(seg.at >= col, "segments must not overlap");
        while col < seg.at {
            out.push(' ');
            col += 1;
        }
        let mut current = Colour::White;
        for run in &seg.runs {
            if run.colour != current {
                out.push(run.colour.code());
                current = run.colour;
                col += 1;
            }
            out.push_str(&run.text);
            col += run.text.chars().count();
        }
    }
    while col < width {
        out.push(' ');
        col += 1;
    }
    out
}

/// Removes colour control codes, leaving only the visible characters.
pub fn strip_control_codes(text: &str) -> String {
    text.chars()
        .filter(|c| !('\u{1}'..='\u{7}').contains(c))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
