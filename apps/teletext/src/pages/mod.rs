//! Page assembly conventions shared by every call site.
//!
//! The layout engine only produces rows; whether they still fit on the page
//! is decided here. `PageBuilder` enforces the overflow policy: a block that
//! would pass the page's last content row is discarded whole — a page never
//! shows half an article.

pub mod listings;
pub mod news;
pub mod tables;

use tracing::debug;

use crate::models::{Packet, Subpage};
use crate::substitute::Substitutions;
use crate::templates::PageTemplate;

/// Content bound on the default page templates: generated rows end before
/// this row, so row 21 is the last one written. Templates with a taller
/// footer use 21 instead.
pub const MAX_CONTENT_ROW: u8 = 22;

/// Accumulates packets for one subpage, tracking the current line against
/// the page's last allowed content row.
#[derive(Debug)]
pub struct PageBuilder {
    packets: Vec<Packet>,
    line: u8,
    max_row: u8,
}

impl PageBuilder {
    pub fn new(seed: Vec<Packet>, start_line: u8, max_row: u8) -> Self {
        PageBuilder {
            packets: seed,
            line: start_line,
            max_row,
        }
    }

    /// Seeds a builder from a template copy with placeholders substituted.
    pub fn seeded(
        template: &PageTemplate,
        subs: &Substitutions,
        start_line: u8,
        max_row: u8,
    ) -> Self {
        let mut packets = template.packets();
        subs.apply_packets(&mut packets);
        Self::new(packets, start_line, max_row)
    }

    /// The row the next block would start on.
    pub fn line(&self) -> u8 {
        self.line
    }

    /// Appends a laid-out block if it fits within the content band.
    ///
    /// Returns false — and discards the block untouched — unless the block
    /// ends before `max_row`; the last writable row is `max_row - 1`.
    pub fn try_block(&mut self, block: Vec<Packet>) -> bool {
        if self.line as usize + block.len() > self.max_row as usize {
            debug!(
                line = self.line,
                rows = block.len(),
                max_row = self.max_row,
                "block discarded: would overflow content band"
            );
            return false;
        }
        self.line += block.len() as u8;
        self.packets.extend(block);
        true
    }

    /// Leaves one blank row before the next block.
    pub fn gap(&mut self) {
        self.line += 1;
    }

    pub fn finish(self) -> Subpage {
        Subpage {
            packets: self.packets,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
