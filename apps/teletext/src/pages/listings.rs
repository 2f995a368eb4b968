//! Programme-listing assembly with subpage rollover.
//!
//! A listing row is a yellow start time followed by the white title (and an
//! optional age rating). The schedule rarely fits one screen, so the page
//! rolls over into further subpages: an entry that would pass the last
//! content row restarts on a fresh template copy.

use serde::Deserialize;
use tracing::warn;

use crate::errors::Error;
use crate::layout::layout;
use crate::models::{AlignedGroup, Colour, ContentBlock, Page, PageControl};
use crate::pages::PageBuilder;
use crate::substitute::Substitutions;
use crate::templates::PageTemplate;

/// First content row on the listing templates.
const LISTING_START_LINE: u8 = 7;
/// The listing templates carry a taller footer: content ends before row 21,
/// so row 20 is the last one written.
const LISTING_MAX_ROW: u8 = 21;

/// One programme off the schedule feed.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgrammeEntry {
    /// Start time as shown, e.g. `18.00`.
    pub time: String,
    pub title: String,
    /// Age rating, shown in parentheses after the title when present.
    #[serde(default)]
    pub rating: Option<String>,
}

impl ProgrammeEntry {
    fn block(&self) -> ContentBlock {
        let title = match &self.rating {
            Some(rating) => format!("{} ({rating})", self.title),
            None => self.title.clone(),
        };
        ContentBlock::new().group(
            AlignedGroup::left()
                .span(Colour::Yellow, format!("{} ", self.time))
                .span(Colour::White, title),
        )
    }
}

/// Builds a listing page, rolling over into a new subpage whenever an entry
/// no longer fits. The carousel advances every ten seconds.
pub fn listing_page(
    entries: &[ProgrammeEntry],
    template: &PageTemplate,
    number: u16,
    subs: &Substitutions,
) -> Result<Page, Error> {
    let mut subpages = Vec::new();
    let mut builder = PageBuilder::seeded(template, subs, LISTING_START_LINE, LISTING_MAX_ROW);

    for entry in entries {
        let rows = layout(&entry.block(), builder.line())?;
        if builder.try_block(rows) {
            continue;
        }
        subpages.push(builder.finish());
        builder = PageBuilder::seeded(template, subs, LISTING_START_LINE, LISTING_MAX_ROW);
        // Re-lay the entry for the fresh subpage's row numbers.
        let rows = layout(&entry.block(), builder.line())?;
        if !builder.try_block(rows) {
            warn!(time = %entry.time, title = %entry.title, "entry exceeds a whole subpage, skipped");
        }
    }
    subpages.push(builder.finish());

    Ok(Page {
        number,
        control: Some(PageControl {
            cycle_time: Some("10,T".to_string()),
            erase_page: true,
            update: true,
        }),
        subpages,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
