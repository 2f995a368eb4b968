//! News section assembly: article pages, the section index, and the rolling
//! front page.
//!
//! Conventions carried by every news template: generated content starts on
//! row 5, the front-page headline band sits at row 18, and article pages get
//! a yellow title with the white summary one blank row below.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::Error;
use crate::layout::layout;
use crate::models::{AlignedGroup, Colour, ContentBlock, Page, PageControl};
use crate::pages::{PageBuilder, MAX_CONTENT_ROW};
use crate::substitute::Substitutions;
use crate::templates::PageTemplate;

/// First content row on the news templates.
const NEWS_START_LINE: u8 = 5;
/// Row the rolling front-page headline band starts on.
const FRONT_HEADLINE_LINE: u8 = 18;
/// Front-page headlines are capped to two rows of 36 columns.
const FRONT_MAX_LINES: usize = 2;
const FRONT_CUTOFF: usize = 36;

/// One article off the news feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

/// A published article's headline and the page it landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub number: u16,
}

/// Builds one page per article, numbered consecutively from `start_page`.
///
/// The title renders in yellow, the summary in white below a blank row. A
/// summary that would run past the content band is dropped whole and the
/// page ships with the title alone. Returns the pages plus the headline
/// list the index and front page are built from.
pub fn article_pages(
    articles: &[Article],
    template: &PageTemplate,
    start_page: u16,
    max_pages: usize,
    subs: &Substitutions,
) -> Result<(Vec<Page>, Vec<Headline>), Error> {
    let mut pages = Vec::with_capacity(articles.len().min(max_pages));
    let mut headlines = Vec::with_capacity(pages.capacity());

    for article in articles.iter().take(max_pages) {
        let number = start_page + pages.len() as u16;
        let mut builder = PageBuilder::seeded(template, subs, NEWS_START_LINE, MAX_CONTENT_ROW);

        let title = ContentBlock::new()
            .group(AlignedGroup::left().span(Colour::Yellow, article.title.as_str()));
        if !builder.try_block(layout(&title, builder.line())?) {
            warn!(page = number, title = %article.title, "title alone overflows the page, article skipped");
            continue;
        }
        builder.gap();

        if !article.summary.trim().is_empty() {
            let summary = ContentBlock::new()
                .group(AlignedGroup::left().span(Colour::White, article.summary.as_str()));
            if !builder.try_block(layout(&summary, builder.line())?) {
                debug!(page = number, "summary dropped: does not fit below the title");
            }
        }

        pages.push(Page::single(number, builder.finish().packets));
        headlines.push(Headline {
            title: article.title.clone(),
            number,
        });
    }
    Ok((pages, headlines))
}

/// Builds the section index: one headline per entry, white title left and
/// yellow page number right, a blank row between entries. Stops at the first
/// headline that no longer fits.
pub fn index_page(
    headlines: &[Headline],
    template: &PageTemplate,
    number: u16,
    subs: &Substitutions,
) -> Result<Page, Error> {
    let mut builder = PageBuilder::seeded(template, subs, NEWS_START_LINE, MAX_CONTENT_ROW);
    for headline in headlines {
        let block = ContentBlock::new()
            .group(AlignedGroup::left().span(Colour::White, headline.title.as_str()))
            .group(AlignedGroup::right().span(Colour::Yellow, headline.number.to_string()));
        if !builder.try_block(layout(&block, builder.line())?) {
            debug!(page = number, skipped = %headline.number, "index full");
            break;
        }
        builder.gap();
    }
    Ok(Page::single(number, builder.finish().packets))
}

/// Builds the rolling front page: one subpage per headline, cycled on air.
///
/// Each subpage shows the headline capped at two 36-column rows with the
/// `".."` marker, the target page number in yellow on the right of the first
/// row. The carousel advances every five seconds.
pub fn front_page(
    headlines: &[Headline],
    template: &PageTemplate,
    number: u16,
    subs: &Substitutions,
) -> Result<Page, Error> {
    let mut subpages = Vec::with_capacity(headlines.len());
    for headline in headlines {
        let mut builder =
            PageBuilder::seeded(template, subs, FRONT_HEADLINE_LINE, MAX_CONTENT_ROW);
        let block = ContentBlock::new()
            .group(
                AlignedGroup::left()
                    .span(Colour::White, headline.title.as_str())
                    .wrap_limit(FRONT_MAX_LINES, FRONT_CUTOFF),
            )
            .group(AlignedGroup::right().span(Colour::Yellow, headline.number.to_string()));
        if !builder.try_block(layout(&block, builder.line())?) {
            warn!(target = headline.number, "front-page headline skipped");
            continue;
        }
        subpages.push(builder.finish());
    }
    if subpages.is_empty() {
        // An empty carousel is not transmittable; ship the bare template.
        subpages.push(
            PageBuilder::seeded(template, subs, FRONT_HEADLINE_LINE, MAX_CONTENT_ROW).finish(),
        );
    }
    Ok(Page {
        number,
        control: Some(PageControl {
            cycle_time: Some("5,T".to_string()),
            erase_page: true,
            update: true,
        }),
        subpages,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
