//! Teletext page assembly core.
//!
//! Turns styled content off the scraper feeds into fixed-width 40-column
//! teletext pages: a word-wrapping layout engine with colour control codes,
//! a tabular row formatter, template-seeded page builders for news, listings
//! and tables, placeholder substitution, and a legalizer that remaps text to
//! the Finnish/Swedish transmission alphabet before export.

pub mod config;
pub mod errors;
pub mod layout;
pub mod legalize;
pub mod models;
pub mod pages;
pub mod substitute;
pub mod templates;

pub use errors::Error;
pub use layout::{layout, layout_block, strip_control_codes, table_row, ROW_WIDTH};
pub use models::{
    Align, AlignedGroup, Colour, ContentBlock, Packet, Page, PageControl, PostWrapLimit,
    StyledSpan, Subpage,
};
