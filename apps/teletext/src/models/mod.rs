// Domain data model: styled-content input tree and the packet/page output tree.
// Input types match the JSON shape the scrapers hand over; output types match
// the page structure the exporter consumes.

pub mod content;
pub mod page;

pub use content::{Align, AlignedGroup, Colour, ContentBlock, PostWrapLimit, StyledSpan};
pub use page::{Packet, Page, PageControl, Subpage};
