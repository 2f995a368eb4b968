//! Packet/page output tree.
//!
//! A `Packet` is one fixed-width row plus its row index; a `Subpage` is one
//! screen of packets; a `Page` is a numbered carousel of subpages. All three
//! are plain data: built once, exported once, never mutated after export.

use serde::{Deserialize, Serialize};

/// One fixed-width output row. Row 0 and 24 belong to the template
/// (header/footer); generated content lives in rows 1..=23.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub number: u8,
    pub text: String,
}

/// One full screen's worth of packets, cycled within a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subpage {
    pub packets: Vec<Packet>,
}

/// Carousel control settings carried through to the exporter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageControl {
    #[serde(
        rename = "cycleTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cycle_time: Option<String>,
    #[serde(rename = "erasePage", default)]
    pub erase_page: bool,
    #[serde(default)]
    pub update: bool,
}

/// A numbered collection of subpages cycled on a teletext channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub number: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<PageControl>,
    pub subpages: Vec<Subpage>,
}

impl Page {
    /// A page with a single subpage seeded from the given packets.
    pub fn single(number: u16, packets: Vec<Packet>) -> Self {
        Page {
            number,
            control: None,
            subpages: vec![Subpage { packets }],
        }
    }
}
