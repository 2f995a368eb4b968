//! Template loading and page export.
//!
//! A template is a page-shaped JSON document carrying the pre-drawn header
//! and footer packets (rows 0 and 24). The same template seeds many pages
//! and subpages, so it is an immutable value: `packets()` hands out a fresh
//! deep copy every call and nothing ever mutates the original. The on-air
//! container encoding is the transmitter's business; pages are persisted
//! here as JSON through the `PageSink` trait.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::Error;
use crate::models::{Packet, Page};

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

/// An immutable page template. Clone-on-use: consumers get owned packet
/// buffers, never references into the template.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    page: Page,
}

impl PageTemplate {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let page: Page = serde_json::from_str(json)?;
        if page.subpages.is_empty() {
            return Err(Error::Template("template has no subpages".to_string()));
        }
        Ok(PageTemplate { page })
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path)?;
        let template = Self::from_json(&json)?;
        debug!(path = %path.display(), "template loaded");
        Ok(template)
    }

    /// The page number the template was drawn for.
    pub fn page_number(&self) -> u16 {
        self.page.number
    }

    /// A fresh copy of the template's first subpage packets, ready to have
    /// generated content appended.
    pub fn packets(&self) -> Vec<Packet> {
        self.page.subpages[0].packets.clone()
    }
}

/// Loads named templates from a directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TemplateStore { dir: dir.into() }
    }

    pub fn load(&self, name: &str) -> Result<PageTemplate, Error> {
        PageTemplate::load(&self.dir.join(name))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Export
// ────────────────────────────────────────────────────────────────────────────

/// Accepts finished pages for persistence. Pages arrive already legalized;
/// sinks never modify them.
pub trait PageSink {
    fn export(&mut self, page: &Page) -> Result<(), Error>;
}

/// Writes each page as `P{number}.json` under a directory.
#[derive(Debug)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(JsonDirSink { dir })
    }
}

impl PageSink for JsonDirSink {
    fn export(&mut self, page: &Page) -> Result<(), Error> {
        let path = self.dir.join(format!("P{}.json", page.number));
        fs::write(&path, serde_json::to_string_pretty(page)?)?;
        info!(page = page.number, subpages = page.subpages.len(), "page exported");
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
