//! Page tracking and boilerplate filtering ahead of segmentation.

use std::sync::LazyLock;

use regex::Regex;

static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "(?:^CHAPTER [0-9]+)",
        "|(?:^SPELLS?$)",
        "|(?:^DESCRIPTIONS?$)",
        "|(?:^SPELL DESCRIPTIONS$)",
        "|(?:^SPELL LISTS$)",
        "|(?:^MAGIC$)",
    ))
    .unwrap()
});

/// First character of a page's first line in the raw dump.
pub const PAGE_MARKER: char = '\u{0C}';

/// Running page counter plus structural-noise filter.
///
/// Chapter headers, standalone section headers, and the bare page-footer
/// digit are dropped; every other line is forwarded with page context.
pub struct PageFilter {
    page: u32,
}

impl PageFilter {
    pub fn new(starting_page: u32) -> Self {
        Self { page: starting_page }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Classify one raw line, advancing the page counter on a marker.
    /// Returns the line (marker stripped) if it survives filtering.
    pub fn accept(&mut self, raw: &str) -> Option<String> {
        let line = match raw.strip_prefix(PAGE_MARKER) {
            Some(rest) => {
                self.page += 1;
                rest
            }
            None => raw,
        };

        let trimmed = line.trim();
        if BOILERPLATE_RE.is_match(trimmed) || trimmed == self.page.to_string() {
            return None;
        }

        Some(line.to_string())
    }
}

// ── Tests ──
