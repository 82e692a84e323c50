pub mod extract;
pub mod normalize;
pub mod pages;
pub mod segment;

use std::collections::BTreeMap;

use crate::records::{self, FailureRecord, SpellRecord};
use pages::PageFilter;
use segment::{NameMode, Segmenter};

/// Literal label that opens every spell's level line; a forwarded line
/// starting with it marks the next spell's start.
pub const LEVEL_ANCHOR: &str = "Level:";

/// The fixed school vocabulary; spell headers open with one of these.
pub const SCHOOLS: &[&str] = &[
    "Abjuration",
    "Conjuration",
    "Divination",
    "Enchantment",
    "Evocation",
    "Illusion",
    "Necromancy",
    "Transmutation",
    "Universal",
];

pub(crate) fn school_alternation() -> String {
    SCHOOLS.join("|")
}

pub struct ParseConfig {
    pub starting_page: u32,
    pub multiline_allcaps: bool,
}

pub struct ParseOutcome {
    pub spells: BTreeMap<String, SpellRecord>,
    pub failures: Vec<FailureRecord>,
}

/// Three-pass pipeline: raw dump lines → page-filtered stream → raw spell
/// blocks → assembled records.
pub fn parse_lines<I>(lines: I, config: &ParseConfig) -> ParseOutcome
where
    I: IntoIterator<Item = String>,
{
    let mode = if config.multiline_allcaps {
        NameMode::MultilineAllCaps
    } else {
        NameMode::SingleLine
    };

    let mut filter = PageFilter::new(config.starting_page);
    let mut segmenter = Segmenter::new(mode);
    for raw in lines {
        if let Some(line) = filter.accept(&raw) {
            segmenter.push(line, filter.page());
        }
    }

    let (blocks, seg_failures) = segmenter.finish();
    tracing::debug!(blocks = blocks.len(), "segmentation complete");

    let (spells, failures) = records::assemble(blocks, seg_failures);
    ParseOutcome { spells, failures }
}

// ── Tests ──
