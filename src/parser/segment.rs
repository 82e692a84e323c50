//! Partitions the filtered line stream into raw spell blocks.
//!
//! A line starting with `Level:` anchors a new spell, which means the
//! lines accumulated so far must be split: the tail is the *new* spell's
//! name (and header), everything before it is the *previous* spell's body.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use super::{school_alternation, LEVEL_ANCHOR};
use crate::records::FailureRecord;

static SCHOOL_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^(?:{})", school_alternation())).unwrap());

/// Name-recovery strategy, chosen per source book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMode {
    /// Names sit on a single line, always followed by a school header.
    SingleLine,
    /// Names spread over all-caps lines and the school is sometimes
    /// omitted (Spell Compendium layout).
    MultilineAllCaps,
}

/// Unparsed accumulation of lines believed to belong to one spell.
#[derive(Debug, Clone)]
pub struct RawSpellBlock {
    /// Raw name text; None for the leading artifact before the first anchor.
    pub name: Option<String>,
    /// Page the spell's anchor line was found on.
    pub page: u32,
    /// Body lines in document order, without trailing newlines.
    pub lines: Vec<String>,
}

/// Segmentation context: the pending spell, its line buffer, and every
/// block finalized so far. Owns all mutable state of this stage.
pub struct Segmenter {
    mode: NameMode,
    pending_name: Option<String>,
    pending_page: u32,
    buffer: Vec<String>,
    blocks: Vec<RawSpellBlock>,
    failures: Vec<FailureRecord>,
}

impl Segmenter {
    pub fn new(mode: NameMode) -> Self {
        Self {
            mode,
            pending_name: None,
            pending_page: 0,
            buffer: Vec::new(),
            blocks: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Feed one forwarded line with its page context.
    pub fn push(&mut self, line: String, page: u32) {
        if line.starts_with(LEVEL_ANCHOR) {
            let (name, window) = match self.mode {
                NameMode::SingleLine => self.split_single_line(),
                NameMode::MultilineAllCaps => self.split_multiline(),
            };
            let body = std::mem::replace(&mut self.buffer, window);
            self.blocks.push(RawSpellBlock {
                name: self.pending_name.take(),
                page: self.pending_page,
                lines: body,
            });
            self.pending_name = name;
            self.pending_page = page;
        }
        self.buffer.push(line);
    }

    /// Flush the final pending spell; everything after the last anchor
    /// belongs to it.
    pub fn finish(mut self) -> (Vec<RawSpellBlock>, Vec<FailureRecord>) {
        self.blocks.push(RawSpellBlock {
            name: self.pending_name.take(),
            page: self.pending_page,
            lines: self.buffer,
        });
        (self.blocks, self.failures)
    }

    /// Scan backward to the last school-prefixed line: that line and
    /// everything after it open the new spell; the line just before it is
    /// the raw name.
    fn split_single_line(&mut self) -> (Option<String>, Vec<String>) {
        match self.buffer.iter().rposition(|l| SCHOOL_START_RE.is_match(l)) {
            Some(i) if i > 0 => {
                let window = self.buffer.split_off(i);
                let name = self.buffer.pop();
                (name, window)
            }
            found => {
                let window = std::mem::take(&mut self.buffer);
                let error = if found.is_some() {
                    "no spell name line before the school header"
                } else {
                    "no school header found before the anchor"
                };
                self.failures.push(FailureRecord::segmentation(
                    error,
                    json!({ "scanned": window }),
                ));
                (None, window)
            }
        }
    }

    /// Trailing non-all-caps lines open the new spell; the contiguous
    /// all-caps run before them is the raw name, joined line by line.
    fn split_multiline(&mut self) -> (Option<String>, Vec<String>) {
        let Some(end) = self.buffer.iter().rposition(|l| is_spell_name_part(l)) else {
            let window = std::mem::take(&mut self.buffer);
            self.failures.push(FailureRecord::segmentation(
                "unable to find spell name",
                json!({ "after": window, "before": [] }),
            ));
            return (None, window);
        };

        let window = self.buffer.split_off(end + 1);
        let mut start = end;
        while start > 0 && is_spell_name_part(&self.buffer[start - 1]) {
            start -= 1;
        }
        let name = self.buffer.split_off(start).join("\n");
        (Some(name), window)
    }
}

/// All cased characters uppercase (at least one of them) and no period.
fn is_spell_name_part(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased && !line.contains('.')
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mode: NameMode, lines: &[&str]) -> (Vec<RawSpellBlock>, Vec<FailureRecord>) {
        let mut seg = Segmenter::new(mode);
        for (i, line) in lines.iter().enumerate() {
            seg.push(line.to_string(), i as u32 + 1);
        }
        seg.finish()
    }

    #[test]
    fn single_line_boundary() {
        let (blocks, failures) = run(
            NameMode::SingleLine,
            &[
                "Fireball",
                "Evocation [Fire]",
                "Level: Sor/Wiz 3",
                "Components: V, S, M",
                "A fireball detonates with a low roar.",
            ],
        );
        assert!(failures.is_empty());
        assert_eq!(blocks.len(), 2);
        // Leading artifact: no name, empty body
        assert_eq!(blocks[0].name, None);
        assert!(blocks[0].lines.is_empty());
        // The real spell, flushed at stream end
        assert_eq!(blocks[1].name.as_deref(), Some("Fireball"));
        assert_eq!(blocks[1].lines[0], "Evocation [Fire]");
        assert_eq!(blocks[1].lines[1], "Level: Sor/Wiz 3");
    }

    #[test]
    fn block_count_matches_anchor_count() {
        let (blocks, _) = run(
            NameMode::SingleLine,
            &[
                "First",
                "Evocation",
                "Level: Sor/Wiz 1",
                "body text",
                "Second",
                "Necromancy",
                "Level: Clr 2",
                "more body",
                "Third",
                "Illusion",
                "Level: Brd 3",
            ],
        );
        // One block per anchor plus the leading artifact
        assert_eq!(blocks.len(), 4);
        let named: Vec<_> = blocks.iter().filter_map(|b| b.name.as_deref()).collect();
        assert_eq!(named, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn previous_body_excludes_next_header() {
        let (blocks, _) = run(
            NameMode::SingleLine,
            &[
                "First",
                "Evocation",
                "Level: Sor/Wiz 1",
                "body of first",
                "Second",
                "Necromancy",
                "Level: Clr 2",
            ],
        );
        let first = &blocks[1];
        assert_eq!(first.name.as_deref(), Some("First"));
        assert_eq!(
            first.lines,
            vec!["Evocation", "Level: Sor/Wiz 1", "body of first"]
        );
    }

    #[test]
    fn anchor_page_recorded() {
        let mut seg = Segmenter::new(NameMode::SingleLine);
        seg.push("Fireball".into(), 12);
        seg.push("Evocation".into(), 12);
        seg.push("Level: Sor/Wiz 3".into(), 13);
        let (blocks, _) = seg.finish();
        assert_eq!(blocks[1].page, 13);
    }

    #[test]
    fn single_line_without_school_records_failure() {
        let (blocks, failures) = run(
            NameMode::SingleLine,
            &["just some text", "Level: Sor/Wiz 3"],
        );
        assert_eq!(failures.len(), 1);
        // The unnamed pending spell still accumulates the stream tail
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].name, None);
    }

    #[test]
    fn multiline_name_concatenation() {
        let (blocks, failures) = run(
            NameMode::MultilineAllCaps,
            &[
                "ANTICIPATE",
                "TELEPORTATION",
                "Conjuration (Summoning)",
                "Level: Sor/Wiz 3",
                "The subject gains awareness.",
            ],
        );
        assert!(failures.is_empty());
        assert_eq!(
            blocks[1].name.as_deref(),
            Some("ANTICIPATE\nTELEPORTATION")
        );
        assert_eq!(blocks[1].lines[0], "Conjuration (Summoning)");
    }

    #[test]
    fn multiline_school_omitted() {
        let (blocks, failures) = run(
            NameMode::MultilineAllCaps,
            &["BLADE OF PAIN", "Level: Clr 4", "A sword appears."],
        );
        assert!(failures.is_empty());
        assert_eq!(blocks[1].name.as_deref(), Some("BLADE OF PAIN"));
        assert_eq!(blocks[1].lines[0], "Level: Clr 4");
    }

    #[test]
    fn multiline_without_caps_records_failure() {
        let (_, failures) = run(
            NameMode::MultilineAllCaps,
            &["no caps anywhere here", "Level: Clr 4"],
        );
        assert_eq!(failures.len(), 1);
        assert!(failures[0].error.contains("unable to find spell name"));
    }

    #[test]
    fn all_caps_line_with_period_is_not_a_name() {
        assert!(is_spell_name_part("CONE OF COLD"));
        assert!(!is_spell_name_part("V, S, M."));
        assert!(!is_spell_name_part("Evocation"));
        assert!(!is_spell_name_part("40 FT."));
        assert!(!is_spell_name_part("123"));
    }
}
