//! Level/class list extraction and class-name normalization.

use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use regex::Regex;

use super::SpellFields;
use crate::parser::{normalize, LEVEL_ANCHOR};

// Applied repeatedly at the buffer head, so each match may open with the
// separator left over from the previous entry. Class names may contain
// '/' (Sor/Wiz), '-' (line-break hyphenation), and spaces (psychic
// warrior); a single space and one digit follow (no spells above 9th).
static CLASS_LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:,\s+)?(?P<class>[A-Za-z][A-Za-z/\s-]*)\s(?P<level>[0-9])(?P<paren>\s\([^)]+\))?",
    )
    .unwrap()
});

/// Full names for the class abbreviations the sourcebooks use.
const CLASS_NAMES: &[(&str, &str)] = &[
    ("Brd", "Bard"),
    ("Clr", "Cleric"),
    ("Drd", "Druid"),
    ("Pal", "Paladin"),
    ("Rgr", "Ranger"),
    ("Sor/Wiz", "Sorcerer/Wizard"),
];

/// Consume the `Level:` list: cut everything through the label, then match
/// class/level pairs until the pattern stops. Returns the unmatched tail.
pub fn extract<'a>(body: &'a str, fields: &mut SpellFields) -> Result<&'a str> {
    let label = format!("{} ", LEVEL_ANCHOR);
    let start = body
        .find(&label)
        .ok_or_else(|| anyhow!("no `{}` line in spell body", LEVEL_ANCHOR))?;
    let mut rest = &body[start + label.len()..];

    while let Some(caps) = CLASS_LEVEL_RE.captures(rest) {
        let level: u8 = caps["level"].parse().unwrap();
        let class = normalize_class(&caps["class"], caps.name("paren").map(|m| m.as_str()));
        fields.levels.entry(level).or_default().push(class);
        rest = &rest[caps.get(0).unwrap().end()..];
    }

    Ok(rest)
}

/// Expand a known abbreviation, re-attach any parenthetical qualifier,
/// then dehyphenate and title-case the whole thing.
fn normalize_class(raw: &str, qualifier: Option<&str>) -> String {
    let expanded = CLASS_NAMES
        .iter()
        .find(|(abbr, _)| *abbr == raw)
        .map(|(_, full)| *full)
        .unwrap_or(raw);
    let qualified = match qualifier {
        Some(q) => format!("{}{}", expanded, q),
        None => expanded.to_string(),
    };
    normalize::title_case(&normalize::dehyphenate(qualified.trim()))
}

// ── Tests ──
