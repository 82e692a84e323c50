//! School/type header extraction from the head of a spell body.

use std::sync::LazyLock;

use regex::Regex;

use super::SpellFields;
use crate::parser::{normalize, school_alternation, LEVEL_ANCHOR};

// The header must be followed by the level label; without that lookahead
// the pattern could scan deep into descriptive text.
static SCHOOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<school>(?:{})(?:\s*\([^)]+\))?)(?:\s*\[(?P<type>[^\]]+)\])?\s+{}",
        school_alternation(),
        LEVEL_ANCHOR,
    ))
    .unwrap()
});

/// Match the body head against `School (Subschool)? [Type]?` followed by
/// the level label. On a match, store the normalized school and type and
/// advance the buffer to the level label; otherwise leave it untouched.
pub fn extract<'a>(body: &'a str, fields: &mut SpellFields) -> &'a str {
    let Some(caps) = SCHOOL_RE.captures(body) else {
        return body;
    };
    fields.school = normalize::clean(&caps["school"]);
    fields.spell_type = caps.name("type").and_then(|m| normalize::clean(m.as_str()));
    match body.find(LEVEL_ANCHOR) {
        Some(i) => &body[i..],
        None => body,
    }
}

// ── Tests ──
