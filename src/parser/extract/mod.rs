pub mod labels;
pub mod levels;
pub mod school;

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

/// Every named field a spell body can yield. All values are normalized
/// (dehyphenated, trimmed); absent fields stay None.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpellFields {
    pub school: Option<String>,
    pub spell_type: Option<String>,
    /// Spell level → classes granted the spell at that level, in
    /// document order.
    pub levels: BTreeMap<u8, Vec<String>>,
    pub components: Option<String>,
    pub casting_time: Option<String>,
    pub range: Option<String>,
    pub target: Option<String>,
    pub effect: Option<String>,
    pub area: Option<String>,
    pub duration: Option<String>,
    pub saving_throw: Option<String>,
    pub spell_resistance: Option<String>,
    pub text: Option<String>,
}

/// Decompose one spell's body text, consuming it strictly left to right:
/// school/type header, then the level list, then the ordered field labels.
///
/// `fields` is populated in place so a failing stage still leaves the
/// partial result available for diagnostics.
pub fn extract_into(body: &str, fields: &mut SpellFields) -> Result<()> {
    let rest = school::extract(body, fields);
    let rest = levels::extract(rest, fields)?;
    labels::split_fields(rest, fields);
    Ok(())
}

// ── Tests ──
