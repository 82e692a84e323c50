//! Final record types and batch assembly.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::json;

use crate::parser::extract::{self, SpellFields};
use crate::parser::normalize;
use crate::parser::segment::RawSpellBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    Segmentation,
    Extraction,
    DuplicateName,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Segmentation => "segmentation",
            FailureKind::Extraction => "extraction",
            FailureKind::DuplicateName => "duplicate name",
        };
        f.write_str(s)
    }
}

/// A caught per-spell error with enough context to diagnose it later.
/// Failures are data, never control flow: the batch always continues.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub kind: FailureKind,
    pub spell: Option<String>,
    pub error: String,
    pub context: serde_json::Value,
}

impl FailureRecord {
    pub fn segmentation(error: impl Into<String>, context: serde_json::Value) -> Self {
        Self {
            kind: FailureKind::Segmentation,
            spell: None,
            error: error.into(),
            context,
        }
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.spell {
            Some(name) => write!(f, "[{}] {}: {}", self.kind, name, self.error)?,
            None => write!(f, "[{}] {}", self.kind, self.error)?,
        }
        let pretty = serde_json::to_string_pretty(&self.context).unwrap_or_default();
        write!(f, "\n{}", pretty)
    }
}

/// One fully parsed spell. `name` is normalized and unique per run.
#[derive(Debug, Clone, Serialize)]
pub struct SpellRecord {
    pub name: String,
    pub page: u32,
    pub fields: SpellFields,
}

/// Build the final record set from raw blocks. The unnamed leading
/// artifact is dropped; extraction failures and duplicate-name
/// replacements are appended to the segmenter's failure list.
pub fn assemble(
    blocks: Vec<RawSpellBlock>,
    mut failures: Vec<FailureRecord>,
) -> (BTreeMap<String, SpellRecord>, Vec<FailureRecord>) {
    let mut spells = BTreeMap::new();

    for block in blocks {
        let Some(raw_name) = block
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        else {
            continue;
        };
        let name = normalize::title_case(&normalize::dehyphenate(raw_name));

        let mut fields = SpellFields::default();
        if let Err(e) = extract::extract_into(&block.lines.join("\n"), &mut fields) {
            failures.push(FailureRecord {
                kind: FailureKind::Extraction,
                spell: Some(name),
                error: e.to_string(),
                context: json!({ "lines": block.lines, "fields": fields }),
            });
            continue;
        }

        let record = SpellRecord {
            name: name.clone(),
            page: block.page,
            fields,
        };
        if let Some(replaced) = spells.insert(name.clone(), record) {
            failures.push(FailureRecord {
                kind: FailureKind::DuplicateName,
                spell: Some(name),
                error: "duplicate spell name; earlier entry replaced".into(),
                context: json!({ "replaced_page": replaced.page }),
            });
        }
    }

    (spells, failures)
}

// ── Tests ──
