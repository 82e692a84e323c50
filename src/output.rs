//! Tab-separated table output, one row per (spell, level) pair.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;

use crate::parser::extract::labels::Label;
use crate::records::SpellRecord;

pub fn write_tsv<W: Write>(
    mut out: W,
    spells: &BTreeMap<String, SpellRecord>,
    source_book: &str,
) -> Result<()> {
    let mut header: Vec<&str> = vec!["Spell", "School", "Type", "Class", "Level"];
    header.extend(Label::ORDER.iter().map(|l| l.column()));
    header.push("Source");
    header.push("Page");
    writeln!(out, "{}", header.join("\t"))?;

    // BTreeMap iteration gives ascending spell-name order
    for record in spells.values() {
        for (level, classes) in &record.fields.levels {
            let mut row: Vec<String> = vec![
                cell(&record.name),
                cell(record.fields.school.as_deref().unwrap_or("")),
                cell(record.fields.spell_type.as_deref().unwrap_or("")),
                cell(&classes.join(", ")),
                level.to_string(),
            ];
            row.extend(
                Label::ORDER
                    .iter()
                    .map(|l| cell(l.get(&record.fields).unwrap_or(""))),
            );
            row.push(cell(source_book));
            row.push(record.page.to_string());
            writeln!(out, "{}", row.join("\t"))?;
        }
    }

    Ok(())
}

// Values are already newline-free after normalization; stray tabs would
// still break the column grid
fn cell(value: &str) -> String {
    value.replace('\t', " ")
}

// ── Tests ──
