//! Ordered field-boundary splitting over the spell body remainder.
//!
//! Each recognized label's value is exactly the text between its own
//! boundary and the next one in the canonical sequence. The sequence is
//! order-sensitive: some boundaries carry book-specific compound variants
//! (`Area or Target:`, `Target and Effect:`) as alternates.

use std::sync::LazyLock;

use regex::Regex;

use super::SpellFields;
use crate::parser::normalize;

/// Named body fields in their canonical order of appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Components,
    CastingTime,
    Range,
    Target,
    Effect,
    Area,
    Duration,
    SavingThrow,
    SpellResistance,
    Text,
}

impl Label {
    pub const ORDER: [Label; 10] = [
        Label::Components,
        Label::CastingTime,
        Label::Range,
        Label::Target,
        Label::Effect,
        Label::Area,
        Label::Duration,
        Label::SavingThrow,
        Label::SpellResistance,
        Label::Text,
    ];

    /// Output column header for this field.
    pub fn column(self) -> &'static str {
        match self {
            Label::Components => "Component(s)",
            Label::CastingTime => "Casting Time",
            Label::Range => "Range",
            Label::Target => "Target(s)",
            Label::Effect => "Effect",
            Label::Area => "Area",
            Label::Duration => "Duration",
            Label::SavingThrow => "Saving Throw",
            Label::SpellResistance => "Spell Resistance",
            Label::Text => "Text",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            // Must not fire on "Material Components:" or "Verbal
            // Components:" mid-text, hence the leading newline everywhere
            Label::Components => r"\nComponents?:",
            Label::CastingTime => r"\nCasting Time:",
            Label::Range => r"\nRange:",
            Label::Target => r"\n(?:Area\sor\s)?Targets?:",
            Label::Effect => r"\n(?:Target(?:\sand\s)|/)?Effect:",
            Label::Area => r"\n(?:(?:Effect\sand\s)|(?:Target,\sEffect,\sor\s))?Area:",
            Label::Duration => r"\nDuration:",
            Label::SavingThrow => r"\nSaving Throw:",
            Label::SpellResistance => r"\nSpell Resistance:",
            // The descriptive text has no literal label; it begins at the
            // first line opening with a capital letter or a quote
            Label::Text => "\n\"?[A-Z]",
        }
    }

    pub fn get(self, fields: &SpellFields) -> Option<&str> {
        self.slot_ref(fields).as_deref()
    }

    fn slot_ref(self, fields: &SpellFields) -> &Option<String> {
        match self {
            Label::Components => &fields.components,
            Label::CastingTime => &fields.casting_time,
            Label::Range => &fields.range,
            Label::Target => &fields.target,
            Label::Effect => &fields.effect,
            Label::Area => &fields.area,
            Label::Duration => &fields.duration,
            Label::SavingThrow => &fields.saving_throw,
            Label::SpellResistance => &fields.spell_resistance,
            Label::Text => &fields.text,
        }
    }

    fn slot(self, fields: &mut SpellFields) -> &mut Option<String> {
        match self {
            Label::Components => &mut fields.components,
            Label::CastingTime => &mut fields.casting_time,
            Label::Range => &mut fields.range,
            Label::Target => &mut fields.target,
            Label::Effect => &mut fields.effect,
            Label::Area => &mut fields.area,
            Label::Duration => &mut fields.duration,
            Label::SavingThrow => &mut fields.saving_throw,
            Label::SpellResistance => &mut fields.spell_resistance,
            Label::Text => &mut fields.text,
        }
    }
}

static BOUNDARIES: LazyLock<Vec<(Label, Regex)>> = LazyLock::new(|| {
    Label::ORDER
        .iter()
        .map(|&label| (label, Regex::new(label.pattern()).unwrap()))
        .collect()
});

/// Split the remainder on each boundary in canonical order. The text
/// before a matched boundary belongs to the previously matched label
/// (discarded before the first match); after the last boundary, whatever
/// remains is the final label's value.
pub fn split_fields(body: &str, fields: &mut SpellFields) {
    let mut rest = body;
    let mut current: Option<Label> = None;

    for (label, re) in BOUNDARIES.iter() {
        let Some(m) = re.find(rest) else { continue };
        if let Some(cur) = current {
            *cur.slot(fields) = normalize::clean(&rest[..m.start()]);
        }
        rest = if *label == Label::Text {
            // The match only locates where the text starts; keep it
            &rest[m.start() + 1..]
        } else {
            &rest[m.end()..]
        };
        current = Some(*label);
    }

    if let Some(cur) = current {
        *cur.slot(fields) = normalize::clean(rest);
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn split(body: &str) -> SpellFields {
        let mut fields = SpellFields::default();
        split_fields(body, &mut fields);
        fields
    }

    #[test]
    fn all_labels_in_canonical_order() {
        let fields = split(
            "\nComponents: V, S\nCasting Time: 1 round\nRange: Touch\n\
             Target: One creature\nEffect: A beam\nArea: 10 ft.\n\
             Duration: 1 minute\nSaving Throw: Will negates\n\
             Spell Resistance: Yes\nEach value lands in its own field.",
        );
        assert_eq!(fields.components.as_deref(), Some("V, S"));
        assert_eq!(fields.casting_time.as_deref(), Some("1 round"));
        assert_eq!(fields.range.as_deref(), Some("Touch"));
        assert_eq!(fields.target.as_deref(), Some("One creature"));
        assert_eq!(fields.effect.as_deref(), Some("A beam"));
        assert_eq!(fields.area.as_deref(), Some("10 ft."));
        assert_eq!(fields.duration.as_deref(), Some("1 minute"));
        assert_eq!(fields.saving_throw.as_deref(), Some("Will negates"));
        assert_eq!(fields.spell_resistance.as_deref(), Some("Yes"));
        assert_eq!(
            fields.text.as_deref(),
            Some("Each value lands in its own field.")
        );
        // No value swallowed a neighboring label
        for label in Label::ORDER {
            let value = label.get(&fields).unwrap();
            for other in Label::ORDER {
                if other != Label::Text {
                    assert!(!value.contains(&format!("{}:", other.column())));
                }
            }
        }
    }

    #[test]
    fn omitted_fields_stay_none() {
        let fields = split("\nComponents: V\nDuration: 1 round\nThe rest is prose.");
        assert_eq!(fields.components.as_deref(), Some("V"));
        assert_eq!(fields.range, None);
        assert_eq!(fields.target, None);
        assert_eq!(fields.duration.as_deref(), Some("1 round"));
        assert_eq!(fields.text.as_deref(), Some("The rest is prose."));
    }

    #[test]
    fn leading_text_before_first_label_discarded() {
        let fields = split("leftover header junk\nComponents: V\nDone here.");
        assert_eq!(fields.components.as_deref(), Some("V"));
    }

    #[test]
    fn compound_target_variant() {
        let fields = split("\nRange: Touch\nArea or Target: One object\nDuration: 1 day\nEnd.");
        assert_eq!(fields.target.as_deref(), Some("One object"));
        assert_eq!(fields.range.as_deref(), Some("Touch"));
    }

    #[test]
    fn compound_effect_variant() {
        let fields = split("\nRange: Close\nTarget and Effect: One ray\nDuration: 1 round\nEnd.");
        assert_eq!(fields.effect.as_deref(), Some("One ray"));
    }

    #[test]
    fn text_begins_at_quote() {
        let fields = split("\nSpell Resistance: No\n\"Begone!\" you shout.");
        assert_eq!(fields.spell_resistance.as_deref(), Some("No"));
        assert_eq!(fields.text.as_deref(), Some("\"Begone!\" you shout."));
    }

    #[test]
    fn lowercase_continuation_not_mistaken_for_text() {
        // Wrapped value lines start lowercase, so the text boundary must
        // skip them and fire on the first capitalized line
        let fields = split("\nDuration: one round\nper level\nActual prose starts here.");
        assert_eq!(fields.duration.as_deref(), Some("one round per level"));
        assert_eq!(fields.text.as_deref(), Some("Actual prose starts here."));
    }

    #[test]
    fn singular_component_label() {
        let fields = split("\nComponent: V\nDuration: 1 round\nEnd.");
        assert_eq!(fields.components.as_deref(), Some("V"));
    }

    #[test]
    fn no_boundaries_yields_nothing() {
        let fields = split("nothing but lowercase prose with no labels");
        for label in Label::ORDER {
            assert_eq!(label.get(&fields), None);
        }
    }
}
