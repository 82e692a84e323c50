//! Reconstructs logical lines from page-layout line wraps.

/// Collapse embedded line breaks into a single logical line.
///
/// A hyphen before a break usually continues a wrapped word
/// (`conti-\nnuing` → `continuing`), but counterexamples like
/// `Mind-\nAffecting` exist. Best heuristic: a capital letter after the
/// hyphen marks the exception and keeps it.
pub fn dehyphenate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\n' {
            out.push(c);
            continue;
        }
        // Swallow the whole break run, then look at the char pair around it
        while chars.next_if_eq(&'\n').is_some() {}
        let Some(&after) = chars.peek() else {
            break; // break at end of string: truncate
        };
        match out.pop() {
            None => {} // break at start of string: drop it
            Some('-') if after.is_uppercase() => out.push('-'),
            Some('-') => {} // hyphenated wrap: join the fragments
            Some(before) => {
                out.push(before);
                out.push(' ');
            }
        }
    }

    out
}

/// Title-case: uppercase the first letter of each alphabetic run,
/// lowercase the rest. `"SOR/WIZ"` → `"Sor/Wiz"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Trim + dehyphenate a raw field value; empty values become None.
pub fn clean(input: &str) -> Option<String> {
    let cleaned = dehyphenate(input.trim());
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

// ── Tests ──
