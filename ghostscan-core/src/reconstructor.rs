//! Text Reconstructor
//!
//! Builds cleaned and highlighted copies of scanned text. Matching is by
//! character value, not position: once a character appears in the detected
//! list, every occurrence of that character is removed or marked.

use crate::types::DetectedCharacter;
use std::collections::HashSet;

/// Glyph substituted for flagged characters by [`highlight`].
pub const HIGHLIGHT_MARKER: char = '⦿';

fn flagged_set(detected: &[DetectedCharacter]) -> HashSet<char> {
    detected.iter().map(|d| d.character).collect()
}

/// Copy of `text` with every flagged character value omitted.
pub fn clean(text: &str, detected: &[DetectedCharacter]) -> String {
    if detected.is_empty() {
        return text.to_string();
    }
    let flagged = flagged_set(detected);
    text.chars().filter(|c| !flagged.contains(c)).collect()
}

/// Copy of `text` with every flagged character value replaced by
/// [`HIGHLIGHT_MARKER`]. Nothing is removed.
pub fn highlight(text: &str, detected: &[DetectedCharacter]) -> String {
    highlight_with(text, detected, HIGHLIGHT_MARKER)
}

pub fn highlight_with(text: &str, detected: &[DetectedCharacter], marker: char) -> String {
    let flagged = flagged_set(detected);
    text.chars()
        .map(|c| if flagged.contains(&c) { marker } else { c })
        .collect()
}

/// UTF-16 counterpart of [`clean`]. Unpaired surrogates are kept as-is.
pub fn clean_utf16(units: &[u16], detected: &[DetectedCharacter]) -> Vec<u16> {
    let flagged = flagged_set(detected);
    let mut out = Vec::with_capacity(units.len());
    let mut buf = [0u16; 2];

    for (decoded, raw) in char::decode_utf16(units.iter().copied()).zip(raw_units(units)) {
        match decoded {
            Ok(c) if flagged.contains(&c) => {}
            Ok(c) => out.extend_from_slice(c.encode_utf16(&mut buf)),
            Err(_) => out.push(raw),
        }
    }

    out
}

// First unit of each decoded item, used to re-emit lone surrogates verbatim.
fn raw_units(units: &[u16]) -> impl Iterator<Item = u16> + '_ {
    let mut i = 0;
    std::iter::from_fn(move || {
        let unit = *units.get(i)?;
        let paired = (0xD800..0xDC00).contains(&unit)
            && units
                .get(i + 1)
                .is_some_and(|next| (0xDC00..0xE000).contains(next));
        i += if paired { 2 } else { 1 };
        Some(unit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    #[test]
    fn test_basic_clean_and_highlight() {
        let text = "Hello\u{200B}World";
        let detected = scan(text);
        assert_eq!(clean(text, &detected), "HelloWorld");
        assert_eq!(highlight(text, &detected), "Hello⦿World");
    }

    #[test]
    fn test_bom_stripped() {
        let text = "\u{FEFF}text";
        assert_eq!(clean(text, &scan(text)), "text");
    }

    #[test]
    fn test_value_based_removal() {
        let text = "a\u{200B}b\u{200B}c";
        let detected = scan(text);
        assert_eq!(detected.len(), 2);
        assert_eq!(clean(text, &detected), "abc");

        // a single detection still removes every equal character
        assert_eq!(clean(text, &detected[..1]), "abc");
    }

    #[test]
    fn test_only_invisible_input() {
        let text = "\u{200B}\u{200C}\u{200D}";
        let detected = scan(text);
        assert_eq!(clean(text, &detected), "");
        assert_eq!(highlight(text, &detected), "⦿⦿⦿");
    }

    #[test]
    fn test_highlight_keeps_unflagged_scalars() {
        let text = "é😀\u{202E}x\u{0}";
        let detected = scan(text);
        let marked = highlight(text, &detected);
        let kept = marked.chars().filter(|c| *c != HIGHLIGHT_MARKER).count();
        assert_eq!(kept, text.chars().count() - detected.len());
        assert_eq!(marked, "é😀⦿x⦿");
    }

    #[test]
    fn test_clean_is_fixed_point() {
        let text = "\u{FEFF}mixed\u{2066} text\u{A0}here\u{1}";
        let once = clean(text, &scan(text));
        assert!(scan(&once).is_empty());
        assert_eq!(clean(&once, &scan(&once)), once);
    }

    #[test]
    fn test_idempotent_for_same_input() {
        let text = "x\u{2060}y";
        let detected = scan(text);
        assert_eq!(clean(text, &detected), clean(text, &detected));
        assert_eq!(highlight(text, &detected), highlight(text, &detected));
    }

    #[test]
    fn test_clean_utf16_keeps_lone_surrogates() {
        let units = [0x0061, 0xD800, 0x200B, 0xD83D, 0xDE00, 0xDC00];
        let detected = crate::scanner::scan_utf16(&units);
        let cleaned = clean_utf16(&units, &detected);
        assert_eq!(cleaned, vec![0x0061, 0xD800, 0xD83D, 0xDE00, 0xDC00]);
    }
}
