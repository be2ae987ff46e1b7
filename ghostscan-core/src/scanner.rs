//! Code Point Scanner
//!
//! Walks input one Unicode scalar value at a time and reports every scalar
//! the [`InvisibleCharacterCatalog`] flags. Supplementary-plane characters
//! are always a single occurrence, whatever their encoded width.

use crate::catalog::{InvisibleCharacterCatalog, CONTROL_CHARACTER};
use crate::reconstructor;
use crate::types::*;
use std::collections::HashMap;

/// Every flagged scalar in `text`, in order of occurrence.
///
/// One entry per occurrence; repeated characters are not merged.
pub fn scan(text: &str) -> Vec<DetectedCharacter> {
    let catalog = InvisibleCharacterCatalog::global();

    text.char_indices()
        .filter_map(|(offset, character)| {
            let code_point = character as u32;
            catalog.classify(code_point).map(|entry| DetectedCharacter {
                character,
                code_point,
                name: entry.name,
                category: entry.category,
                offset,
            })
        })
        .collect()
}

/// Scan raw UTF-16 units. Offsets are unit indices.
///
/// Surrogate pairs decode to one occurrence of width 2. An unpaired
/// surrogate is consumed as a single unit and never flagged, since no
/// surrogate value is catalogued or inside a control range.
pub fn scan_utf16(units: &[u16]) -> Vec<DetectedCharacter> {
    let catalog = InvisibleCharacterCatalog::global();
    let mut detected = Vec::new();
    let mut offset = 0;

    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(character) => {
                let code_point = character as u32;
                if let Some(entry) = catalog.classify(code_point) {
                    detected.push(DetectedCharacter {
                        character,
                        code_point,
                        name: entry.name,
                        category: entry.category,
                        offset,
                    });
                }
                offset += character.len_utf16();
            }
            Err(_) => offset += 1,
        }
    }

    detected
}

/// Scan and clean in one call.
pub fn detect_invisible_characters(text: &str) -> ScanResult {
    let characters = scan(text);
    let cleaned_text = reconstructor::clean(text, &characters);

    tracing::debug!(
        detected = characters.len(),
        input_len = text.len(),
        cleaned_len = cleaned_text.len(),
        "scan complete"
    );

    ScanResult {
        characters,
        cleaned_text,
    }
}

/// Remove every suspicious scalar straight from the catalog, without a
/// prior detection list.
pub fn aggressive_cleanup(text: &str) -> String {
    let catalog = InvisibleCharacterCatalog::global();
    text.chars()
        .filter(|c| !catalog.is_suspicious(*c as u32))
        .collect()
}

/// One row per scalar value of `text`, invisible or not.
/// `index` is the byte offset of the scalar.
pub fn character_details(text: &str) -> Vec<CharacterDetail> {
    let catalog = InvisibleCharacterCatalog::global();

    text.char_indices()
        .map(|(index, character)| {
            let code_point = character as u32;
            let entry = catalog.classify(code_point);
            let is_invisible = entry.is_some();

            CharacterDetail {
                index,
                character,
                code_point,
                code_point_hex: format_code_point(code_point),
                name: match entry {
                    Some(entry) => entry.name.to_string(),
                    None => visible_name(character),
                },
                category: if is_invisible {
                    "Control/Format"
                } else {
                    visible_category(character)
                },
                block: unicode_block(code_point),
                is_invisible,
            }
        })
        .collect()
}

/// Group detections by code point, keeping first-occurrence order.
pub fn aggregate(detected: &[DetectedCharacter]) -> Vec<DetectedCharacterAggregate> {
    let mut slots: HashMap<u32, usize> = HashMap::new();
    let mut aggregates: Vec<DetectedCharacterAggregate> = Vec::new();

    for (ordinal, occurrence) in detected.iter().enumerate() {
        match slots.get(&occurrence.code_point) {
            Some(&slot) => {
                let existing = &mut aggregates[slot];
                existing.count += 1;
                existing.positions.push(ordinal);
            }
            None => {
                slots.insert(occurrence.code_point, aggregates.len());
                aggregates.push(DetectedCharacterAggregate {
                    code_point: occurrence.code_point,
                    representative_char: occurrence.character,
                    name: occurrence.name,
                    count: 1,
                    positions: vec![ordinal],
                });
            }
        }
    }

    aggregates
}

/// True when the name came from the control-range rule rather than an entry.
pub fn is_generic_control(detected: &DetectedCharacter) -> bool {
    detected.name == CONTROL_CHARACTER
}

const DIGIT_NAMES: [&str; 10] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE",
];

/// Unicode name for unflagged ASCII, "REGULAR CHARACTER" for everything else.
fn visible_name(character: char) -> String {
    let name = match character {
        'A'..='Z' => return format!("LATIN CAPITAL LETTER {character}"),
        'a'..='z' => return format!("LATIN SMALL LETTER {}", character.to_ascii_uppercase()),
        '0'..='9' => return format!("DIGIT {}", DIGIT_NAMES[character as usize - '0' as usize]),
        '\n' => "LINE FEED (LF)",
        '\r' => "CARRIAGE RETURN (CR)",
        ' ' => "SPACE",
        '!' => "EXCLAMATION MARK",
        '"' => "QUOTATION MARK",
        '#' => "NUMBER SIGN",
        '$' => "DOLLAR SIGN",
        '%' => "PERCENT SIGN",
        '&' => "AMPERSAND",
        '\'' => "APOSTROPHE",
        '(' => "LEFT PARENTHESIS",
        ')' => "RIGHT PARENTHESIS",
        '*' => "ASTERISK",
        '+' => "PLUS SIGN",
        ',' => "COMMA",
        '-' => "HYPHEN-MINUS",
        '.' => "FULL STOP",
        '/' => "SOLIDUS",
        ':' => "COLON",
        ';' => "SEMICOLON",
        '<' => "LESS-THAN SIGN",
        '=' => "EQUALS SIGN",
        '>' => "GREATER-THAN SIGN",
        '?' => "QUESTION MARK",
        '@' => "COMMERCIAL AT",
        '[' => "LEFT SQUARE BRACKET",
        '\\' => "REVERSE SOLIDUS",
        ']' => "RIGHT SQUARE BRACKET",
        '^' => "CIRCUMFLEX ACCENT",
        '_' => "LOW LINE",
        '`' => "GRAVE ACCENT",
        '{' => "LEFT CURLY BRACKET",
        '|' => "VERTICAL LINE",
        '}' => "RIGHT CURLY BRACKET",
        '~' => "TILDE",
        _ => "REGULAR CHARACTER",
    };
    name.to_string()
}

fn visible_category(character: char) -> &'static str {
    match character {
        '0'..='9' => "Decimal Digit",
        'A'..='Z' => "Uppercase Letter",
        'a'..='z' => "Lowercase Letter",
        ' ' => "Whitespace",
        c if c.is_ascii_control() => "Control",
        c if c.is_ascii_punctuation() => "Punctuation",
        _ => "Printable",
    }
}

fn unicode_block(code_point: u32) -> &'static str {
    match code_point {
        0x0000..=0x007F => "Basic Latin",
        0x0080..=0x00FF => "Latin-1 Supplement",
        0x0100..=0x017F => "Latin Extended-A",
        0x0180..=0x024F => "Latin Extended-B",
        _ => "Other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_detection() {
        let detected = scan("Hello\u{200B}World");
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].code_point, 0x200B);
        assert!(detected[0].name.contains("ZERO WIDTH SPACE"));
        assert_eq!(detected[0].offset, 5);
    }

    #[test]
    fn test_empty_input() {
        assert!(scan("").is_empty());
        let result = detect_invisible_characters("");
        assert!(result.is_clean());
        assert_eq!(result.cleaned_text, "");
    }

    #[test]
    fn test_control_character_generic_name() {
        let detected = scan("a\u{01}b");
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].name, "CONTROL CHARACTER");
        assert!(is_generic_control(&detected[0]));
    }

    #[test]
    fn test_null_keeps_catalog_name() {
        let detected = scan("\u{0}");
        assert_eq!(detected[0].name, "NULL (␀)");
        assert!(!is_generic_control(&detected[0]));
    }

    #[test]
    fn test_newline_carriage_return_ignored() {
        assert!(scan("line one\r\nline two\n").is_empty());
    }

    #[test]
    fn test_tab_flagged_by_name() {
        let detected = scan("a\tb");
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].code_point, 0x09);
        assert_eq!(detected[0].name, "TAB (→)");
        assert!(!is_generic_control(&detected[0]));
        assert_eq!(detect_invisible_characters("a\tb").cleaned_text, "ab");
    }

    #[test]
    fn test_emoji_is_one_unflagged_scalar() {
        assert!(scan("ok 😀 ok").is_empty());
        let details = character_details("😀");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].code_point, 0x1F600);
        assert_eq!(details[0].code_point_hex, "U+1F600");
    }

    #[test]
    fn test_order_preserved() {
        let detected = scan("\u{FEFF}a\u{200D}b\u{202E}c\u{200D}");
        let offsets: Vec<usize> = detected.iter().map(|d| d.offset).collect();
        assert_eq!(detected.len(), 4);
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(detected[0].code_point, 0xFEFF);
        assert_eq!(detected[2].code_point, 0x202E);
    }

    #[test]
    fn test_utf16_surrogate_pair_single_occurrence() {
        let units: Vec<u16> = "x😀\u{200B}y".encode_utf16().collect();
        let detected = scan_utf16(&units);
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].code_point, 0x200B);
        // 'x' is one unit, the emoji two
        assert_eq!(detected[0].offset, 3);
        assert_eq!(detected[0].utf16_width(), 1);
    }

    #[test]
    fn test_utf16_lone_surrogate_consumed() {
        let units = [0x0061, 0xD800, 0x200B, 0xDC00, 0x0062];
        let detected = scan_utf16(&units);
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].code_point, 0x200B);
        assert_eq!(detected[0].offset, 2);
    }

    #[test]
    fn test_character_details() {
        let details = character_details("A\u{200B}");
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].name, "LATIN CAPITAL LETTER A");
        assert_eq!(details[0].category, "Uppercase Letter");
        assert_eq!(details[0].block, "Basic Latin");
        assert!(details[1].is_invisible);
        assert_eq!(details[1].category, "Control/Format");
        assert_eq!(details[1].index, 1);
        assert_eq!(details[1].code_point_hex, "U+200B");
    }

    #[test]
    fn test_ascii_names_and_categories() {
        let details = character_details("z7 ;\n\u{E9}");
        let rows: Vec<(&str, &str)> = details
            .iter()
            .map(|d| (d.name.as_str(), d.category))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("LATIN SMALL LETTER Z", "Lowercase Letter"),
                ("DIGIT SEVEN", "Decimal Digit"),
                ("SPACE", "Whitespace"),
                ("SEMICOLON", "Punctuation"),
                ("LINE FEED (LF)", "Control"),
                ("REGULAR CHARACTER", "Printable"),
            ]
        );
    }

    #[test]
    fn test_aggregate_groups_by_code_point() {
        let detected = scan("a\u{200B}b\u{FEFF}c\u{200B}");
        let grouped = aggregate(&detected);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].code_point, 0x200B);
        assert_eq!(grouped[0].count, 2);
        assert_eq!(grouped[0].positions, vec![0, 2]);
        assert_eq!(grouped[1].code_point, 0xFEFF);
        assert_eq!(grouped[1].positions, vec![1]);
    }

    #[test]
    fn test_aggressive_cleanup() {
        assert_eq!(aggressive_cleanup("\u{FEFF}te\u{7}xt\u{2060}\n"), "text\n");
    }
}
