//! Invisible Character Catalog
//!
//! Static knowledge base of code points that render as nothing (or as an
//! ordinary-looking space) but still change how text is stored, shaped or
//! ordered. Membership is decided in two tiers:
//!
//! 1. Exact entries below, each with a display name and category.
//! 2. The C0 (0x00-0x1F, minus TAB/LF/CR) and C1 (0x7F-0x9F) control ranges,
//!    reported generically as [`CONTROL_CHARACTER`].
//!
//! Tier 1 always wins when both apply (e.g. NULL keeps its own name). TAB is
//! outside the ranges but has an entry of its own, so it is still flagged.

use crate::types::CharCategory;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Name reported for range-matched control characters with no entry of their own.
pub const CONTROL_CHARACTER: &str = "CONTROL CHARACTER";

use CharCategory::*;

const ENTRIES: &[(u32, &str, CharCategory)] = &[
    // C0 controls worth naming individually
    (0x0000, "NULL (␀)", Control),
    (0x0008, "BACKSPACE (BS)", Control),
    (0x0009, "TAB (→)", Control),
    (0x000B, "VERTICAL TAB (VT)", Control),
    (0x000C, "FORM FEED (FF)", Control),
    (0x001C, "FILE SEPARATOR (FS)", Control),
    (0x001D, "GROUP SEPARATOR (GS)", Control),
    (0x001E, "RECORD SEPARATOR (RS)", Control),
    (0x001F, "UNIT SEPARATOR (US)", Control),
    // Latin-1 and combining
    (0x00A0, "NON-BREAKING SPACE (NBSP)", SpaceVariant),
    (0x00AD, "SOFT HYPHEN (SHY)", OtherInvisible),
    (0x034F, "COMBINING GRAPHEME JOINER (CGJ)", ZeroWidth),
    (0x061C, "ARABIC LETTER MARK (ALM)", BidiControl),
    // Script-specific fillers and separators
    (0x115F, "HANGUL CHOSEONG FILLER (HCF)", Filler),
    (0x1160, "HANGUL JUNGSEONG FILLER (HJF)", Filler),
    (0x1680, "OGHAM SPACE MARK (OGSP)", SpaceVariant),
    (0x17B4, "KHMER VOWEL INHERENT AQ (KVAQ)", Filler),
    (0x17B5, "KHMER VOWEL INHERENT AA (KVAA)", Filler),
    (0x180E, "MONGOLIAN VOWEL SEPARATOR (MVS)", Filler),
    // General punctuation spaces
    (0x2000, "EN QUAD (NQSP)", SpaceVariant),
    (0x2001, "EM QUAD (MQSP)", SpaceVariant),
    (0x2002, "EN SPACE (ENSP)", SpaceVariant),
    (0x2003, "EM SPACE (EMSP)", SpaceVariant),
    (0x2004, "THREE-PER-EM SPACE (3/MSP)", SpaceVariant),
    (0x2005, "FOUR-PER-EM SPACE (4/MSP)", SpaceVariant),
    (0x2006, "SIX-PER-EM SPACE (6/MSP)", SpaceVariant),
    (0x2007, "FIGURE SPACE (FSP)", SpaceVariant),
    (0x2008, "PUNCTUATION SPACE (PSP)", SpaceVariant),
    (0x2009, "THIN SPACE (THSP)", SpaceVariant),
    (0x200A, "HAIR SPACE (HSP)", SpaceVariant),
    // Zero width and directional marks
    (0x200B, "ZERO WIDTH SPACE (ZWSP)", ZeroWidth),
    (0x200C, "ZERO WIDTH NON-JOINER (ZWNJ)", ZeroWidth),
    (0x200D, "ZERO WIDTH JOINER (ZWJ)", ZeroWidth),
    (0x200E, "LEFT-TO-RIGHT MARK (LRM)", BidiControl),
    (0x200F, "RIGHT-TO-LEFT MARK (RLM)", BidiControl),
    (0x2028, "LINE SEPARATOR (LS)", SpaceVariant),
    (0x2029, "PARAGRAPH SEPARATOR (PS)", SpaceVariant),
    (0x202A, "LEFT-TO-RIGHT EMBEDDING (LRE)", BidiControl),
    (0x202B, "RIGHT-TO-LEFT EMBEDDING (RLE)", BidiControl),
    (0x202C, "POP DIRECTIONAL FORMATTING (PDF)", BidiControl),
    (0x202D, "LEFT-TO-RIGHT OVERRIDE (LRO)", BidiControl),
    (0x202E, "RIGHT-TO-LEFT OVERRIDE (RLO)", BidiControl),
    (0x202F, "NARROW NO-BREAK SPACE (NNBSP)", SpaceVariant),
    (0x205F, "MEDIUM MATHEMATICAL SPACE (MMSP)", SpaceVariant),
    (0x2060, "WORD JOINER (WJ)", ZeroWidth),
    (0x2061, "FUNCTION APPLICATION (FA)", ZeroWidth),
    (0x2062, "INVISIBLE TIMES (IT)", ZeroWidth),
    (0x2063, "INVISIBLE SEPARATOR (IS)", ZeroWidth),
    (0x2064, "INVISIBLE PLUS (IP)", ZeroWidth),
    (0x2065, "RESERVED (RSV)", OtherInvisible),
    (0x2066, "LEFT-TO-RIGHT ISOLATE (LRI)", BidiControl),
    (0x2067, "RIGHT-TO-LEFT ISOLATE (RLI)", BidiControl),
    (0x2068, "FIRST STRONG ISOLATE (FSI)", BidiControl),
    (0x2069, "POP DIRECTIONAL ISOLATE (PDI)", BidiControl),
    // Deprecated format characters
    (0x206A, "INHIBIT SYMMETRIC SWAPPING (ISS)", DeprecatedFormat),
    (0x206B, "ACTIVATE SYMMETRIC SWAPPING (ASS)", DeprecatedFormat),
    (0x206C, "INHIBIT ARABIC FORM SHAPING (IAFS)", DeprecatedFormat),
    (0x206D, "ACTIVATE ARABIC FORM SHAPING (AAFS)", DeprecatedFormat),
    (0x206E, "NATIONAL DIGIT SHAPES (NDS)", DeprecatedFormat),
    (0x206F, "NOMINAL DIGIT SHAPES (NODS)", DeprecatedFormat),
    // Blanks outside General Punctuation
    (0x2800, "BRAILLE PATTERN BLANK (BPB)", Filler),
    (0x3000, "IDEOGRAPHIC SPACE (IDSP)", SpaceVariant),
    (0x3164, "HANGUL FILLER (HF)", Filler),
    (0xFEFF, "BYTE ORDER MARK (BOM)", ByteOrderMark),
    (0xFFA0, "HALFWIDTH HANGUL FILLER (HWHF)", Filler),
    (0xFFF9, "INTERLINEAR ANNOTATION ANCHOR (IAA)", Annotation),
    (0xFFFA, "INTERLINEAR ANNOTATION SEPARATOR (IAS)", Annotation),
    (0xFFFB, "INTERLINEAR ANNOTATION TERMINATOR (IAT)", Annotation),
    (0xFFFC, "OBJECT REPLACEMENT CHARACTER (OBJ)", OtherInvisible),
    // Supplementary planes
    (0x1D173, "MUSICAL SYMBOL BEGIN BEAM", OtherInvisible),
    (0x1D174, "MUSICAL SYMBOL END BEAM", OtherInvisible),
    (0x1D175, "MUSICAL SYMBOL BEGIN TIE", OtherInvisible),
    (0x1D176, "MUSICAL SYMBOL END TIE", OtherInvisible),
    (0x1D177, "MUSICAL SYMBOL BEGIN SLUR", OtherInvisible),
    (0x1D178, "MUSICAL SYMBOL END SLUR", OtherInvisible),
    (0x1D179, "MUSICAL SYMBOL BEGIN PHRASE", OtherInvisible),
    (0x1D17A, "MUSICAL SYMBOL END PHRASE", OtherInvisible),
    (0xE0001, "LANGUAGE TAG", DeprecatedFormat),
];

static CATALOG: LazyLock<InvisibleCharacterCatalog> = LazyLock::new(|| {
    let entries = ENTRIES
        .iter()
        .map(|&(code_point, name, category)| (code_point, CatalogEntry { name, category }))
        .collect();
    InvisibleCharacterCatalog { entries }
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub category: CharCategory,
}

/// Read-only lookup table, built once per process and shared by reference.
#[derive(Debug)]
pub struct InvisibleCharacterCatalog {
    entries: HashMap<u32, CatalogEntry>,
}

impl InvisibleCharacterCatalog {
    pub fn global() -> &'static InvisibleCharacterCatalog {
        &CATALOG
    }

    /// Tier-1 lookup only.
    pub fn entry(&self, code_point: u32) -> Option<CatalogEntry> {
        self.entries.get(&code_point).copied()
    }

    /// Full classification: exact entry first, then the control ranges.
    pub fn classify(&self, code_point: u32) -> Option<CatalogEntry> {
        self.entry(code_point).or_else(|| {
            is_control_range(code_point).then_some(CatalogEntry {
                name: CONTROL_CHARACTER,
                category: CharCategory::Control,
            })
        })
    }

    pub fn is_suspicious(&self, code_point: u32) -> bool {
        self.classify(code_point).is_some()
    }

}

/// Name of a suspicious code point, or `None` when it is ordinary text.
pub fn classify(code_point: u32) -> Option<&'static str> {
    CATALOG.classify(code_point).map(|entry| entry.name)
}

/// C0 controls other than TAB, LF and CR, plus DEL and the C1 block.
pub fn is_control_range(code_point: u32) -> bool {
    match code_point {
        0x09 | 0x0A | 0x0D => false,
        0x00..=0x1F => true,
        0x7F..=0x9F => true,
        _ => false,
    }
}
