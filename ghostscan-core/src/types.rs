use serde::{Deserialize, Serialize};

// ===== SCAN TYPES =====
// Produced fresh for every scan pass and discarded with the response.

/// Coarse grouping of catalogued invisible characters.
/// Only used for reporting; detection never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharCategory {
    ZeroWidth,
    BidiControl,
    SpaceVariant,
    DeprecatedFormat,
    ByteOrderMark,
    Filler,
    Annotation,
    Control,
    OtherInvisible,
}

impl CharCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CharCategory::ZeroWidth => "Zero Width",
            CharCategory::BidiControl => "Bidirectional Control",
            CharCategory::SpaceVariant => "Space Variant",
            CharCategory::DeprecatedFormat => "Deprecated Format",
            CharCategory::ByteOrderMark => "Byte Order Mark",
            CharCategory::Filler => "Filler",
            CharCategory::Annotation => "Interlinear Annotation",
            CharCategory::Control => "Control",
            CharCategory::OtherInvisible => "Other Invisible",
        }
    }
}

/// One flagged occurrence in the scanned input.
///
/// `offset` is measured in the input's own units: bytes for `&str` input,
/// 16-bit units for UTF-16 input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedCharacter {
    #[serde(rename = "char")]
    pub character: char,
    pub code_point: u32,
    pub name: &'static str,
    pub category: CharCategory,
    pub offset: usize,
}

impl DetectedCharacter {
    /// Width of the literal in UTF-16 units (2 outside the BMP).
    pub fn utf16_width(&self) -> usize {
        self.character.len_utf16()
    }

    pub fn hex(&self) -> String {
        format_code_point(self.code_point)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub characters: Vec<DetectedCharacter>,
    pub cleaned_text: String,
}

impl ScanResult {
    pub fn is_clean(&self) -> bool {
        self.characters.is_empty()
    }
}

/// Detections grouped by code point, in order of first occurrence.
/// `positions` holds occurrence ordinals within the scan list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedCharacterAggregate {
    pub code_point: u32,
    #[serde(rename = "char")]
    pub representative_char: char,
    pub name: &'static str,
    pub count: usize,
    pub positions: Vec<usize>,
}

/// Per-scalar breakdown used by the character table and CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterDetail {
    pub index: usize,
    #[serde(rename = "char")]
    pub character: char,
    pub code_point: u32,
    pub code_point_hex: String,
    pub name: String,
    pub category: &'static str,
    pub block: &'static str,
    pub is_invisible: bool,
}

/// `U+XXXX`, zero-padded to at least four hex digits.
pub fn format_code_point(code_point: u32) -> String {
    format!("U+{code_point:04X}")
}

// ===== DOCUMENT TYPES =====
// Only the parts of WordprocessingML that survive flattening are modelled.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRun {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub superscript: bool,
    #[serde(default)]
    pub subscript: bool,
}

impl ParsedRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Run length in scalar values, the unit used when redistributing text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedParagraph {
    pub text: String,
    pub runs: Vec<ParsedRun>,
    pub alignment: Option<String>,
    pub style_name: Option<String>,
}

/// Result of flattening a document: the joined text plus the paragraphs
/// needed later by the rebuild step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedDocument {
    pub text: String,
    pub paragraphs: Vec<ParsedParagraph>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphRole {
    Title,
    Author,
    Heading,
    Reference,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justified,
}

impl Alignment {
    /// Value of the `w:jc` element.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justified => "both",
        }
    }
}

/// Paragraph spacing in twentieths of a point, as stored in `w:spacing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    #[serde(default)]
    pub before: Option<u32>,
    #[serde(default)]
    pub after: Option<u32>,
    #[serde(default)]
    pub line: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indent {
    pub left: u32,
    pub hanging: u32,
}

/// Styling a paragraph role imposes on the rebuilt paragraph.
/// `size` is in half-points (`w:sz`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStyle {
    pub size: u32,
    pub bold: bool,
    pub alignment: Alignment,
    #[serde(default)]
    pub spacing: Spacing,
    #[serde(default)]
    pub indent: Option<Indent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuiltRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub superscript: bool,
    pub subscript: bool,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuiltParagraph {
    pub role: ParagraphRole,
    pub runs: Vec<RebuiltRun>,
    pub alignment: Alignment,
    pub spacing: Spacing,
    pub indent: Option<Indent>,
}

impl RebuiltParagraph {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

// ===== ANALYSIS OUTPUTS =====

#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysis {
    pub original_text: String,
    pub characters: Vec<DetectedCharacter>,
    pub cleaned_text: String,
    pub highlighted_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocxAnalysis {
    pub file_name: String,
    pub original_text: String,
    pub cleaned_text: String,
    pub detected_characters: Vec<DetectedCharacterAggregate>,
    pub paragraphs: Vec<ParsedParagraph>,
}
