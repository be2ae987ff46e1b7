use super::engine::{BlockContext, RoleRule};
use crate::config::RebuildConfig;
use crate::types::ParagraphRole;
use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

static DEFAULT_REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+.*\(\d{4}\)").unwrap());

// TitleRule - first block, short, not a sentence
pub struct TitleRule {
    max_chars: usize,
}

impl TitleRule {
    pub fn new(config: &RebuildConfig) -> Self {
        Self {
            max_chars: config.title_max_chars,
        }
    }
}

impl RoleRule for TitleRule {
    fn role(&self) -> ParagraphRole {
        ParagraphRole::Title
    }

    fn matches(&self, block: &BlockContext<'_>) -> bool {
        block.index == 0
            && block.char_len() < self.max_chars
            && !block.ends_with_terminal_punctuation()
    }

    fn name(&self) -> &str {
        "Title"
    }
}

// AuthorRule - institutional marker in one of the leading blocks
pub struct AuthorRule {
    window: usize,
    markers: Vec<String>,
}

impl AuthorRule {
    pub fn new(config: &RebuildConfig) -> Self {
        Self {
            window: config.author_window,
            markers: config.institution_markers.clone(),
        }
    }
}

impl RoleRule for AuthorRule {
    fn role(&self) -> ParagraphRole {
        ParagraphRole::Author
    }

    fn matches(&self, block: &BlockContext<'_>) -> bool {
        block.index < self.window
            && self
                .markers
                .iter()
                .any(|marker| block.text.contains(marker.as_str()))
    }

    fn name(&self) -> &str {
        "AuthorAffiliation"
    }
}

// HeadingRule - ALL CAPS, or a short capitalised line without terminal punctuation
pub struct HeadingRule {
    short_chars: usize,
    max_words: usize,
    all_caps_max_chars: usize,
}

impl HeadingRule {
    pub fn new(config: &RebuildConfig) -> Self {
        Self {
            short_chars: config.heading_max_chars,
            max_words: config.heading_max_words,
            all_caps_max_chars: config.all_caps_max_chars,
        }
    }

    fn is_all_caps(&self, block: &BlockContext<'_>) -> bool {
        block.text == block.text.to_uppercase() && block.char_len() < self.all_caps_max_chars
    }
}

impl RoleRule for HeadingRule {
    fn role(&self) -> ParagraphRole {
        ParagraphRole::Heading
    }

    fn matches(&self, block: &BlockContext<'_>) -> bool {
        let shaped_like_heading = self.is_all_caps(block)
            || (block.char_len() < self.short_chars
                && block.starts_with_capital()
                && !block.ends_with_terminal_punctuation());

        shaped_like_heading && block.word_count() < self.max_words
    }

    fn name(&self) -> &str {
        "SectionHeading"
    }
}

// ReferenceRule - bibliography-shaped entry in the second half of the document
pub struct ReferenceRule {
    pattern: Regex,
}

impl ReferenceRule {
    pub fn new(config: &RebuildConfig) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(&config.reference_pattern)?,
        })
    }
}

impl Default for ReferenceRule {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_REFERENCE_REGEX.clone(),
        }
    }
}

impl RoleRule for ReferenceRule {
    fn role(&self) -> ParagraphRole {
        ParagraphRole::Reference
    }

    fn matches(&self, block: &BlockContext<'_>) -> bool {
        // strictly past the midpoint
        block.index * 2 > block.total && self.pattern.is_match(block.text)
    }

    fn name(&self) -> &str {
        "Reference"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reference_pattern_is_an_error() {
        let config = RebuildConfig {
            reference_pattern: "([unclosed".to_string(),
            ..Default::default()
        };
        assert!(ReferenceRule::new(&config).is_err());
    }

    #[test]
    fn test_custom_markers() {
        let config = RebuildConfig {
            institution_markers: vec!["Institute".to_string()],
            ..Default::default()
        };
        let rule = AuthorRule::new(&config);
        assert!(rule.matches(&BlockContext::new("Max Planck Institute", 2, 8)));
        assert!(!rule.matches(&BlockContext::new("State University", 2, 8)));
    }

    #[test]
    fn test_heading_word_limit() {
        let rule = HeadingRule::new(&RebuildConfig::default());
        assert!(rule.matches(&BlockContext::new("Methods and Materials", 3, 9)));
        assert!(!rule.matches(&BlockContext::new(
            "A Heading That Simply Has Far Too Many Words To Be One",
            3,
            9
        )));
    }

    #[test]
    fn test_heading_length_independent_of_title_length() {
        let block = BlockContext::new("Results of the Second Survey", 3, 9);
        let short_titles = RebuildConfig {
            title_max_chars: 10,
            ..Default::default()
        };
        assert!(HeadingRule::new(&short_titles).matches(&block));

        let short_headings = RebuildConfig {
            heading_max_chars: 10,
            ..Default::default()
        };
        assert!(!HeadingRule::new(&short_headings).matches(&block));
    }

    #[test]
    fn test_digits_only_count_as_caps() {
        let rule = HeadingRule::new(&RebuildConfig::default());
        assert!(rule.matches(&BlockContext::new("2024", 3, 9)));
    }
}
