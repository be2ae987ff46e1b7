use crate::types::{Alignment, Indent, ParagraphRole, RoleStyle, Spacing};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GhostscanConfig {
    /// Paragraph role heuristics and styling for rebuilt documents
    #[serde(default)]
    pub rebuild: RebuildConfig,
    /// Input limits enforced by callers before the core is reached
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RebuildConfig {
    /// Title candidates must be shorter than this (in characters)
    pub title_max_chars: usize,
    /// Author/affiliation lines are only looked for in this many leading paragraphs
    pub author_window: usize,
    /// Substrings marking an author/affiliation line
    pub institution_markers: Vec<String>,
    /// Mixed-case headings must be shorter than this (in characters)
    pub heading_max_chars: usize,
    /// Headings have fewer words than this
    pub heading_max_words: usize,
    /// Text counts as ALL CAPS only below this length
    pub all_caps_max_chars: usize,
    /// Shape of a bibliography entry, e.g. "Shannon, C. (1948)"
    pub reference_pattern: String,
    /// Page margin on all four sides, in twips
    pub page_margin_twips: u32,
    pub styles: RoleStyles,
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self {
            title_max_chars: 150,
            author_window: 5,
            institution_markers: vec![
                "Department".to_string(),
                "University".to_string(),
                "@".to_string(),
            ],
            heading_max_chars: 150,
            heading_max_words: 10,
            all_caps_max_chars: 100,
            reference_pattern: r"^[A-Z][a-z]+.*\(\d{4}\)".to_string(),
            page_margin_twips: 1440,
            styles: RoleStyles::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleStyles {
    pub title: RoleStyle,
    pub author: RoleStyle,
    pub heading: RoleStyle,
    pub reference: RoleStyle,
    pub body: RoleStyle,
}

impl RoleStyles {
    pub fn for_role(&self, role: ParagraphRole) -> &RoleStyle {
        match role {
            ParagraphRole::Title => &self.title,
            ParagraphRole::Author => &self.author,
            ParagraphRole::Heading => &self.heading,
            ParagraphRole::Reference => &self.reference,
            ParagraphRole::Body => &self.body,
        }
    }
}

impl Default for RoleStyles {
    fn default() -> Self {
        Self {
            title: RoleStyle {
                size: 32,
                bold: true,
                alignment: Alignment::Center,
                spacing: Spacing {
                    before: Some(0),
                    after: Some(480),
                    line: None,
                },
                indent: None,
            },
            author: RoleStyle {
                size: 22,
                bold: false,
                alignment: Alignment::Center,
                spacing: Spacing {
                    before: None,
                    after: Some(120),
                    line: None,
                },
                indent: None,
            },
            heading: RoleStyle {
                size: 28,
                bold: true,
                alignment: Alignment::Left,
                spacing: Spacing {
                    before: Some(400),
                    after: Some(200),
                    line: None,
                },
                indent: None,
            },
            reference: RoleStyle {
                size: 20,
                bold: false,
                alignment: Alignment::Left,
                spacing: Spacing {
                    before: None,
                    after: Some(120),
                    line: None,
                },
                indent: Some(Indent {
                    left: 360,
                    hanging: 360,
                }),
            },
            body: RoleStyle {
                size: 24,
                bold: false,
                alignment: Alignment::Justified,
                spacing: Spacing {
                    before: None,
                    after: Some(240),
                    line: Some(360),
                },
                indent: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest document accepted for analysis, in bytes
    pub max_document_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: 10 * 1024 * 1024,
        }
    }
}

impl GhostscanConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: GhostscanConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!(path = p, error = %e, "failed to load config, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
