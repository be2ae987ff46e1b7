use crate::config::RebuildConfig;
use crate::types::ParagraphRole;
use anyhow::Result;

use super::role_detection::{AuthorRule, HeadingRule, ReferenceRule, TitleRule};

/// What a role rule gets to look at for one cleaned text block.
#[derive(Debug, Clone, Copy)]
pub struct BlockContext<'a> {
    pub text: &'a str,
    /// Position of the block among the cleaned blocks
    pub index: usize,
    /// Number of cleaned blocks in the document
    pub total: usize,
}

impl<'a> BlockContext<'a> {
    pub fn new(text: &'a str, index: usize, total: usize) -> Self {
        Self { text, index, total }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn ends_with_terminal_punctuation(&self) -> bool {
        self.text
            .chars()
            .last()
            .is_some_and(|c| matches!(c, '.' | '!' | '?' | ':' | ';'))
    }

    pub fn starts_with_capital(&self) -> bool {
        self.text.chars().next().is_some_and(|c| c.is_ascii_uppercase())
    }

    pub fn word_count(&self) -> usize {
        self.text.split(' ').count()
    }
}

/// One predicate in the role chain. The first rule that matches decides the role.
pub trait RoleRule: Send + Sync {
    fn role(&self) -> ParagraphRole;

    fn matches(&self, block: &BlockContext<'_>) -> bool;

    fn name(&self) -> &str;
}

/// Ordered role heuristics: title, author, heading, reference, then body.
pub struct RoleEngine {
    rules: Vec<Box<dyn RoleRule>>,
}

impl RoleEngine {
    pub fn new(config: &RebuildConfig) -> Result<Self> {
        let rules: Vec<Box<dyn RoleRule>> = vec![
            Box::new(TitleRule::new(config)),
            Box::new(AuthorRule::new(config)),
            Box::new(HeadingRule::new(config)),
            Box::new(ReferenceRule::new(config)?),
        ];
        Ok(Self::with_rules(rules))
    }

    pub fn with_rules(rules: Vec<Box<dyn RoleRule>>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, block: &BlockContext<'_>) -> ParagraphRole {
        self.rules
            .iter()
            .find(|rule| rule.matches(block))
            .map(|rule| {
                tracing::trace!(rule = rule.name(), index = block.index, "role rule matched");
                rule.role()
            })
            .unwrap_or(ParagraphRole::Body)
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for RoleEngine {
    fn default() -> Self {
        let config = RebuildConfig::default();
        Self::with_rules(vec![
            Box::new(TitleRule::new(&config)),
            Box::new(AuthorRule::new(&config)),
            Box::new(HeadingRule::new(&config)),
            Box::new(ReferenceRule::default()),
        ])
    }
}
