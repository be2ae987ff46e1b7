//! Code Comparator
//!
//! Two deliberately naive tools kept beside the scanner:
//!
//! - [`detect_language`]: regex votes over a fixed language table, with a
//!   bonus for a matching shebang and a confidence floor below which the
//!   answer is `unknown`.
//! - [`compare_code`]: line `i` of one input against line `i` of the other.
//!   There is no alignment, so one inserted line marks every following line
//!   as modified.

use anyhow::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Detections below this confidence are reported as `unknown`.
pub const MIN_CONFIDENCE: f64 = 0.3;

/// Votes added when the shebang interpreter names the language.
const SHEBANG_BONUS: usize = 2;

pub const UNKNOWN_LANGUAGE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCategory {
    Compiled,
    Interpreted,
    Markup,
    Data,
    Scripting,
    Functional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageDetails {
    pub patterns_matched: Vec<String>,
    pub file_extensions: Vec<String>,
    pub shebang: Option<String>,
    pub unique_features: Vec<String>,
    pub category: LanguageCategory,
    pub popularity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageDetection {
    pub language: String,
    /// Share of the language's patterns that matched, capped at 1.0
    pub confidence: f64,
    pub details: LanguageDetails,
}

impl LanguageDetection {
    pub fn unknown() -> Self {
        Self {
            language: UNKNOWN_LANGUAGE.to_string(),
            confidence: 0.0,
            details: LanguageDetails {
                patterns_matched: Vec::new(),
                file_extensions: Vec::new(),
                shebang: None,
                unique_features: Vec::new(),
                category: LanguageCategory::Scripting,
                popularity: 0,
            },
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.language == UNKNOWN_LANGUAGE
    }
}

struct LanguageProfile {
    name: &'static str,
    patterns: &'static [&'static str],
    extensions: &'static [&'static str],
    category: LanguageCategory,
    popularity: u8,
    unique_features: &'static [&'static str],
}

// Order matters: on equal confidence the earlier language wins.
const PROFILES: &[LanguageProfile] = &[
    LanguageProfile {
        name: "python",
        patterns: &[r"\bdef\s+\w+\(", r"\bself\b", r"(?m):\s*$", r"\bprint\s*\("],
        extensions: &[".py"],
        category: LanguageCategory::Interpreted,
        popularity: 95,
        unique_features: &["Colon-based blocks", "Indentation-sensitive", "Dynamic typing"],
    },
    LanguageProfile {
        name: "javascript",
        patterns: &[r"=>", r"\bconsole\.log\b", r"\bexport\s+(default|const|function)"],
        extensions: &[".js", ".jsx"],
        category: LanguageCategory::Interpreted,
        popularity: 98,
        unique_features: &["Arrow functions", "Prototype-based OOP", "Event-driven"],
    },
    LanguageProfile {
        name: "typescript",
        patterns: &[r":\s*(string|number|boolean|any|unknown|void|interface|type)\b"],
        extensions: &[".ts", ".tsx"],
        category: LanguageCategory::Interpreted,
        popularity: 92,
        unique_features: &["Static typing", "Interfaces", "Type annotations"],
    },
    LanguageProfile {
        name: "cpp",
        patterns: &[r"#include\s*<", r"\bstd::", r"\bcout\s*<<"],
        extensions: &[".cpp", ".hpp"],
        category: LanguageCategory::Compiled,
        popularity: 93,
        unique_features: &["Header includes", "Namespace std", "Operator overloading"],
    },
    LanguageProfile {
        name: "c",
        patterns: &[r"#include\s*<", r"\bprintf\s*\(", r"\bint\s+main\s*\("],
        extensions: &[".c"],
        category: LanguageCategory::Compiled,
        popularity: 90,
        unique_features: &["C stdio", "Manual memory", "Procedural design"],
    },
    LanguageProfile {
        name: "java",
        patterns: &[
            r"\bpublic\s+class\b",
            r"\bSystem\.out\.println\b",
            r"\bstatic\s+void\s+main\b",
        ],
        extensions: &[".java"],
        category: LanguageCategory::Compiled,
        popularity: 96,
        unique_features: &["Class-based OOP", "JVM runtime", "Static typing"],
    },
    LanguageProfile {
        name: "rust",
        patterns: &[r"\bfn\s+\w+\s*[(<]", r"\bmut\b", r"->\s*\w+", r"\.unwrap\(\)"],
        extensions: &[".rs"],
        category: LanguageCategory::Compiled,
        popularity: 88,
        unique_features: &["Memory safety", "Ownership system", "Zero-cost abstractions"],
    },
    LanguageProfile {
        name: "go",
        patterns: &[r"\bfunc\s+\w+\(", r"\berr\s*!=\s*nil\b", r"\bpackage\s+\w+"],
        extensions: &[".go"],
        category: LanguageCategory::Compiled,
        popularity: 85,
        unique_features: &["Goroutines", "Interfaces", "Built-in concurrency"],
    },
    LanguageProfile {
        name: "html",
        patterns: &[r"(?i)</?[a-z][\s\S]*?>", r"(?i)<!DOCTYPE\s+html>"],
        extensions: &[".html", ".htm"],
        category: LanguageCategory::Markup,
        popularity: 99,
        unique_features: &["Tag-based structure", "Semantic elements"],
    },
    LanguageProfile {
        name: "css",
        patterns: &[r"\b(color|background|font-size|display|position|margin|padding)\b|@media\b"],
        extensions: &[".css"],
        category: LanguageCategory::Markup,
        popularity: 95,
        unique_features: &["Cascade and inheritance", "Selectors specificity"],
    },
    LanguageProfile {
        name: "json",
        patterns: &[r"^\s*\{[\s\S]*\}\s*$", r#""[\w-]+":"#],
        extensions: &[".json"],
        category: LanguageCategory::Data,
        popularity: 97,
        unique_features: &["Key-value pairs", "No comments", "Strict structure"],
    },
];

static PROFILE_REGEXES: LazyLock<Vec<Vec<Regex>>> = LazyLock::new(|| {
    PROFILES
        .iter()
        .map(|profile| {
            profile
                .patterns
                .iter()
                .map(|pattern| Regex::new(pattern).unwrap())
                .collect()
        })
        .collect()
});

// Interpreter name, with any directory and trailing version digits dropped:
// "#!/usr/bin/env python3" -> "python", "#!/bin/bash" -> "bash"
static SHEBANG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#!\s*(?:/usr/bin/env\s+)?(?:\S*/)?([A-Za-z+]+)").unwrap());

fn shebang_interpreter(code: &str) -> Option<String> {
    let name = SHEBANG_REGEX.captures(code)?.get(1)?.as_str().to_lowercase();
    Some(match name.as_str() {
        "node" | "nodejs" => "javascript".to_string(),
        _ => name,
    })
}

/// Best-scoring language for `code`, or `unknown` below [`MIN_CONFIDENCE`].
pub fn detect_language(code: &str) -> LanguageDetection {
    if code.is_empty() {
        return LanguageDetection::unknown();
    }

    let shebang = shebang_interpreter(code);
    let mut best: Option<LanguageDetection> = None;

    for (profile, regexes) in PROFILES.iter().zip(PROFILE_REGEXES.iter()) {
        let patterns_matched: Vec<String> = profile
            .patterns
            .iter()
            .zip(regexes)
            .filter(|(_, regex)| regex.is_match(code))
            .map(|(pattern, _)| pattern.to_string())
            .collect();

        let mut score = patterns_matched.len();
        if shebang.as_deref().is_some_and(|s| profile.name.contains(s)) {
            score += SHEBANG_BONUS;
        }

        let confidence = (score as f64 / regexes.len() as f64).min(1.0);
        let best_confidence = best.as_ref().map_or(0.0, |b| b.confidence);
        if confidence > best_confidence {
            best = Some(LanguageDetection {
                language: profile.name.to_string(),
                confidence,
                details: LanguageDetails {
                    patterns_matched,
                    file_extensions: profile.extensions.iter().map(|e| e.to_string()).collect(),
                    shebang: shebang.clone(),
                    unique_features: profile.unique_features.iter().map(|f| f.to_string()).collect(),
                    category: profile.category,
                    popularity: profile.popularity,
                },
            });
        }
    }

    match best {
        Some(detection) if detection.confidence >= MIN_CONFIDENCE => detection,
        _ => LanguageDetection::unknown(),
    }
}

/// Something that can name the language of a snippet, e.g. a remote service.
pub trait LanguageClassifier {
    fn classify(&self, code: &str) -> Result<LanguageDetection>;

    fn name(&self) -> &str;
}

/// The local regex heuristic behind the trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicClassifier;

impl LanguageClassifier for HeuristicClassifier {
    fn classify(&self, code: &str) -> Result<LanguageDetection> {
        Ok(detect_language(code))
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

/// Ask `classifier`; on any error use [`detect_language`]. No retry.
pub fn classify_with_fallback(classifier: &dyn LanguageClassifier, code: &str) -> LanguageDetection {
    match classifier.classify(code) {
        Ok(detection) => detection,
        Err(e) => {
            tracing::warn!(classifier = classifier.name(), error = %e, "classifier failed, using local heuristic");
            detect_language(code)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Added,
    Removed,
    Modified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiff {
    /// 1-based
    pub line_number: usize,
    pub kind: DiffKind,
    pub left: String,
    pub right: String,
}

/// Positional line comparison. A missing line reads as empty, so an extra
/// blank line at the end is not a difference.
pub fn compare_code(left: &str, right: &str) -> Vec<LineDiff> {
    let left_lines: Vec<&str> = left.split('\n').collect();
    let right_lines: Vec<&str> = right.split('\n').collect();
    let max = left_lines.len().max(right_lines.len());

    (0..max)
        .filter_map(|i| {
            let a = left_lines.get(i).copied().unwrap_or("");
            let b = right_lines.get(i).copied().unwrap_or("");
            if a == b {
                return None;
            }

            let kind = if i >= left_lines.len() {
                DiffKind::Added
            } else if i >= right_lines.len() {
                DiffKind::Removed
            } else {
                DiffKind::Modified
            };

            Some(LineDiff {
                line_number: i + 1,
                kind,
                left: a.to_string(),
                right: b.to_string(),
            })
        })
        .collect()
}

/// Plain-text diff export: both inputs in full, then one line per non-empty
/// line with `+ `, `- ` or two spaces in front.
pub fn render_diff_report(language: &str, left: &str, right: &str, generated_at: DateTime<Utc>) -> String {
    let rule = "=".repeat(50);
    let mut out = String::new();

    out.push_str(&format!("Language: {language}\n"));
    out.push_str(&format!("Generated: {}\n\n", generated_at.format("%Y-%m-%d %H:%M:%S UTC")));
    out.push_str(&format!("ORIGINAL CODE:\n{rule}\n{left}\n\n"));
    out.push_str(&format!("MODIFIED CODE:\n{rule}\n{right}\n\n"));
    out.push_str(&format!("DIFF:\n{rule}\n"));

    let left_lines: Vec<&str> = left.split('\n').collect();
    let right_lines: Vec<&str> = right.split('\n').collect();
    let mut lines = Vec::new();
    for i in 0..left_lines.len().max(right_lines.len()) {
        let a = left_lines.get(i).copied().unwrap_or("");
        let b = right_lines.get(i).copied().unwrap_or("");
        if a == b {
            if !a.is_empty() {
                lines.push(format!("  {a}"));
            }
            continue;
        }
        if !a.is_empty() {
            lines.push(format!("- {a}"));
        }
        if !b.is_empty() {
            lines.push(format!("+ {b}"));
        }
    }
    out.push_str(&lines.join("\n"));

    out
}
