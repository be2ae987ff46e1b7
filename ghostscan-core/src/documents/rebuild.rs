// Rebuild - cleaned flat text back into styled paragraphs
//
// Blocks are paired with the original paragraphs by position. When cleaning
// removed a whole paragraph the pairing drifts from that point on; every
// block is still emitted.
//
// Run formatting is carried over by slicing the cleaned block into prefixes
// as long as the original runs (in chars). This is a heuristic and not an
// alignment: formatting shifts when cleaning changed the text length.

use super::PARAGRAPH_BREAK;
use crate::config::RoleStyles;
use crate::rules::{BlockContext, RoleEngine};
use crate::types::{ParsedParagraph, ParsedRun, RebuiltParagraph, RebuiltRun, RoleStyle};

/// Split cleaned text on the paragraph break; blocks are trimmed and blank
/// blocks dropped.
pub fn split_blocks(cleaned_text: &str) -> Vec<&str> {
    cleaned_text
        .split(PARAGRAPH_BREAK)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// One rebuilt paragraph per cleaned block. Never fails; with no original
/// paragraphs every block gets role styling only.
pub fn rebuild_paragraphs(
    original: &[ParsedParagraph],
    cleaned_text: &str,
    engine: &RoleEngine,
    styles: &RoleStyles,
) -> Vec<RebuiltParagraph> {
    let blocks = split_blocks(cleaned_text);
    if !original.is_empty() && blocks.len() != original.len() {
        tracing::warn!(
            blocks = blocks.len(),
            paragraphs = original.len(),
            "paragraph count changed during cleaning, formatting may be misattributed"
        );
    }

    let total = blocks.len();
    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let role = engine.classify(&BlockContext::new(block, index, total));
            let style = styles.for_role(role);
            let runs = match original.get(index) {
                Some(paragraph) if !paragraph.runs.is_empty() => {
                    redistribute(block, &paragraph.runs, style)
                }
                _ => vec![role_run(block.to_string(), style)],
            };

            RebuiltParagraph {
                role,
                runs,
                alignment: style.alignment,
                spacing: style.spacing,
                indent: style.indent,
            }
        })
        .collect()
}

fn redistribute(block: &str, runs: &[ParsedRun], style: &RoleStyle) -> Vec<RebuiltRun> {
    let mut rebuilt = Vec::with_capacity(runs.len() + 1);
    let mut rest = block;

    for run in runs {
        if rest.is_empty() {
            break;
        }
        let split = byte_offset_of_char(rest, run.char_len());
        let (head, tail) = rest.split_at(split);
        rest = tail;
        if head.is_empty() {
            continue;
        }

        rebuilt.push(RebuiltRun {
            text: head.to_string(),
            bold: run.bold || style.bold,
            italic: run.italic,
            underline: run.underline,
            superscript: run.superscript,
            subscript: run.subscript,
            size: style.size,
        });
    }

    if !rest.is_empty() {
        rebuilt.push(role_run(rest.to_string(), style));
    }

    rebuilt
}

fn role_run(text: String, style: &RoleStyle) -> RebuiltRun {
    RebuiltRun {
        text,
        bold: style.bold,
        italic: false,
        underline: false,
        superscript: false,
        subscript: false,
        size: style.size,
    }
}

// Byte offset after `chars` scalars, clamped to the end of `s`.
fn byte_offset_of_char(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}
