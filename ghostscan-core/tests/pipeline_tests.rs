//! Pipeline tests for the text and DOCX paths.
//!
//! DOCX fixtures are assembled in memory with the `zip` crate, so no binary
//! files live in the repository. Each fixture is a bare package holding
//! `[Content_Types].xml` and `word/document.xml`, which is all the flatten
//! step reads.

use ghostscan_core::comparator::{compare_code, detect_language};
use ghostscan_core::documents::rebuild::rebuild_paragraphs;
use ghostscan_core::report::AnalysisReport;
use ghostscan_core::rules::RoleEngine;
use ghostscan_core::config::RoleStyles;
use ghostscan_core::*;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

// ============================================================================
// Fixture helpers
// ============================================================================

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

fn package(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        zip.start_file(*name, FileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn docx_with_body(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    );
    package(&[
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("word/document.xml", document.as_bytes()),
    ])
}

/// A short paper: title, author line, body with hidden characters, heading,
/// and a reference.
fn paper_docx() -> Vec<u8> {
    docx_with_body(concat!(
        r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Invisible Ink</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>Jane Roe, Department of Linguistics</w:t></w:r></w:p>"#,
        r#"<w:p>"#,
        r#"<w:r><w:t xml:space="preserve">This sentence hides a </w:t></w:r>"#,
        r#"<w:r><w:rPr><w:i/></w:rPr><w:t>zero&#x200B;width</w:t></w:r>"#,
        r#"<w:r><w:t xml:space="preserve"> space and a BOM&#xFEFF;.</w:t></w:r>"#,
        r#"</w:p>"#,
        r#"<w:p><w:r><w:t>Conclusion</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>Shannon, C. E. A mathematical theory of communication (1948).</w:t></w:r></w:p>"#,
    ))
}

fn processor() -> DocumentProcessor {
    DocumentProcessor::default()
}

// ============================================================================
// Text pipeline
// ============================================================================

mod text_pipeline {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "plain ascii",
        "Hello\u{200B}World",
        "\u{FEFF}text",
        "a\u{200B}b\u{200B}c",
        "\u{202E}evil\u{202C} and \u{2066}isolate\u{2069}",
        "bell\u{07} escape\u{1B} del\u{7F} c1\u{85}",
        "tab\tnewline\ncarriage\r",
        "emoji 😀 and \u{1D173} musical",
        "\u{200B}\u{200C}\u{200D}\u{2060}",
        "Ünïcödé with \u{00AD}soft hyphen",
    ];

    #[test]
    fn basic_detection_scenario() {
        let analysis = processor().analyze_text("Hello\u{200B}World");
        assert_eq!(analysis.characters.len(), 1);
        assert_eq!(analysis.characters[0].code_point, 0x200B);
        assert!(analysis.characters[0].name.contains("ZERO WIDTH SPACE"));
        assert_eq!(analysis.cleaned_text, "HelloWorld");
        assert_eq!(analysis.highlighted_text, "Hello⦿World");
    }

    #[test]
    fn bom_is_stripped() {
        assert_eq!(detect_invisible_characters("\u{FEFF}text").cleaned_text, "text");
    }

    #[test]
    fn control_characters_are_named_generically() {
        let detected = scan("a\u{01}b");
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].name, "CONTROL CHARACTER");
    }

    #[test]
    fn cleaning_is_a_fixed_point() {
        for sample in SAMPLES {
            let cleaned = detect_invisible_characters(sample).cleaned_text;
            assert!(scan(&cleaned).is_empty(), "{sample:?} left characters behind");
            assert_eq!(detect_invisible_characters(&cleaned).cleaned_text, cleaned);
        }
    }

    #[test]
    fn highlight_keeps_every_unflagged_scalar() {
        for sample in SAMPLES {
            let detected = scan(sample);
            let highlighted = highlight(sample, &detected);
            assert_eq!(highlighted.chars().count(), sample.chars().count());

            let kept = highlighted.chars().filter(|c| *c != '⦿').count();
            let unflagged = sample
                .chars()
                .filter(|c| !detected.iter().any(|d| d.character == *c))
                .count();
            assert_eq!(kept, unflagged, "{sample:?}");
        }
    }

    #[test]
    fn detections_are_in_text_order() {
        for sample in SAMPLES {
            let offsets: Vec<usize> = scan(sample).iter().map(|d| d.offset).collect();
            assert!(offsets.windows(2).all(|w| w[0] < w[1]), "{sample:?}");
        }
    }

    #[test]
    fn line_breaks_are_never_flagged() {
        assert!(scan("newline\ncarriage\r\n").is_empty());
    }

    #[test]
    fn tab_is_flagged_by_its_catalog_name() {
        let analysis = processor().analyze_text("tab\tnewline\ncarriage\r");
        assert_eq!(analysis.characters.len(), 1);
        assert_eq!(analysis.characters[0].name, "TAB (→)");
        assert_eq!(analysis.cleaned_text, "tabnewline\ncarriage\r");
    }

    #[test]
    fn astral_characters_are_one_occurrence() {
        let detected = scan("x\u{E0001}y");
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].utf16_width(), 2);
        assert!(scan("😀").is_empty());
    }

    #[test]
    fn only_invisible_input_cleans_to_empty() {
        let text = "\u{200B}\u{200C}\u{200D}\u{2060}";
        let analysis = processor().analyze_text(text);
        assert_eq!(analysis.cleaned_text, "");
        assert_eq!(analysis.highlighted_text, "⦿⦿⦿⦿");
    }

    #[test]
    fn utf16_lone_surrogates_survive() {
        let units = [0xD800, 0x200B, 0x0061, 0xDC00];
        let detected = scan_utf16(&units);
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].offset, 1);
        assert_eq!(clean_utf16(&units, &detected), vec![0xD800, 0x0061, 0xDC00]);
    }

    #[test]
    fn text_report_counts() {
        let analysis = processor().analyze_text("a\u{200B}b\u{200B}c\u{01}");
        let report = AnalysisReport::from_text("sample", &analysis);
        assert_eq!(report.invisible_count, 3);
        assert_eq!(report.unique_invisible, 2);
        assert_eq!(report.characters[0].positions, vec![0, 1]);
    }
}

// ============================================================================
// DOCX pipeline
// ============================================================================

mod docx_pipeline {
    use super::*;

    #[test]
    fn flatten_joins_paragraphs_with_blank_lines() {
        let flat = DocxAdapter::default().flatten(&paper_docx()).unwrap();
        assert_eq!(flat.paragraphs.len(), 5);
        assert_eq!(
            flat.text,
            "Invisible Ink\n\n\
             Jane Roe, Department of Linguistics\n\n\
             This sentence hides a zero\u{200B}width space and a BOM\u{FEFF}.\n\n\
             Conclusion\n\n\
             Shannon, C. E. A mathematical theory of communication (1948)."
        );
        assert_eq!(flat.paragraphs[0].alignment.as_deref(), Some("center"));
        assert!(flat.paragraphs[0].runs[0].bold);
        assert!(flat.paragraphs[2].runs[1].italic);
    }

    #[test]
    fn analyze_docx_aggregates_detections() {
        let analysis = processor().analyze_docx(&paper_docx(), "paper.docx").unwrap();
        assert_eq!(analysis.file_name, "paper.docx");
        assert_eq!(analysis.detected_characters.len(), 2);
        assert_eq!(analysis.detected_characters[0].code_point, 0x200B);
        assert_eq!(analysis.detected_characters[1].code_point, 0xFEFF);
        assert!(analysis.cleaned_text.contains("hides a zerowidth space and a BOM."));

        let report = AnalysisReport::from_docx(&analysis);
        assert_eq!(report.invisible_count, 2);
    }

    #[test]
    fn roles_follow_paragraph_shape() {
        let flat = DocxAdapter::default().flatten(&paper_docx()).unwrap();
        let cleaned = detect_invisible_characters(&flat.text).cleaned_text;
        let rebuilt = DocxAdapter::default().rebuild(&flat.paragraphs, &cleaned);

        let roles: Vec<ParagraphRole> = rebuilt.iter().map(|p| p.role).collect();
        assert_eq!(
            roles,
            vec![
                ParagraphRole::Title,
                ParagraphRole::Author,
                ParagraphRole::Body,
                ParagraphRole::Heading,
                ParagraphRole::Reference,
            ]
        );
        assert_eq!(rebuilt[4].indent.map(|i| i.hanging), Some(360));
    }

    #[test]
    fn cleaned_document_round_trips() {
        let processor = processor();
        let original = paper_docx();
        let analysis = processor.analyze_docx(&original, "paper.docx").unwrap();

        let cleaned_bytes = processor
            .create_cleaned_docx(&original, &analysis.cleaned_text)
            .unwrap();
        let reread = processor.analyze_docx(&cleaned_bytes, "paper.clean.docx").unwrap();

        assert_eq!(reread.original_text, analysis.cleaned_text);
        assert!(reread.detected_characters.is_empty());

        let paragraphs = &reread.paragraphs;
        assert_eq!(paragraphs.len(), 5);
        assert_eq!(paragraphs[0].alignment.as_deref(), Some("center"));
        assert!(paragraphs[0].runs.iter().all(|r| r.bold));
        assert_eq!(paragraphs[2].alignment.as_deref(), Some("both"));
        // slices follow the original run lengths, so the italic run shifts
        assert!(paragraphs[2].runs[1].italic);
        assert!(paragraphs[2].runs[1].text.starts_with("zerowidth"));
    }

    #[test]
    fn vanished_paragraph_still_rebuilds_every_block() {
        let bytes = docx_with_body(concat!(
            r#"<w:p><w:r><w:t>First Heading</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>&#x200B;&#x200B;</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>closing words.</w:t></w:r></w:p>"#,
        ));
        let processor = processor();
        let analysis = processor.analyze_docx(&bytes, "drift.docx").unwrap();
        assert_eq!(analysis.paragraphs.len(), 3);

        let rebuilt = processor.create_cleaned_docx(&bytes, &analysis.cleaned_text).unwrap();
        let flat = DocxAdapter::default().flatten(&rebuilt).unwrap();
        assert_eq!(flat.text, "First Heading\n\nclosing words.");
    }

    #[test]
    fn rebuild_with_mismatched_lengths_never_fails() {
        let engine = RoleEngine::default();
        let styles = RoleStyles::default();
        let original = vec![ParsedParagraph::default(); 2];

        let more_blocks = rebuild_paragraphs(&original, "one\n\ntwo\n\nthree\n\nfour", &engine, &styles);
        assert_eq!(more_blocks.len(), 4);

        let fewer_blocks = rebuild_paragraphs(&original, "only", &engine, &styles);
        assert_eq!(fewer_blocks.len(), 1);

        assert!(rebuild_paragraphs(&original, "", &engine, &styles).is_empty());
    }

    #[test]
    fn tabs_are_cleaned_out_of_documents() {
        let bytes = docx_with_body(r#"<w:p><w:r><w:t>left</w:t><w:tab/><w:t>right</w:t></w:r></w:p>"#);
        let processor = processor();
        let analysis = processor.analyze_docx(&bytes, "tabs.docx").unwrap();
        assert_eq!(analysis.original_text, "left\tright");
        assert_eq!(analysis.detected_characters.len(), 1);
        assert_eq!(analysis.detected_characters[0].code_point, 0x09);
        assert_eq!(analysis.cleaned_text, "leftright");

        let rebuilt = processor.create_cleaned_docx(&bytes, &analysis.cleaned_text).unwrap();
        let reread = processor.analyze_docx(&rebuilt, "tabs.clean.docx").unwrap();
        assert_eq!(reread.original_text, "leftright");
        assert!(reread.detected_characters.is_empty());
    }
}

// ============================================================================
// Malformed containers
// ============================================================================

mod invalid_structure {
    use super::*;

    fn assert_invalid(bytes: &[u8]) {
        let err = DocxAdapter::default().flatten(bytes).unwrap_err();
        assert!(err.is_invalid_structure(), "unexpected error: {err}");
    }

    #[test]
    fn not_a_zip() {
        assert_invalid(b"this is plain text, not a container");
        assert_invalid(b"");
    }

    #[test]
    fn missing_document_part() {
        assert_invalid(&package(&[("[Content_Types].xml", CONTENT_TYPES.as_bytes())]));
    }

    #[test]
    fn malformed_markup() {
        assert_invalid(&package(&[(
            "word/document.xml",
            b"<w:document><w:body><w:p></w:body></w:document>".as_slice(),
        )]));
    }

    #[test]
    fn missing_body() {
        assert_invalid(&package(&[(
            "word/document.xml",
            br#"<w:document xmlns:w="x"><w:p/></w:document>"#.as_slice(),
        )]));
    }

    #[test]
    fn document_part_not_utf8() {
        assert_invalid(&package(&[("word/document.xml", &[0xFF, 0xFE, 0x00, 0x3C][..])]));
    }

    #[test]
    fn processor_surfaces_the_classified_error() {
        let err = processor().analyze_docx(b"garbage", "bad.docx").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidStructure(_)));
    }

    #[test]
    fn rebuild_from_corrupt_original_degrades() {
        let bytes = processor()
            .create_cleaned_docx(b"garbage", "Recovered Title\n\nbody text follows here.")
            .unwrap();
        let flat = DocxAdapter::default().flatten(&bytes).unwrap();
        assert_eq!(flat.paragraphs.len(), 2);
        assert!(flat.paragraphs[0].runs[0].bold);
        assert!(!flat.paragraphs[1].runs[0].bold);
    }
}

// ============================================================================
// Concurrency and comparator
// ============================================================================

mod shared_use {
    use super::*;

    #[test]
    fn concurrent_scans_share_one_processor() {
        let processor = processor();
        let document = paper_docx();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let processor = &processor;
                    let document = &document;
                    scope.spawn(move || {
                        let text = format!("run {i}\u{200B}\u{FEFF}");
                        let analysis = processor.analyze_text(&text);
                        let docx = processor.analyze_docx(document, "paper.docx").unwrap();
                        (analysis.characters.len(), docx.detected_characters.len())
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), (2, 2));
            }
        });
    }

    #[test]
    fn comparator_basics() {
        assert_eq!(detect_language("package main\nfunc main() {}").language, "go");
        let diffs = compare_code("let a = 1;\nlet b = 2;", "let a = 1;\nlet b = 3;");
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].line_number, 2);
    }
}
