use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// Import from ghostscan-core
use ghostscan_core::comparator::{compare_code, detect_language, render_diff_report, DiffKind};
use ghostscan_core::report::{character_csv, AnalysisReport};
use ghostscan_core::scanner::{aggressive_cleanup, character_details};
use ghostscan_core::{DocumentProcessor, GhostscanConfig};

// Import CLI utilities
use ghostscan::input::{default_output_path, read_document, read_text_input};

#[derive(Parser)]
#[command(name = "ghostscan")]
#[command(about = "Find and remove invisible Unicode characters in text and Word documents")]
struct Cli {
    /// Path to custom config file (YAML format)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log the timing of every pipeline step
    #[arg(long, global = true)]
    profile: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan text for invisible characters (reads stdin when no input is given)
    Scan {
        /// Text to scan
        #[arg(short, long, conflicts_with = "input")]
        text: Option<String>,

        /// Path to a text file to scan
        #[arg(short, long)]
        input: Option<String>,

        /// Write the cleaned text here
        #[arg(short, long)]
        output: Option<String>,

        /// Write a JSON analysis report here
        #[arg(long)]
        report: Option<String>,

        /// Strip every suspicious character straight from the catalog
        #[arg(long)]
        aggressive: bool,
    },

    /// Per-character breakdown of a text file
    Details {
        /// Path to the text file
        #[arg(short, long)]
        input: String,

        /// Write the character table as CSV instead of printing it
        #[arg(long)]
        csv: Option<String>,
    },

    /// Clean a Word document while keeping its paragraph formatting
    Docx {
        /// Path to the .docx file
        #[arg(short, long)]
        input: String,

        /// Output path (default: <input>_cleaned.docx)
        #[arg(short, long)]
        output: Option<String>,

        /// Write a JSON analysis report here
        #[arg(long)]
        report: Option<String>,
    },

    /// Compare two code files line by line and guess their languages
    Compare {
        left: String,
        right: String,

        /// Write a plain-text diff report here
        #[arg(long)]
        diff: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.profile);

    println!("👻 Ghostscan");

    let config = GhostscanConfig::load_with_fallback(cli.config.as_deref());
    if let Some(config_path) = &cli.config {
        println!("📋 Loaded config from: {}", config_path);
    }
    tracing::debug!(rebuild = ?config.rebuild, limits = ?config.limits, "configuration");

    let processor = DocumentProcessor::new(&config)?.with_profiling(cli.profile);

    let outcome = match cli.command {
        Command::Scan {
            text,
            input,
            output,
            report,
            aggressive,
        } => run_scan(&processor, text.as_deref(), input.as_deref(), output, report, aggressive),
        Command::Details { input, csv } => run_details(&input, csv),
        Command::Docx { input, output, report } => run_docx(&processor, &config, &input, output, report),
        Command::Compare { left, right, diff } => run_compare(&left, &right, diff),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(profile: bool) {
    let default_filter = if profile { "warn,ghostscan_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("GHOSTSCAN_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_scan(
    processor: &DocumentProcessor,
    text: Option<&str>,
    input: Option<&str>,
    output: Option<String>,
    report: Option<String>,
    aggressive: bool,
) -> Result<()> {
    let (source, content) = read_text_input(text, input)?;
    println!("🔍 Scanning: {}", source);

    let analysis = processor.analyze_text(&content);
    if analysis.characters.is_empty() {
        println!("✅ No invisible characters found");
    } else {
        println!("⚠️  Found {} invisible character(s):", analysis.characters.len());
        for detected in &analysis.characters {
            println!(
                "   - {} {} [{}] (offset {})",
                detected.hex(),
                detected.name,
                detected.category.label(),
                detected.offset
            );
        }
        println!("\n🖍️  Highlighted:\n{}", analysis.highlighted_text);
    }

    if let Some(output) = output {
        let cleaned = if aggressive {
            aggressive_cleanup(&content)
        } else {
            analysis.cleaned_text.clone()
        };
        std::fs::write(&output, cleaned).with_context(|| format!("Failed to write {output}"))?;
        println!("💾 Cleaned text saved to: {}", output);
    }

    if let Some(report_path) = report {
        let json = AnalysisReport::from_text(&source, &analysis).to_json()?;
        std::fs::write(&report_path, json).with_context(|| format!("Failed to write {report_path}"))?;
        println!("💾 Report saved to: {}", report_path);
    }

    Ok(())
}

fn run_details(input: &str, csv: Option<String>) -> Result<()> {
    let content = std::fs::read_to_string(input).with_context(|| format!("Failed to read input file: {input}"))?;

    if let Some(csv_path) = csv {
        std::fs::write(&csv_path, character_csv(&content)?)
            .with_context(|| format!("Failed to write {csv_path}"))?;
        println!("💾 Character table saved to: {}", csv_path);
        return Ok(());
    }

    for detail in character_details(&content) {
        let marker = if detail.is_invisible { "⚠️ " } else { "  " };
        let shown = if detail.is_invisible || detail.character.is_control() {
            ' '
        } else {
            detail.character
        };
        println!(
            "{} {:>6}  {}  {:<8} {:<20} {}",
            marker, detail.index, shown, detail.code_point_hex, detail.block, detail.name
        );
    }

    Ok(())
}

fn run_docx(
    processor: &DocumentProcessor,
    config: &GhostscanConfig,
    input: &str,
    output: Option<String>,
    report: Option<String>,
) -> Result<()> {
    let input_path = Path::new(input);
    let bytes = read_document(input_path, processor.adapter(), &config.limits)?;
    let file_name = input_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(input);

    println!("📄 Processing: {} ({})", input, processor.adapter().name());
    let analysis = processor.analyze_docx(&bytes, file_name)?;
    println!("✅ Parsed {} paragraph(s)", analysis.paragraphs.len());

    if analysis.detected_characters.is_empty() {
        println!("✅ No invisible characters found");
    } else {
        println!("⚠️  Invisible characters:");
        for aggregate in &analysis.detected_characters {
            println!(
                "   - U+{:04X} {} x{}",
                aggregate.code_point, aggregate.name, aggregate.count
            );
        }
    }

    let cleaned = processor.create_cleaned_docx(&bytes, &analysis.cleaned_text)?;
    let output_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(input_path, "cleaned", "docx"));
    std::fs::write(&output_path, cleaned)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    println!("💾 Cleaned document saved to: {}", output_path.display());

    if let Some(report_path) = report {
        let json = AnalysisReport::from_docx(&analysis).to_json()?;
        std::fs::write(&report_path, json).with_context(|| format!("Failed to write {report_path}"))?;
        println!("💾 Report saved to: {}", report_path);
    }

    Ok(())
}

fn run_compare(left: &str, right: &str, diff: Option<String>) -> Result<()> {
    let left_code = std::fs::read_to_string(left).with_context(|| format!("Failed to read {left}"))?;
    let right_code = std::fs::read_to_string(right).with_context(|| format!("Failed to read {right}"))?;

    for (path, code) in [(left, &left_code), (right, &right_code)] {
        let detection = detect_language(code);
        println!(
            "🔤 {}: {} ({:.0}%)",
            path,
            detection.language,
            detection.confidence * 100.0
        );
    }

    let diffs = compare_code(&left_code, &right_code);
    if diffs.is_empty() {
        println!("✅ Files are identical line by line");
    } else {
        println!("📊 {} differing line(s):", diffs.len());
        for line in &diffs {
            match line.kind {
                DiffKind::Added => println!("   {:>4} + {}", line.line_number, line.right),
                DiffKind::Removed => println!("   {:>4} - {}", line.line_number, line.left),
                DiffKind::Modified => {
                    println!("   {:>4} - {}", line.line_number, line.left);
                    println!("   {:>4} + {}", line.line_number, line.right);
                }
            }
        }
    }

    if let Some(diff_path) = diff {
        let language = detect_language(&left_code).language;
        let rendered = render_diff_report(&language, &left_code, &right_code, chrono::Utc::now());
        std::fs::write(&diff_path, rendered).with_context(|| format!("Failed to write {diff_path}"))?;
        println!("💾 Diff saved to: {}", diff_path);
    }

    Ok(())
}
