use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glossary_normalizer::canonical::CanonicalStats;
use glossary_normalizer::config::load_config;
use glossary_normalizer::io::OutputFormat;
use glossary_normalizer::pipeline::{self, ConsolidateSummary, NormalizeSummary};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "glossary-normalizer")]
#[command(about = "Turn OCR dumps and messy CSV exports into clean bilingual term pairs")]
struct Args {
    /// YAML configuration file (default: glossary.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Quiet mode - no summary output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pair up raw OCR lines (delimiter, next-line and midpoint rules)
    Normalize {
        /// Raw text file (.txt or .txt.bz2)
        input: PathBuf,
        /// Output pair file
        output: PathBuf,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// Sort pairs by target term
        #[arg(long)]
        sort: bool,
    },

    /// Extract word/definition pairs from every delimited file in a directory
    Consolidate {
        /// Directory holding the delimited files
        dir: PathBuf,
        /// Consolidated output file
        output: PathBuf,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },

    /// Swap reversed four-field records so one language is always the source
    Canonicalize {
        input: PathBuf,
        output: PathBuf,
        /// Canonical source language label (overrides config)
        #[arg(short, long)]
        language: Option<String>,
        /// Treat the first row as data rather than a header
        #[arg(long)]
        no_header: bool,
    },

    /// Sort a quoted file by its second field, keeping the header first
    Sort { input: PathBuf, output: PathBuf },

    /// Expand two-column pairs into labeled four-field records
    Label {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        source_label: String,
        #[arg(long)]
        target_label: String,
    },

    /// Prepend a literal string to every line
    Prefix {
        input: PathBuf,
        output: PathBuf,
        prefix: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("glossary_normalizer=info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref()).context("loading configuration")?;
    let start_time = Instant::now();

    match args.command {
        Command::Normalize { input, output, format, sort } => {
            let summary = pipeline::normalize_file(&input, &output, format, sort)
                .with_context(|| format!("normalizing {}", input.display()))?;
            if !args.quiet {
                print_normalize_summary(&summary, &output);
            }
        }

        Command::Consolidate { dir, output, format } => {
            let pb = if args.quiet {
                ProgressBar::hidden()
            } else {
                let pb = ProgressBar::new(0);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{bar:40} {pos}/{len} {msg}")
                        .context("progress template")?,
                );
                pb
            };
            let summary = pipeline::consolidate_dir(&dir, &output, &config, format, &pb)
                .with_context(|| format!("consolidating {}", dir.display()))?;
            if !args.quiet {
                print_consolidate_summary(&summary, &output);
            }
        }

        Command::Canonicalize { input, output, language, no_header } => {
            let language = language.unwrap_or_else(|| config.canonical_language.clone());
            let stats = pipeline::canonicalize_file(
                &input,
                &output,
                &language,
                config.record_delimiter,
                !no_header,
            )
            .with_context(|| format!("canonicalizing {}", input.display()))?;
            if !args.quiet {
                print_canonical_summary(&stats, &language, &output);
            }
        }

        Command::Sort { input, output } => {
            let rows = pipeline::sort_file(&input, &output)
                .with_context(|| format!("sorting {}", input.display()))?;
            if !args.quiet {
                println!("Wrote sorted file with {} rows (header preserved) to {}", rows, output.display());
            }
        }

        Command::Label { input, output, source_label, target_label } => {
            let count = pipeline::label_file(&input, &output, &source_label, &target_label)
                .with_context(|| format!("labeling {}", input.display()))?;
            if !args.quiet {
                println!("Wrote {} records to {}", count, output.display());
            }
        }

        Command::Prefix { input, output, prefix } => {
            let count = pipeline::prefix_file(&input, &output, &prefix)
                .with_context(|| format!("prefixing {}", input.display()))?;
            if !args.quiet {
                println!("Added prefix {:?} to {} lines in {}", prefix, count, output.display());
            }
        }
    }

    if !args.quiet {
        let elapsed = start_time.elapsed();
        println!("Time: {:.2}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn print_normalize_summary(summary: &NormalizeSummary, output: &Path) {
    let split = &summary.split;
    println!();
    println!("============================================================");
    println!("Output: {}", output.display());
    println!("Lines read: {}", split.lines);
    println!("Lines consumed: {}", split.consumed);
    println!("------------------------------------------------------------");
    println!("Separator splits: {}", split.separator);
    println!("Next-line targets: {}", split.separator_next_line);
    println!("Lone-token pairs: {}", split.lone_token);
    println!("Midpoint splits: {} (check these by hand)", split.midpoint);
    println!("Missing targets: {}", split.unpaired);
    println!("------------------------------------------------------------");
    println!("Empty pairs dropped: {}", summary.dropped_empty);
    println!("Duplicates dropped: {}", summary.duplicates);
    println!("Pairs written: {}", summary.emitted);
    println!("============================================================");
}

fn print_consolidate_summary(summary: &ConsolidateSummary, output: &Path) {
    let stats = &summary.extract;
    println!();
    println!("============================================================");
    println!("Output: {}", output.display());
    println!("Files read: {}", summary.files.len());
    println!("Lines read: {}", stats.lines);
    println!("------------------------------------------------------------");
    println!("Blank lines: {}", stats.blank);
    println!("Header lines: {}", stats.headers);
    println!("Structured parses: {}", stats.structured);
    println!("First-token splits: {}", stats.word_rest);
    println!("Quarantined lines: {}", stats.quarantined);
    println!("------------------------------------------------------------");
    println!("Duplicates dropped: {}", summary.duplicates);
    println!("Rows written: {}", summary.emitted);
    println!("============================================================");
}

fn print_canonical_summary(stats: &CanonicalStats, language: &str, output: &Path) {
    println!();
    println!("============================================================");
    println!("Output: {}", output.display());
    println!("Records: {}", stats.records);
    println!("Swapped to make {} the source: {}", language, stats.swapped);
    println!("Short rows left unchanged: {}", stats.passed_through);
    println!("============================================================");
}
