//! tocsmith: rebuild and cross-check the section hierarchy of a specification document.
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tocsmith::hierarchy::HierarchySummary;
use tocsmith::metadata::RunMetadata;
use tocsmith::schema::SchemaReport;
use tocsmith::{config, input, jsonl, pipeline, schema};
use tocsmith::{DocumentInput, Engine, Provenance, SectionSequence};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "tocsmith")]
#[command(about = "Rebuild and cross-check specification section hierarchies", long_about = None)]
struct Args {
    /// Log debug output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract sections from page text and reconcile the table of contents with the body
    Parse {
        /// Page text file, one page per form-feed-separated chunk
        #[arg(value_name = "PAGES")]
        pages: PathBuf,

        /// Page text file holding only the table of contents (detected if omitted)
        #[arg(long, value_name = "FILE")]
        toc: Option<PathBuf>,

        /// Document title stamped on every record
        #[arg(long)]
        doc_title: Option<String>,

        /// Directory to write output files to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Prefix for output file names
        #[arg(long)]
        prefix: Option<String>,

        /// Only accept body headings that carry a page number
        #[arg(long)]
        no_bare_headings: bool,
    },
    /// Check previously written section files against the schema and hierarchy rules
    Validate {
        /// Table of contents JSONL file
        #[arg(long, default_value = "spec_toc.jsonl")]
        toc_file: PathBuf,

        /// Body scan JSONL file
        #[arg(long, default_value = "spec_spec.jsonl")]
        spec_file: PathBuf,
    },
    /// Report coverage between previously written section files
    Coverage {
        /// Table of contents JSONL file
        #[arg(long, default_value = "spec_toc.jsonl")]
        toc_file: PathBuf,

        /// Body scan JSONL file
        #[arg(long, default_value = "spec_spec.jsonl")]
        spec_file: PathBuf,
    },
}

#[derive(Serialize)]
struct FileValidation {
    file: String,
    schema: SchemaReport,
    hierarchy: Option<HierarchySummary>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let cfg = config::Config::load();

    match args.command {
        Command::Parse {
            pages,
            toc,
            doc_title,
            out_dir,
            prefix,
            no_bare_headings,
        } => {
            let prefix = prefix.unwrap_or_else(|| cfg.output_prefix.clone());
            let options = ParseOptions {
                toc: toc.as_deref(),
                doc_title,
                out_dir: &out_dir,
                prefix: &prefix,
                bare_headings: cfg.body_bare_headings && !no_bare_headings,
            };
            cmd_parse(&cfg, &pages, &options)
        }
        Command::Validate {
            toc_file,
            spec_file,
        } => cmd_validate(&toc_file, &spec_file),
        Command::Coverage {
            toc_file,
            spec_file,
        } => cmd_coverage(&toc_file, &spec_file),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

struct ParseOptions<'a> {
    toc: Option<&'a Path>,
    doc_title: Option<String>,
    out_dir: &'a Path,
    prefix: &'a str,
    bare_headings: bool,
}

fn read_pages(path: &Path) -> Result<Vec<String>> {
    input::read_pages(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

fn cmd_parse(cfg: &config::Config, pages_path: &Path, opts: &ParseOptions<'_>) -> Result<()> {
    let pages = read_pages(pages_path)?;
    let doc_title = opts
        .doc_title
        .clone()
        .or_else(|| input::detect_doc_title(&pages, &cfg.title_keywords, cfg.title_scan_pages))
        .unwrap_or_else(|| cfg.doc_title.clone());
    info!(%doc_title, pages = pages.len(), "loaded {}", pages_path.display());

    let toc = if let Some(toc_path) = opts.toc {
        input::all_lines(&read_pages(toc_path)?)
    } else {
        let toc_pages =
            input::detect_toc_pages(&pages, cfg.toc_scan_pages, cfg.toc_min_numbered_lines);
        info!(?toc_pages, "detected table of contents");
        input::page_lines(&pages, toc_pages)
    };
    let document = DocumentInput {
        toc,
        body: input::all_lines(&pages),
    };

    let engine = Engine {
        doc_title: doc_title.clone(),
        body_bare_headings: opts.bare_headings,
    };
    let run = engine.run(&document)?;

    fs::create_dir_all(opts.out_dir)
        .with_context(|| format!("failed to create {}", opts.out_dir.display()))?;
    let output = |suffix: &str| opts.out_dir.join(format!("{}_{suffix}", opts.prefix));

    let toc_path = output("toc.jsonl");
    let spec_path = output("spec.jsonl");
    jsonl::write_records_file(&toc_path, &run.toc)
        .with_context(|| format!("failed to write {}", toc_path.display()))?;
    jsonl::write_records_file(&spec_path, &run.body)
        .with_context(|| format!("failed to write {}", spec_path.display()))?;

    let metadata = RunMetadata::now(
        &doc_title,
        run.toc.len(),
        run.body.len(),
        &pages_path.to_string_lossy(),
    );
    write_json(&output("metadata.json"), &metadata)?;
    write_json(&output("report.json"), &run.report)?;

    println!(
        "{} toc sections, {} body sections, coverage {:.1}%",
        run.toc.len(),
        run.body.len(),
        run.report.coverage_percentage()
    );
    Ok(())
}

fn validate_file(path: &Path, provenance: Provenance) -> Result<FileValidation> {
    let schema = schema::check_file(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let hierarchy = match jsonl::read_records_file(path) {
        Ok(records) => Some(HierarchySummary::of(&SectionSequence::from_records(
            provenance, records,
        ))),
        Err(e) => {
            warn!("skipping hierarchy check for {}: {e}", path.display());
            None
        }
    };
    Ok(FileValidation {
        file: path.display().to_string(),
        schema,
        hierarchy,
    })
}

fn cmd_validate(toc_file: &Path, spec_file: &Path) -> Result<()> {
    let results = vec![
        validate_file(toc_file, Provenance::Toc)?,
        validate_file(spec_file, Provenance::Body)?,
    ];
    let json = serde_json::to_string_pretty(&results)?;
    println!("{json}");
    Ok(())
}

fn cmd_coverage(toc_file: &Path, spec_file: &Path) -> Result<()> {
    let toc = jsonl::read_records_file(toc_file)
        .with_context(|| format!("failed to load {}", toc_file.display()))?;
    let body = jsonl::read_records_file(spec_file)
        .with_context(|| format!("failed to load {}", spec_file.display()))?;
    let run = pipeline::reconcile_records(toc, body)?;
    let json = serde_json::to_string_pretty(&run.report)?;
    println!("{json}");
    Ok(())
}
