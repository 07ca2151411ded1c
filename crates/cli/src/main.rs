//! paracontour CLI: paragraph prosody reshaping for timed TTS documents.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use paracontour_core::boundary::assign_boundary_durations;
use paracontour_core::interchange::{document_to_json, read_document, write_document};
use paracontour_core::{Document, ParagraphCounter, ParagraphProsody, ProsodyConfig};

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "paracontour",
    about = "Paragraph-position rate and pitch-range reshaping for TTS documents",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rescale durations and reshape F0 targets
    Process(ProcessArgs),
    /// Fill in missing boundary pause durations
    Boundaries(BoundaryArgs),
}

// ─── Shared arguments ────────────────────────────────────────────

#[derive(Parser, Debug)]
struct SharedArgs {
    /// Input document (JSON)
    input: PathBuf,

    /// Output document; prints to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    #[command(flatten)]
    shared: SharedArgs,

    /// Prosody config (JSON); built-in tables when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Paragraph position to resume the damping cycle from
    #[arg(long, default_value_t = 1)]
    paragraph_position: u32,

    /// Assign missing boundary durations before processing
    #[arg(long, default_value_t = false)]
    assign_boundaries: bool,
}

#[derive(Parser, Debug)]
struct BoundaryArgs {
    #[command(flatten)]
    shared: SharedArgs,
}

// ─── Main ────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let log_level = match &cli.command {
        Command::Process(a) if a.shared.verbose => "debug",
        Command::Boundaries(a) if a.shared.verbose => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Process(args) => run_process(args),
        Command::Boundaries(args) => run_boundaries(args),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

// ─── Runners ─────────────────────────────────────────────────────

fn run_process(args: ProcessArgs) -> Result<()> {
    if args.paragraph_position == 0 {
        bail!("--paragraph-position starts at 1");
    }

    let config = match &args.config {
        Some(path) => ProsodyConfig::from_json_file(path)?,
        None => ProsodyConfig::default(),
    };
    let prosody = ParagraphProsody::new(config).context("Invalid prosody config")?;

    let mut doc = load(&args.shared.input)?;
    if args.assign_boundaries {
        let n = assign_boundary_durations(&mut doc);
        log::info!("Assigned {} boundary durations", n);
    }

    let mut counter = ParagraphCounter::at(args.paragraph_position);
    let summary = prosody
        .process(&mut doc, &mut counter)
        .with_context(|| format!("Failed to process {}", args.shared.input.display()))?;

    log::info!(
        "{} phrases reshaped, {} F0 targets rewritten",
        summary.phrases_processed,
        summary.targets_rewritten
    );
    log::info!("Next paragraph position: {}", counter.position());

    save(&doc, args.shared.output.as_deref())
}

fn run_boundaries(args: BoundaryArgs) -> Result<()> {
    let mut doc = load(&args.shared.input)?;
    let n = assign_boundary_durations(&mut doc);
    log::info!("Assigned {} boundary durations", n);
    save(&doc, args.shared.output.as_deref())
}

// ─── Helpers ─────────────────────────────────────────────────────

fn load(path: &Path) -> Result<Document> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    read_document(path)
}

fn save(doc: &Document, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_document(path, doc)?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", document_to_json(doc)?),
    }
    Ok(())
}
