use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use citedb_core::config::{Config, Settings};
use citedb_core::traits::{DocumentSource, Ranker};
use citedb_engine::{Answer, CorpusIndex, IndexCache, QaEngine, SessionLog, Snapshot};
use citedb_pages::InMemoryDocument;

#[derive(Parser)]
#[command(name = "citedb")]
#[command(about = "Answer questions with verbatim, page-cited entries from a curated table", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Corpus CSV (overrides corpus.path)
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Companion document (overrides document.path)
    #[arg(long, global = true)]
    document: Option<PathBuf>,

    /// Results per question (overrides retrieval.top_k)
    #[arg(short = 'k', long, global = true)]
    top_k: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask(AskArgs),

    /// Read questions from stdin until EOF, then optionally export the session
    Repl(ReplArgs),

    /// Write the PNG snapshot of the first page named by a citation
    Page(PageArgs),

    /// Show corpus and vector space statistics
    Stats,
}

#[derive(Args)]
struct AskArgs {
    question: String,

    /// Print the answer as JSON
    #[arg(long)]
    json: bool,

    /// Also write the cited page snapshot to this PNG file
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Write this answer as a one-row session CSV
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Args)]
struct ReplArgs {
    /// Write the session's answers as CSV on exit
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Args)]
struct PageArgs {
    page_ref: String,

    #[arg(short, long, default_value = "page.png")]
    out: PathBuf,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let mut settings = config.settings()?;
    if let Some(k) = cli.top_k { settings.retrieval.top_k = k.max(1); }
    let base = env::current_dir()?;
    let corpus_path = cli.corpus.clone().unwrap_or_else(|| settings.corpus_path(&base));
    let document_path = cli.document.clone().unwrap_or_else(|| settings.document_path(&base));

    let index = IndexCache::new()
        .load_file(&corpus_path)
        .with_context(|| format!("Cannot accept questions: corpus {} is unusable", corpus_path.display()))?;

    if let Commands::Stats = cli.command {
        return print_stats(&index, &corpus_path);
    }

    let document = open_document(&settings, &base, &document_path);
    let engine = QaEngine::new(index, document, settings.retrieval.top_k)?;

    match cli.command {
        Commands::Ask(args) => ask(&engine, args),
        Commands::Repl(args) => repl(&engine, args),
        Commands::Page(args) => page(&engine, args),
        Commands::Stats => Ok(()),
    }
}

#[cfg(feature = "pdfium")]
fn open_document(settings: &Settings, base: &Path, path: &Path) -> Box<dyn DocumentSource> {
    let library_dir = settings.pdfium_library_dir(base);
    match citedb_pages::pdfium::PdfiumDocument::new(path, library_dir.as_deref()) {
        Ok(document) => Box::new(document),
        Err(e) => {
            warn!(error = %e, "page snapshots disabled");
            Box::new(InMemoryDocument::unavailable(&path.display().to_string(), &e.to_string()))
        }
    }
}

#[cfg(not(feature = "pdfium"))]
fn open_document(_settings: &Settings, _base: &Path, path: &Path) -> Box<dyn DocumentSource> {
    warn!("built without the `pdfium` feature; page snapshots disabled");
    Box::new(InMemoryDocument::unavailable(
        &path.display().to_string(),
        "page rendering requires a build with the `pdfium` feature",
    ))
}

fn ask(engine: &QaEngine<CorpusIndex>, args: AskArgs) -> anyhow::Result<()> {
    let session = SessionLog::new();
    let answer = engine.ask(&args.question, &session)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        print!("{answer}");
    }
    if let Some(out) = &args.snapshot {
        report_snapshot(engine, &answer, out)?;
    }
    if let Some(out) = &args.export {
        export(&session, out)?;
    }
    Ok(())
}

fn repl(engine: &QaEngine<CorpusIndex>, args: ReplArgs) -> anyhow::Result<()> {
    let session = SessionLog::new();
    let stdin = io::stdin();
    print_prompt()?;
    for line in stdin.lock().lines() {
        let question = line?;
        if question.trim().is_empty() { print_prompt()?; continue; }
        match engine.ask(&question, &session) {
            Ok(answer) => println!("{answer}"),
            Err(e) => eprintln!("{e}"),
        }
        print_prompt()?;
    }
    println!();
    if let Some(out) = &args.export {
        if session.is_empty() {
            println!("No questions answered; nothing exported.");
        } else {
            export(&session, out)?;
        }
    }
    Ok(())
}

fn print_prompt() -> io::Result<()> {
    print!("? ");
    io::stdout().flush()
}

fn page(engine: &QaEngine<CorpusIndex>, args: PageArgs) -> anyhow::Result<()> {
    match engine.get_page_snapshot(&args.page_ref) {
        Snapshot::Image { page, png } => {
            fs::write(&args.out, png.as_slice()).with_context(|| format!("writing {}", args.out.display()))?;
            println!("Page {} written to {}", page, args.out.display());
        }
        Snapshot::Unavailable(reason) => println!("{reason}"),
    }
    Ok(())
}

fn report_snapshot(engine: &QaEngine<CorpusIndex>, answer: &Answer, out: &Path) -> anyhow::Result<()> {
    match engine.get_page_snapshot(&answer.top.entry.page_ref) {
        Snapshot::Image { page, png } => {
            fs::write(out, png.as_slice()).with_context(|| format!("writing {}", out.display()))?;
            eprintln!("Page snapshot (p.{}) written to {}", page, out.display());
        }
        Snapshot::Unavailable(reason) => eprintln!("Snapshot unavailable: {reason}"),
    }
    Ok(())
}

fn export(session: &SessionLog, out: &Path) -> anyhow::Result<()> {
    let file = fs::File::create(out).with_context(|| format!("creating {}", out.display()))?;
    session.export_csv(file)?;
    eprintln!("Exported {} answers to {}", session.len(), out.display());
    Ok(())
}

fn print_stats(index: &CorpusIndex, path: &Path) -> anyhow::Result<()> {
    println!("Corpus:       {}", path.display());
    println!("Fingerprint:  {}", index.fingerprint());
    println!("Entries:      {}", index.entries().len());
    println!("Skipped rows: {}", index.skipped_rows());
    println!("Dropped:      {}", index.dropped_entries());
    println!("Dimensions:   {}", index.space().dimensions());
    Ok(())
}
