mod report;
mod session;
mod viewer;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fenceline_config::Config;
use fenceline_engine::{
    DispatchRequest, Document, Insertion, Region, code_block, decorate, dispatch, div,
    div_weight_at, plan_at, plan_region, style_block,
};

use crate::session::ProcessSessions;

#[derive(Parser)]
#[command(
    name = "fenceline",
    version,
    about = "Structural scanner and code sender for markdown notebooks"
)]
struct Cli {
    /// Config file (default: ~/.config/fenceline/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the structure of a document
    Scan {
        /// Markdown file to scan
        file: PathBuf,
    },

    /// Browse a document with structural highlighting
    View {
        /// Markdown file to view
        file: PathBuf,
    },

    /// Send interactive code blocks to language sessions
    Send(SendArgs),

    /// Print a template for a new block
    Insert(InsertArgs),
}

#[derive(clap::Args)]
struct SendArgs {
    /// Markdown file containing the code blocks
    file: PathBuf,

    #[command(flatten)]
    target: Target,

    /// Print what would be sent without starting any session
    #[arg(long)]
    dry_run: bool,
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct Target {
    /// The block containing this byte offset
    #[arg(long, value_name = "OFFSET")]
    at: Option<usize>,

    /// Every block ending before this byte offset
    #[arg(long, value_name = "OFFSET")]
    above: Option<usize>,

    /// Every block starting after this byte offset
    #[arg(long, value_name = "OFFSET")]
    below: Option<usize>,

    /// Every block in the document
    #[arg(long)]
    all: bool,
}

#[derive(clap::Args)]
struct InsertArgs {
    #[command(subcommand)]
    kind: InsertKind,

    /// Insert into this file's text and print the result
    #[arg(long, global = true, requires = "at")]
    file: Option<PathBuf>,

    /// Byte offset to insert at (with --file)
    #[arg(long, global = true, requires = "file")]
    at: Option<usize>,
}

#[derive(Subcommand)]
enum InsertKind {
    /// An interactive code block
    Code { language: String },

    /// A <style> block
    Style,

    /// A container div
    Div {
        /// Space separated class names
        classes: String,

        /// Marker weight (default: one more than the enclosing container)
        #[arg(long)]
        weight: Option<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;
    log::debug!("loaded config: {config:?}");

    match cli.command {
        Command::Scan { file } => {
            let mut doc = open(&file, &config)?;
            let (text, scan) = doc.scanned();
            for line in report::structure_report(text, scan) {
                println!("{line}");
            }
        }
        Command::View { file } => {
            let mut doc = open(&file, &config)?;
            let (text, scan) = doc.scanned();
            let annotations = decorate(scan);
            viewer::run(file.display().to_string(), text, &annotations)?;
        }
        Command::Send(args) => send(args, &config)?,
        Command::Insert(args) => insert(args, &config)?,
    }

    Ok(())
}

fn open(path: &Path, config: &Config) -> Result<Document> {
    let bytes =
        std::fs::read(path).with_context(|| format!("cannot read '{}'", path.display()))?;
    let mut doc = Document::from_bytes(&bytes)
        .with_context(|| format!("'{}' is not valid UTF-8", path.display()))?;
    doc.set_options(config.scan);
    Ok(doc)
}

fn send(args: SendArgs, config: &Config) -> Result<()> {
    let mut doc = open(&args.file, config)?;
    let (text, scan) = doc.scanned();
    let langs = &config.languages;

    let requests: Vec<DispatchRequest> = match args.target {
        Target { at: Some(at), .. } => plan_at(text, scan, at, langs)?.into_iter().collect(),
        Target {
            above: Some(above), ..
        } => plan_region(text, scan, Region::Before(above), langs)?,
        Target {
            below: Some(below), ..
        } => plan_region(text, scan, Region::After(below), langs)?,
        Target { all: true, .. } => plan_region(text, scan, Region::All, langs)?,
        Target { .. } => bail!("one of --at, --above, --below or --all is required"),
    };

    if requests.is_empty() {
        log::warn!("no interactive code blocks selected");
        return Ok(());
    }

    if args.dry_run {
        for r in &requests {
            println!("# {} ({} block(s)) -> {}", r.language, r.blocks, r.command);
            println!("{}", r.text);
        }
        return Ok(());
    }

    let mut sessions = ProcessSessions::new();
    let sent = dispatch(&mut sessions, requests)?;
    sessions.finish()?;
    log::info!("sent {sent} request(s)");
    Ok(())
}

fn insert(args: InsertArgs, config: &Config) -> Result<()> {
    let mut target = match (&args.file, args.at) {
        (Some(file), Some(at)) => Some((open(file, config)?, at)),
        _ => None,
    };

    let insertion: Insertion = match &args.kind {
        InsertKind::Code { language } => code_block(language),
        InsertKind::Style => style_block(),
        InsertKind::Div { classes, weight } => {
            let weight = match (weight, target.as_mut()) {
                (Some(w), _) => *w,
                (None, Some((doc, at))) => div_weight_at(doc.scan(), *at),
                // raised to the minimum marker weight
                (None, None) => 0,
            };
            div(classes, weight)
        }
    };

    match target {
        Some((mut doc, at)) => {
            let applied = doc.insert(at, &insertion.text);
            log::info!(
                "inserted at {}, caret at {}",
                applied.changed.start,
                applied.changed.start + insertion.cursor
            );
            print!("{}", doc.text());
        }
        None => print!("{}", insertion.text),
    }
    Ok(())
}
