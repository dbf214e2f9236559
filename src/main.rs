//! `pkglens` — inspect npm manifests and lockfiles.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up logging.
//! 2. Load config ([`config::load_config`]).
//! 3. Read the file and load it into a [`session::Session`] ([`analyzer`]).
//! 4. Optionally enrich every row (`--fetch`) or single rows (`--refresh`) from
//!    the registry ([`registry`]).
//! 5. Render the table or tree view, or a JSON report ([`view`], [`report`]).

mod analyzer;
mod cli;
mod config;
mod detector;
mod error;
mod models;
mod outdated;
mod registry;
mod report;
mod session;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat, ViewMode};
use registry::npm::NpmRegistry;
use registry::PackageRegistry;
use session::{RowId, Session};
use view::{graph_root, summarize, table_rows, TableFilter};

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let mut config = config::load_config(&cwd, cli.config.as_deref())?;
    if let Some(url) = &cli.registry {
        config.registry.url = url.clone();
    }

    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let file_identifier = cli
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let mut session = Session::new(config.lockfile.max_depth);
    session.load(&text, &file_identifier)?;

    if cli.fetch || !cli.refresh.is_empty() {
        let registry = NpmRegistry::new(&config.registry.url, config.registry.timeout())?;
        if cli.fetch {
            enrich_all(&mut session, &registry, cli.quiet || cli.report == ReportFormat::Json).await;
        } else {
            refresh(&mut session, &registry, &cli.refresh).await;
        }
    }

    let filter = TableFilter::from(cli.filter);
    match cli.report {
        ReportFormat::Json => report::json::render(&session, filter)?,
        ReportFormat::Terminal => {
            report::terminal::render_header(&file_identifier, &summarize(&session), cli.quiet);
            if !cli.quiet {
                match cli.view {
                    ViewMode::Table => report::terminal::render(&table_rows(&session, filter), filter),
                    ViewMode::Tree => report::tree::render(graph_root(session.forest()).as_ref()),
                }
            }
        }
    }

    Ok(())
}

async fn enrich_all(session: &mut Session, registry: &dyn PackageRegistry, quiet: bool) {
    let pb = if !quiet {
        let pb = ProgressBar::new(session.packages().len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    session
        .enrich_all(registry, || {
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        })
        .await;

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }
}

async fn refresh(session: &mut Session, registry: &dyn PackageRegistry, names: &[String]) {
    let mut rows: Vec<RowId> = Vec::new();
    for name in names {
        let found = session.rows_named(name);
        if found.is_empty() {
            warn!(package = %name, "not listed in {}", session.source().unwrap_or("input"));
        }
        rows.extend(found);
    }
    rows.sort();
    rows.dedup();

    session.refresh_rows(registry, &rows).await;
}
