//! Command line interface for catalog tooling.
//!
//! Three maintenance tasks the translation workflow needs outside the
//! consuming application: resolving a single string, folding scanner output
//! into a maintained catalog, and reporting translation progress.

use std::io;
use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::loader::{
    self,
    LoaderError,
};
use crate::ts;

/// Top-level command line arguments.
#[derive(Debug, Parser)]
#[command(name = "ts-catalog", version, about = "Qt Linguist TS catalog tooling")]
pub struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve the translation for a (context, source) pair.
    Lookup {
        /// Catalog file to query.
        file: PathBuf,
        /// Context name, usually a class or screen name.
        context: String,
        /// Source text to resolve.
        source: String,
    },
    /// Merge catalog files and directory trees into one catalog.
    Merge {
        /// Input catalog files, or directories to scan for `*.ts` files.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output file; writes to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report catalog statistics.
    Stats {
        /// Catalog file to inspect.
        file: PathBuf,
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Failures surfaced to the command line user.
#[derive(Error, Debug)]
pub enum CliError {
    /// Loading or parsing a catalog failed.
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// The queried pair has no usable translation.
    #[error("no translation found for ('{context}', '{source_text}')")]
    NotFound {
        /// Context name as queried.
        context: String,
        /// Source text as queried. Not named `source` so thiserror does not
        /// take the field for an error cause.
        source_text: String,
    },

    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// Encoding the JSON report failed.
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    /// Propagates loader, lookup, and output failures to the caller, which
    /// maps them to a nonzero exit code.
    pub fn run(self) -> Result<(), CliError> {
        match self.command {
            Command::Lookup { file, context, source } => run_lookup(&file, context, source),
            Command::Merge { inputs, output } => run_merge(&inputs, output.as_deref()),
            Command::Stats { file, json } => run_stats(&file, json),
        }
    }
}

/// Resolve one string and print it.
fn run_lookup(file: &std::path::Path, context: String, source: String) -> Result<(), CliError> {
    let catalog = loader::load_catalog_file(file)?;
    match catalog.lookup(&context, &source) {
        Some(translation) => {
            println!("{translation}");
            Ok(())
        }
        None => Err(CliError::NotFound { context, source_text: source }),
    }
}

/// Merge all inputs in order and emit the combined catalog.
fn run_merge(inputs: &[PathBuf], output: Option<&std::path::Path>) -> Result<(), CliError> {
    let mut merged: Option<Catalog> = None;
    for input in inputs {
        let files = if input.is_dir() {
            loader::find_catalog_files(input, &[])?
        } else {
            vec![input.clone()]
        };
        for file in files {
            let catalog = loader::load_catalog_file(&file)?;
            merged = Some(match merged.take() {
                Some(accumulated) => accumulated.merge(catalog),
                None => catalog,
            });
        }
    }

    let markup = ts::serialize(&merged.unwrap_or_default());
    match output {
        Some(path) => std::fs::write(path, markup)?,
        None => print!("{markup}"),
    }
    Ok(())
}

/// Translation progress report for one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Number of contexts.
    pub contexts: usize,
    /// Total number of messages.
    pub messages: usize,
    /// Messages carrying a usable translation.
    pub translated: usize,
    /// Messages still waiting for a translation.
    pub untranslated: usize,
    /// Vanished or obsolete messages kept for reference.
    pub vanished: usize,
}

impl CatalogStats {
    /// Collect the report from a catalog.
    #[must_use]
    pub fn collect(catalog: &Catalog) -> Self {
        let mut stats = Self {
            contexts: catalog.contexts.len(),
            messages: catalog.message_count(),
            translated: 0,
            untranslated: 0,
            vanished: 0,
        };
        for message in catalog.contexts.iter().flat_map(|context| context.messages.iter()) {
            if !message.status.is_active() {
                stats.vanished += 1;
            } else if message.display_translation().is_some() {
                stats.translated += 1;
            } else {
                stats.untranslated += 1;
            }
        }
        stats
    }
}

/// Print the progress report.
fn run_stats(file: &std::path::Path, json: bool) -> Result<(), CliError> {
    let catalog = loader::load_catalog_file(file)?;
    let stats = CatalogStats::collect(&catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("contexts:     {}", stats.contexts);
        println!("messages:     {}", stats.messages);
        println!("translated:   {}", stats.translated);
        println!("untranslated: {}", stats.untranslated);
        println!("vanished:     {}", stats.vanished);
    }
    Ok(())
}
