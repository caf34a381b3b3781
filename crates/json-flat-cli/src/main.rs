//! `json-flat-diff` — flatten two JSON documents and report their differences.
//!
//! `compare` flattens two files into canonical path→value maps, compares
//! them, and prints the summary table (or the serialized session with
//! `--json`). `demo` runs the same pipeline over a pair of built-in sample
//! documents. The process exits 0 on a GREEN run and 1 on RED.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use json_flat::{flatten_with, ArrayOrdering, FlatDocument, FlattenOptions};
use json_flat_compare::{compare, ComparisonSession, Status};
use json_flat_report::{render_summary, save_html, DEFAULT_TEMPLATE};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "json-flat-diff", version, about = "Structural diff of flattened JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare two JSON files.
    Compare {
        /// First JSON document.
        first: PathBuf,
        /// Second JSON document.
        second: PathBuf,
        /// Field name used to order arrays of objects.
        #[arg(long, default_value = json_flat::DEFAULT_PRIMARY_KEY)]
        primary_key: String,
        /// Array-ordering policy.
        #[arg(long, value_enum, default_value_t = OrderingArg::PrimaryKey)]
        array_ordering: OrderingArg,
        /// Print the serialized session instead of the text summary.
        #[arg(long)]
        json: bool,
        /// Write an HTML report to this path.
        #[arg(long)]
        html: Option<PathBuf>,
        /// HTML template to substitute into (defaults to the built-in one).
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Compare the built-in sample documents.
    Demo {
        /// Write an HTML report to this path.
        #[arg(long)]
        html: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderingArg {
    /// Sort keyed arrays by the primary key, falling back to first key names.
    PrimaryKey,
    /// Sort arrays of objects by first-key presence only.
    FirstKey,
}

impl From<OrderingArg> for ArrayOrdering {
    fn from(arg: OrderingArg) -> Self {
        match arg {
            OrderingArg::PrimaryKey => ArrayOrdering::PrimaryKey,
            OrderingArg::FirstKey => ArrayOrdering::FirstKey,
        }
    }
}

const DEMO_FIRST: &str = include_str!("../demo/first.json");
const DEMO_SECOND: &str = include_str!("../demo/second.json");

fn main() -> ExitCode {
    match run() {
        Ok(Status::Green) => ExitCode::SUCCESS,
        Ok(Status::Red) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<Status> {
    let cli = Cli::parse();
    match cli.command {
        Command::Compare {
            first,
            second,
            primary_key,
            array_ordering,
            json,
            html,
            template,
        } => {
            let options = FlattenOptions {
                primary_key,
                array_ordering: array_ordering.into(),
            };
            let first_doc = load(&first, &options)?;
            let second_doc = load(&second, &options)?;
            let session = compare(&first_doc, &second_doc);

            if json {
                println!("{}", serde_json::to_string_pretty(&session)?);
            } else {
                print!("{}", render_summary(&session));
            }
            if let Some(path) = html {
                write_html(&session, template.as_deref(), &path)?;
            }
            Ok(session.status())
        }
        Command::Demo { html } => {
            let options = FlattenOptions::default();
            let session = compare(
                &flatten_logged("first", DEMO_FIRST, &options),
                &flatten_logged("second", DEMO_SECOND, &options),
            );
            print!("{}", render_summary(&session));
            if let Some(path) = html {
                write_html(&session, None, &path)?;
            }
            Ok(session.status())
        }
    }
}

fn load(path: &Path, options: &FlattenOptions) -> Result<FlatDocument> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(flatten_logged(&path.display().to_string(), &text, options))
}

/// Flattens one payload, forwarding diagnostics to stderr.
fn flatten_logged(label: &str, text: &str, options: &FlattenOptions) -> FlatDocument {
    let outcome = flatten_with(text, options);
    for diagnostic in &outcome.diagnostics {
        eprintln!("{label}: {diagnostic}");
    }
    outcome.doc
}

fn write_html(
    session: &ComparisonSession,
    template: Option<&Path>,
    out: &Path,
) -> Result<()> {
    let template_text = match template {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    save_html(session, &template_text, out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("report saved as {}", out.display());
    Ok(())
}
