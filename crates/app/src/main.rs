use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use txident_core::Record;
use txident_engine::{engine, DuplicateMatcher, IdGenerator, MatchResult};

mod config;
use config::EngineConfig;

const USAGE: &str = "\
usage: txident [options] <incoming.json> [reference.json]

Assigns identity tokens to the incoming batch and flags probable
re-imports against the reference ledger. Results go to stdout as JSON.

options:
  --config <path>   engine config (TOML)
  --strict          reject records with invalid fields
  -h, --help        show this help";

/// Per-record outcome reported to stdout.
#[derive(Debug, Serialize)]
struct RecordVerdict {
    date: NaiveDate,
    payee: String,
    account: String,
    token: String,
    duplicate: Option<MatchResult>,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    records: usize,
    duplicates_flagged: usize,
    tokens_issued: usize,
    collided_bases: usize,
    fallback_tokens: usize,
}

#[derive(Debug, Serialize)]
struct SessionReport {
    results: Vec<RecordVerdict>,
    summary: SessionSummary,
}

struct Args {
    config_path: Option<PathBuf>,
    strict: bool,
    incoming: PathBuf,
    reference: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut config_path = None;
    let mut strict = false;
    let mut files = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--strict" => strict = true,
            "-h" | "--help" => return Ok(None),
            other if other.starts_with('-') => bail!("unknown option: {other}"),
            _ => files.push(PathBuf::from(arg)),
        }
    }

    let mut files = files.into_iter();
    let incoming = files.next().context("missing <incoming.json> argument")?;
    let reference = files.next();
    if files.next().is_some() {
        bail!("too many file arguments");
    }

    Ok(Some(Args {
        config_path,
        strict,
        incoming,
        reference,
    }))
}

fn load_records(path: &Path) -> Result<Vec<Record>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<Record> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(records)
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.strict {
        config.strict = true;
    }

    let batch = load_records(&args.incoming)?;
    let reference_set = match &args.reference {
        Some(path) => load_records(path)?,
        None => Vec::new(),
    };
    tracing::info!(
        incoming = batch.len(),
        reference = reference_set.len(),
        strict = config.strict,
        "session started"
    );

    let mut generator = IdGenerator::new();
    let matcher = DuplicateMatcher::new(config.similarity_threshold);

    let mut results = Vec::with_capacity(batch.len());
    let mut duplicates_flagged = 0usize;

    for record in &batch {
        let token = if config.strict {
            engine::identify_strict(&mut generator, record, false)
        } else {
            engine::identify(&mut generator, record, false)
        }
        .with_context(|| format!("record {} \"{}\"", record.date, record.payee))?;

        let duplicate = matcher.find_match(record, &reference_set);
        if let Some(m) = &duplicate {
            duplicates_flagged += 1;
            tracing::warn!(
                date = %record.date,
                payee = %record.payee,
                similarity = m.similarity,
                "probable re-import"
            );
        }

        let account = txident_engine::select(record)
            .map(|s| s.account)
            .unwrap_or_default();
        results.push(RecordVerdict {
            date: record.date,
            payee: record.payee.clone(),
            account,
            token,
            duplicate,
        });
    }

    let stats = generator.stats();
    let report = SessionReport {
        results,
        summary: SessionSummary {
            records: batch.len(),
            duplicates_flagged,
            tokens_issued: stats.tokens_issued,
            collided_bases: stats.collided_bases,
            fallback_tokens: stats.fallback_tokens,
        },
    };
    tracing::info!(
        records = report.summary.records,
        duplicates = report.summary.duplicates_flagged,
        fallbacks = report.summary.fallback_tokens,
        "session finished"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match parse_args()? {
        Some(args) => run(args),
        None => {
            println!("{USAGE}");
            Ok(())
        }
    }
}
