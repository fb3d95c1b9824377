//! profq - Profile data quality CLI
//!
//! Thin caller around the engine: reads candidate records from JSON files,
//! scores or reconciles them, and prints the result.
//!
//! Exit status: 0 when the final record is good enough to persist, 2 when
//! there is no data or quality is insufficient, 1 on I/O or parse errors.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use profq_common::config::load_config;
use profq_common::logging::init_tracing;
use profq_engine::{CandidateRecord, CanonicalRecord, QualityEngine, QualityReport};

/// Command-line arguments for profq
#[derive(Parser, Debug)]
#[command(name = "profq")]
#[command(about = "Score and reconcile profile records from multiple extraction methods")]
#[command(version)]
struct Args {
    /// Config file (thresholds, taxonomy, logging)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of the text report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a single candidate record
    Score {
        file: PathBuf,
        #[arg(short, long, default_value = "unknown")]
        label: String,
    },
    /// Reconcile a primary and a fallback candidate
    Combine {
        primary: PathBuf,
        fallback: PathBuf,
        #[arg(long, default_value = "primary")]
        primary_label: String,
        #[arg(long, default_value = "fallback")]
        fallback_label: String,
    },
    /// Pick the best of several candidates, given as LABEL=FILE in preference order
    Select {
        #[arg(required = true)]
        candidates: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    let engine = QualityEngine::new(config.engine_config());

    match args.command {
        Command::Score { file, label } => {
            let record = read_record(&file)?;
            let assessment = engine.score(&record, &label);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("{}", QualityReport(&assessment));
            }

            Ok(exit_for(assessment.tier.is_persistable()))
        }
        Command::Combine {
            primary,
            fallback,
            primary_label,
            fallback_label,
        } => {
            let primary = read_record(&primary)?;
            let fallback = read_record(&fallback)?;
            let canonical =
                engine.combine(Some(&primary), Some(&fallback), &primary_label, &fallback_label);
            emit(canonical.as_ref(), args.json)
        }
        Command::Select { candidates } => {
            let mut loaded = Vec::with_capacity(candidates.len());
            for spec in &candidates {
                let (label, path) = spec
                    .split_once('=')
                    .ok_or_else(|| anyhow!("Expected LABEL=FILE, got '{}'", spec))?;
                loaded.push((label.to_string(), read_record(Path::new(path))?));
            }

            let canonical =
                engine.select_best(loaded.iter().map(|(label, record)| (label.as_str(), record)));
            emit(canonical.as_ref(), args.json)
        }
    }
}

fn read_record(path: &Path) -> Result<CandidateRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    // A literal `null` document is an empty candidate
    let record: Option<CandidateRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse candidate record {}", path.display()))?;
    Ok(record.unwrap_or_default())
}

fn emit(canonical: Option<&CanonicalRecord>, json: bool) -> Result<ExitCode> {
    let Some(canonical) = canonical else {
        eprintln!("No valid data from any method");
        return Ok(ExitCode::from(2));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(canonical)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&canonical.fields)?);
        println!("{}", QualityReport(&canonical.data_quality));
    }

    if canonical.is_persistable() {
        info!(
            method = %canonical.extraction_method,
            tier = %canonical.tier(),
            "Record is good enough to persist"
        );
    } else {
        info!(tier = %canonical.tier(), "Insufficient quality, not persisting");
    }

    Ok(exit_for(canonical.is_persistable()))
}

fn exit_for(persistable: bool) -> ExitCode {
    if persistable {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
