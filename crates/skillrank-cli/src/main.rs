//! skillrank CLI
//!
//! Command-line interface for scoring ranked skill lists against an ideal
//! importance ordering.
//!
//! ## Usage
//!
//! ```bash
//! # Score one extractor output against the reference ideal ranking
//! skillrank score "Python; Go (Golang); Docker"
//!
//! # Custom ideal ranking and lexicon, JSON output
//! skillrank score --ideal-file ideal.json --lexicon skills.json --format json < ranked.txt
//!
//! # Score one ranking per line
//! skillrank batch --input runs.txt > analyses.jsonl
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use skillrank::{IdcgPolicy, IdealRanking, Lexicon, RankingAnalysis, RankingEvaluator};
use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Reference ideal ranking for backend engineering roles, most important first
const DEFAULT_IDEAL_RANKING: &[&str] = &[
    "Python",
    "Golang",
    "REST API",
    "Microservices Architecture",
    "Distributed Systems",
    "Databases (MySQL, Postgres, MongoDB)",
    "SQL",
    "NoSQL",
    "AWS",
    "Docker",
    "Kubernetes (K8s)",
    "CI/CD",
    "Kafka",
    "Terraform",
    "Technical Lead",
];

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary (default)
    #[default]
    Text,
    /// Pretty-printed JSON analysis
    Json,
}

/// IDCG normalization selection
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum IdcgArg {
    /// Sum of ideal gains (comparable with historical scores)
    #[default]
    GainSum,
    /// DCG of the ideal ranking itself (identity scores 1.0)
    IdealDcg,
}

impl From<IdcgArg> for IdcgPolicy {
    fn from(arg: IdcgArg) -> Self {
        match arg {
            IdcgArg::GainSum => IdcgPolicy::GainSum,
            IdcgArg::IdealDcg => IdcgPolicy::IdealDcg,
        }
    }
}

#[derive(Parser)]
#[command(name = "skillrank")]
#[command(version)]
#[command(about = "Score ranked skill lists against an ideal ranking with nDCG", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that builds an evaluator
#[derive(Args)]
struct EvaluatorArgs {
    /// Ideal ranking as semicolon-delimited text
    #[arg(long, conflicts_with = "ideal_file")]
    ideal: Option<String>,

    /// File holding the ideal ranking (JSON string array or semicolon-delimited text)
    #[arg(long)]
    ideal_file: Option<PathBuf>,

    /// Lexicon JSON asset (defaults to the built-in lexicon)
    #[arg(short, long)]
    lexicon: Option<PathBuf>,

    /// IDCG normalization
    #[arg(long, value_enum, default_value = "gain-sum")]
    idcg: IdcgArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one semicolon-delimited ranking
    Score {
        /// Ranked skills; read from stdin when omitted
        ranked: Option<String>,

        #[command(flatten)]
        evaluator: EvaluatorArgs,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Score one ranking per line, writing JSON lines
    Batch {
        /// Input file with one semicolon-delimited ranking per line
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        evaluator: EvaluatorArgs,
    },

    /// Print the canonical form of each label
    Normalize {
        /// Raw labels
        #[arg(required = true)]
        labels: Vec<String>,

        /// Lexicon JSON asset (defaults to the built-in lexicon)
        #[arg(short, long)]
        lexicon: Option<PathBuf>,
    },

    /// Print the active lexicon as JSON
    Lexicon {
        /// Lexicon JSON asset (defaults to the built-in lexicon)
        #[arg(short, long)]
        lexicon: Option<PathBuf>,
    },

    /// Show tool info
    Info,
}

/// One line of batch output
#[derive(Serialize)]
struct BatchRecord<'a> {
    row_index: usize,
    ndcg_score: f64,
    analysis: &'a RankingAnalysis,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Score {
            ranked,
            evaluator,
            format,
        } => run_score(ranked, &evaluator, format)?,
        Commands::Batch { input, evaluator } => run_batch(&input, &evaluator)?,
        Commands::Normalize { labels, lexicon } => run_normalize(&labels, lexicon.as_deref())?,
        Commands::Lexicon { lexicon } => run_lexicon(lexicon.as_deref())?,
        Commands::Info => run_info(),
    }

    Ok(())
}

fn run_info() {
    let lexicon = Lexicon::builtin();
    println!("skillrank");
    println!("=========");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Components:");
    println!(
        "  - Lexicon: built-in v{} ({} aliases, {} canonical skills)",
        lexicon.version().unwrap_or("-"),
        lexicon.len(),
        lexicon.canonical_labels().len()
    );
    println!("  - Scoring: double-discounted nDCG");
    println!("  - IDCG policies: gain-sum (default), ideal-dcg");
    println!();
    println!("Default ideal ranking:");
    for (i, skill) in DEFAULT_IDEAL_RANKING.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, skill);
    }
}

fn load_lexicon(path: Option<&Path>) -> Result<Lexicon> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read lexicon: {}", path.display()))?;
            let lexicon = Lexicon::from_json(&json)
                .with_context(|| format!("Invalid lexicon: {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                aliases = lexicon.len(),
                "loaded lexicon"
            );
            Ok(lexicon)
        }
        None => Ok(Lexicon::builtin()),
    }
}

fn load_ideal(args: &EvaluatorArgs) -> Result<IdealRanking> {
    if let Some(text) = &args.ideal {
        return Ok(IdealRanking::parse(text)?);
    }

    if let Some(path) = &args.ideal_file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ideal ranking: {}", path.display()))?;
        let ideal = IdealRanking::parse(&content)
            .with_context(|| format!("Invalid ideal ranking: {}", path.display()))?;
        return Ok(ideal);
    }

    Ok(IdealRanking::new(DEFAULT_IDEAL_RANKING))
}

fn build_evaluator(args: &EvaluatorArgs) -> Result<RankingEvaluator> {
    let ideal = load_ideal(args)?;
    if ideal.is_empty() {
        tracing::warn!("ideal ranking is empty; every score will be 0.0");
    }

    let evaluator = RankingEvaluator::builder()
        .ideal(ideal)
        .lexicon(load_lexicon(args.lexicon.as_deref())?)
        .idcg_policy(args.idcg.into())
        .build()?;

    Ok(evaluator)
}

fn run_score(ranked: Option<String>, args: &EvaluatorArgs, format: OutputFormat) -> Result<()> {
    let ranked = match ranked {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read ranking from stdin")?;
            buf
        }
    };

    let evaluator = build_evaluator(args)?;
    let analysis = evaluator.analyze_text(&ranked);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Text => print_analysis(&evaluator, &analysis),
    }

    Ok(())
}

fn print_analysis(evaluator: &RankingEvaluator, analysis: &RankingAnalysis) {
    println!("nDCG: {:.4}", analysis.ndcg_score);
    println!("Skills: {}", analysis.total_skills);
    println!(
        "Coverage: {:.2}% (distinct {:.2}%)",
        analysis.coverage_percentage, analysis.distinct_coverage_percentage
    );
    println!(
        "IDCG: {:.4} ({})",
        evaluator.calculate_idcg(),
        evaluator.idcg_policy().name()
    );
    println!();

    println!("Perfect matches ({}):", analysis.match_count);
    for m in &analysis.matches {
        println!("  {:>2}. {}", m.position + 1, m.skill);
    }

    println!("Mismatches ({}):", analysis.mismatch_count);
    for m in &analysis.mismatches {
        match m.ideal_position {
            Some(ideal) => println!(
                "  {:>2}. {} [{}, ideal {}]",
                m.position + 1,
                m.skill,
                m.status,
                ideal + 1
            ),
            None => println!("  {:>2}. {} [{}]", m.position + 1, m.skill, m.status),
        }
    }
}

fn run_batch(input: &Path, args: &EvaluatorArgs) -> Result<()> {
    let file = fs::File::open(input)
        .with_context(|| format!("Failed to open input: {}", input.display()))?;
    let evaluator = build_evaluator(args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut rows = 0usize;

    for (row_index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", row_index + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let analysis = evaluator.analyze_text(&line);
        let record = BatchRecord {
            row_index,
            ndcg_score: analysis.ndcg_score,
            analysis: &analysis,
        };
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
        rows += 1;

        if rows % 50 == 0 {
            tracing::info!(rows, "processed rows");
        }
    }

    tracing::debug!(rows, "batch complete");
    Ok(())
}

fn run_normalize(labels: &[String], lexicon: Option<&Path>) -> Result<()> {
    let lexicon = load_lexicon(lexicon)?;
    for label in labels {
        println!("{} -> {}", label, lexicon.normalize(label));
    }
    Ok(())
}

fn run_lexicon(lexicon: Option<&Path>) -> Result<()> {
    let lexicon = load_lexicon(lexicon)?;
    println!("{}", lexicon.to_json()?);
    Ok(())
}
