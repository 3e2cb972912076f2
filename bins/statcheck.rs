//! Statistical claim checker CLI
//!
//! Usage:
//!   statcheck check --claim "This drug reduces risk by 95%"
//!   statcheck check --claim "Scores improved" --sample-size 40 --mean1 10 --sd1 2 --mean2 10.1 --sd2 2
//!   statcheck batch --input claims.jsonl --output reports/reports.jsonl
//!   statcheck rules --config config/statcheck.toml

use anyhow::Result;
use clap::{Parser, Subcommand};

use statcheck::analysis::{
    ingest::{load_claims_jsonl, ClaimRecord},
    outputs::{render_report, write_reports_jsonl, ReportStats},
    Analyzer, Condition,
};
use statcheck::config::Config;

#[derive(Parser)]
#[command(name = "statcheck")]
#[command(about = "Spot statistical fallacies in a claim and test group differences")]
struct Cli {
    /// Path to a TOML config; built-in defaults when omitted
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single claim
    Check {
        #[arg(long)]
        claim: String,
        #[arg(long, default_value_t = 0)]
        sample_size: u64,
        #[arg(long, default_value_t = 0.0)]
        mean1: f64,
        #[arg(long, default_value_t = 0.0)]
        sd1: f64,
        #[arg(long, default_value_t = 0.0)]
        mean2: f64,
        #[arg(long, default_value_t = 0.0)]
        sd2: f64,
        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Analyze every claim in a JSONL file
    Batch {
        #[arg(long)]
        input: String,
        #[arg(long, default_value = "reports.jsonl")]
        output: String,
    },
    /// Show the active rule table in evaluation order
    Rules,
}

fn run_check_command(analyzer: &Analyzer, record: ClaimRecord, json: bool) -> Result<()> {
    record.validate()?;

    let report = analyzer.analyze_record(&record);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report.claim, &report.result));
    }

    Ok(())
}

fn run_batch_command(analyzer: &Analyzer, input: &str, output: &str) -> Result<()> {
    tracing::info!("Analyzing claims from {}", input);

    let records = load_claims_jsonl(input)?;
    let reports = analyzer.analyze_batch(&records);
    write_reports_jsonl(output, &reports)?;

    let stats = ReportStats::from_reports(&reports);

    println!("\n=== Batch Summary ===");
    println!("Claims read: {}", records.len());
    println!("Claims analyzed: {}", stats.total);
    println!("Lie level Low: {}", stats.low);
    println!("Lie level Medium: {}", stats.medium);
    println!("Lie level High: {}", stats.high);
    println!("Findings: {}", stats.total_findings);
    println!("Significance tests run: {} ({} not significant)", stats.tested, stats.not_significant);
    for (kind, count) in &stats.by_kind {
        println!("  {}: {}", kind, count);
    }

    Ok(())
}

fn describe_condition(condition: &Condition) -> String {
    match condition {
        Condition::SmallSample { threshold } => format!("0 < n < {}", threshold),
        Condition::NoSampleSize => "n == 0".to_string(),
        Condition::AnyOf(words) => format!("any of {{{}}}", words.join(", ")),
        Condition::NoneOf(words) => format!("none of {{{}}}", words.join(", ")),
    }
}

fn run_rules_command(analyzer: &Analyzer) {
    let rules = analyzer.rules();
    println!(
        "Keyword matching: {}",
        if rules.match_inflections { "inflections" } else { "exact" }
    );

    for (i, rule) in rules.rules.iter().enumerate() {
        let trigger: Vec<String> = rule.conditions.iter().map(describe_condition).collect();
        println!(
            "{:>2}. {:<45} {:<6} {}",
            i + 1,
            rule.kind.title(),
            rule.severity.as_str(),
            trigger.join(" AND ")
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;
    let analyzer = Analyzer::new(&config);

    match cli.command {
        Commands::Check { claim, sample_size, mean1, sd1, mean2, sd2, json } => {
            let record = ClaimRecord::new(&claim)
                .with_sample_size(sample_size)
                .with_groups(mean1, sd1, mean2, sd2);
            run_check_command(&analyzer, record, json)?;
        }
        Commands::Batch { input, output } => {
            run_batch_command(&analyzer, &input, &output)?;
        }
        Commands::Rules => {
            run_rules_command(&analyzer);
        }
    }

    Ok(())
}
