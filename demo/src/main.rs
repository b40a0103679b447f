//! SIMRS Regu-AI: command-line reports
//!
//! Prints the BLU accounting reports computed from the mock store and runs the
//! AI advisory calls from the terminal.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- aging
//!   cargo run -p demo -- position
//!   cargo run -p demo -- allowance --amount 150000000 --age 7
//!   cargo run -p demo -- summarize-note --note-id N-551
//!   cargo run -p demo -- analyze-finance
//!
//! The Gemini credential is read from `API_KEY` (or `GEMINI_API_KEY`), also
//! from a `.env` file. Without it the AI commands print a fixed placeholder.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use simrs_advisory::{Advisor, AdvisoryConfig, GeminiClient};
use simrs_contracts::{
    advisory::Advisory,
    error::SimrsResult,
    receivable::{Receivable, ReceivableStatus},
};
use simrs_core::aging::{age_from_f64, allowance_line};
use simrs_ref_hospital::{
    format::format_idr,
    panels::{clinical, finance::FinancePanel},
    MockStore,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// SIMRS Regu-AI: BLU finance and clinical support reports.
#[derive(Parser)]
#[command(
    name = "simrs-demo",
    about = "SIMRS Regu-AI dashboard reports",
    long_about = "Prints BLU receivables aging, allowance, and financial position reports\n\
                  from the mock hospital store, and runs the Gemini-backed advisory calls."
)]
struct Cli {
    /// Optional TOML configuration file with an [advisory] table.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the Gemini model identifier.
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every report and run both advisory calls.
    RunAll,
    /// Receivables aging and allowance table.
    Aging,
    /// Statement of financial position.
    Position,
    /// What-if allowance for a single receivable.
    Allowance {
        /// Gross amount in Rupiah.
        #[arg(long)]
        amount: Decimal,
        /// Age in whole months.
        #[arg(long, allow_negative_numbers = true)]
        age: f64,
    },
    /// Generate an After Visit Summary for a clinical note.
    SummarizeNote {
        /// Seeded note to summarize.
        #[arg(long, default_value = "N-551", conflicts_with = "text")]
        note_id: String,
        /// Free text to summarize instead of a seeded note.
        #[arg(long)]
        text: Option<String>,
    },
    /// AI executive summary of the financial position.
    AnalyzeFinance,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    match run(cli).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> SimrsResult<()> {
    let store = MockStore::seeded();

    match cli.command {
        Command::RunAll => {
            let advisor = build_advisor(cli.config, cli.model)?;
            print_aging(&store)?;
            print_position(&store)?;
            analyze_finance(&store, &advisor).await?;
            summarize_note(&store, &advisor, "N-551", None).await
        }
        Command::Aging => print_aging(&store),
        Command::Position => print_position(&store),
        Command::Allowance { amount, age } => print_what_if(amount, age),
        Command::SummarizeNote { note_id, text } => {
            let advisor = build_advisor(cli.config, cli.model)?;
            summarize_note(&store, &advisor, &note_id, text).await
        }
        Command::AnalyzeFinance => {
            let advisor = build_advisor(cli.config, cli.model)?;
            analyze_finance(&store, &advisor).await
        }
    }
}

fn build_advisor(
    config_path: Option<PathBuf>,
    model: Option<String>,
) -> SimrsResult<Advisor<GeminiClient>> {
    let config = match config_path {
        Some(path) => AdvisoryConfig::from_file(&path)?,
        None => AdvisoryConfig::from_env(),
    };
    let config = match model {
        Some(model) => config.with_model(model),
        None => config,
    };
    let advisor = Advisor::new(GeminiClient::new(config));
    debug!(
        model = %advisor.service().config().settings.model,
        configured = advisor.is_configured(),
        "advisory client configured"
    );
    Ok(advisor)
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn print_aging(store: &MockStore) -> SimrsResult<()> {
    let panel = FinancePanel::from_store(store)?;
    println!("{}", panel.render_aging_table());
    Ok(())
}

fn print_position(store: &MockStore) -> SimrsResult<()> {
    let panel = FinancePanel::from_store(store)?;
    println!("{}", panel.render_text());
    println!("Rincian Posisi Keuangan");
    println!("{}", panel.render_position());
    Ok(())
}

fn print_what_if(amount: Decimal, age: f64) -> SimrsResult<()> {
    let age_months = age_from_f64(age)?;
    let receivable = Receivable::new(
        "WHAT-IF",
        "What-if receivable",
        amount,
        age_months,
        ReceivableStatus::Current,
    );
    let line = allowance_line(&receivable)?;

    println!("  Amount:        {}", format_idr(amount));
    println!("  Age:           {} month(s)", age_months);
    println!("  Allowance:     {} ({})", format_idr(line.allowance), line.tier.percent_label());
    println!("  Net value:     {}", format_idr(line.net()));
    println!();
    Ok(())
}

async fn summarize_note(
    store: &MockStore,
    advisor: &Advisor<GeminiClient>,
    note_id: &str,
    text: Option<String>,
) -> SimrsResult<()> {
    let (note_text, source) = match text {
        Some(text) => (text, None),
        None => {
            let note = store.note(note_id)?;
            let patient = store.patient(&note.patient_id.0)?;
            (note.text.clone(), Some(patient.name.as_str()))
        }
    };

    match source {
        Some(name) => println!("{} (Source: {})", clinical::EDITOR_TITLE, name),
        None => println!("{}", clinical::EDITOR_TITLE),
    }
    println!("{}", indent(&note_text));
    println!();
    println!("  {}", clinical::PROCESSING_LABEL);

    let advisory = advisor.summarize_note(&note_text).await;

    println!();
    println!("  ! {}", clinical::ETHICAL_DISCLAIMER);
    println!();
    print_advisory(clinical::RESULT_TITLE, &advisory);
    Ok(())
}

async fn analyze_finance(store: &MockStore, advisor: &Advisor<GeminiClient>) -> SimrsResult<()> {
    let panel = FinancePanel::from_store(store)?;
    let advisory = advisor.analyze_finances(&panel.summary).await;
    print_advisory("AI Financial Executive Summary", &advisory);
    Ok(())
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn print_advisory(title: &str, advisory: &Advisory) {
    println!("{}", title);
    println!("{}", "-".repeat(title.len()));
    println!("{}", indent(&advisory.text));
    println!();
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_banner() {
    println!();
    println!("SIMRS Regu-AI");
    println!("BLU Finance & Clinical Support");
    println!("==============================");
    println!();
}
