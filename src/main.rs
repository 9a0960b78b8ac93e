//! fx_ledger - multi-currency ledger runner
//!
//! Without arguments, runs a short demonstration against a fresh store.
//! With `--script <path>`, executes one JSON command per line and prints one
//! JSON outcome or error per line on stdout. Logs go to stderr.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fx_ledger::handlers::{
    BalanceCommand, CreateAccountCommand, DepositCommand, TransferCommand, WithdrawCommand,
};
use fx_ledger::{
    dispatch, BalanceStore, CommandOutcome, Config, ErrorResponse, LedgerCommand, LogFormat,
    OperationContext, TransferEngine,
};

#[derive(Parser, Debug)]
#[command(name = "fx_ledger")]
#[command(about = "Multi-currency ledger with cross-currency transfers")]
struct Cli {
    /// JSON-lines command file; runs the demonstration when omitted
    #[arg(long)]
    script: Option<PathBuf>,
}

/// Initialize tracing/logging on stderr
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fx_ledger=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let engine = TransferEngine::new(config.converter());
    let mut store = BalanceStore::new(engine.converter().rates());

    tracing::info!(
        reference = %config.rates.reference(),
        currencies = config.rates.len(),
        decimal_places = config.decimal_places,
        "ledger ready"
    );

    match cli.script {
        Some(path) => run_script(&engine, &mut store, &path),
        None => run_demo(&engine, &mut store),
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Execute a JSON-lines command file. Blank lines and `#` comments are skipped.
///
/// Rejected commands are printed and the run continues; an invariant failure
/// stops it with an error.
fn run_script(engine: &TransferEngine, store: &mut BalanceStore, path: &Path) -> anyhow::Result<()> {
    let file = File::open(path).with_context(|| format!("Cannot open script {}", path.display()))?;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Cannot read script {}", path.display()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let context = OperationContext::new().with_source(format!("script:{}", index + 1));
        let outcome = LedgerCommand::from_json(line)
            .and_then(|command| dispatch(engine, store, command, &context));

        match outcome {
            Ok(outcome) => print_json(&outcome)?,
            Err(err) if err.is_fatal() => {
                print_json(&ErrorResponse::from(&err))?;
                return Err(err).with_context(|| format!("Aborted at line {}", index + 1));
            }
            Err(err) => print_json(&ErrorResponse::from(&err))?,
        }
    }

    Ok(())
}

/// Two users trading dollars, then a payment funded from other currencies.
fn run_demo(engine: &TransferEngine, store: &mut BalanceStore) -> anyhow::Result<()> {
    let steps = vec![
        LedgerCommand::CreateAccount(CreateAccountCommand::new("A")),
        LedgerCommand::Deposit(DepositCommand::new("A", "USD", "10")),
        LedgerCommand::CreateAccount(CreateAccountCommand::new("B")),
        LedgerCommand::Deposit(DepositCommand::new("B", "USD", "20")),
        LedgerCommand::Transfer(TransferCommand::new("B", "A", "USD", "15")),
        LedgerCommand::Balance(BalanceCommand::new("A")),
        LedgerCommand::Balance(BalanceCommand::new("B")),
        LedgerCommand::Withdraw(WithdrawCommand::new("A", "USD", "25")),
        LedgerCommand::Balance(BalanceCommand::new("A")),
        // C holds no dollars: 1.5 USD comes from all of its NGN and half of its GBP
        LedgerCommand::CreateAccount(CreateAccountCommand::new("C")),
        LedgerCommand::Deposit(DepositCommand::new("C", "NGN", "415")),
        LedgerCommand::Deposit(DepositCommand::new("C", "GBP", "0.86")),
        LedgerCommand::Transfer(TransferCommand::new("C", "A", "USD", "1.5")),
        LedgerCommand::Balance(BalanceCommand::new("C")),
        LedgerCommand::Balance(BalanceCommand::new("A")),
    ];

    for (index, command) in steps.into_iter().enumerate() {
        let context = OperationContext::new().with_source(format!("demo:{}", index + 1));
        let outcome: CommandOutcome = dispatch(engine, store, command, &context)?;
        print_json(&outcome)?;
    }

    Ok(())
}
