use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info, warn};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use copyloop::agents::{Creator, Editor};
use copyloop::config::Config;
use copyloop::domain::SessionContext;
use copyloop::llm::{LlmClient, create_client};
use copyloop::prompt::PromptRenderer;
use copyloop::report::{ConsoleTrace, render_report};
use copyloop::runner::RefinementLoop;
use copyloop::CopyloopError;

mod cli;

use cli::Cli;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("copyloop")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("copyloop.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // Without RUST_LOG the level is held in log::max_level until the config
    // file is read
    let env = env_logger::Env::default().default_filter_or("trace");
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(target))
        .init();
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(LevelFilter::Info);
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Apply `log_level` from the config file unless RUST_LOG is set
fn apply_log_level(level: Option<&str>) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Some(level) = level {
        match level.parse::<LevelFilter>() {
            Ok(filter) => log::set_max_level(filter),
            Err(_) => warn!("Ignoring unknown log_level '{}'", level),
        }
    }
}

/// Session inputs: command line first, then the config file
fn session_context(cli: &Cli, config: &Config) -> copyloop::Result<SessionContext> {
    SessionContext::new(
        cli.product.clone().unwrap_or_else(|| config.session.product.clone()),
        cli.audience.clone().unwrap_or_else(|| config.session.audience.clone()),
        cli.max_retries.unwrap_or(config.session.max_retries),
    )
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    let context = session_context(cli, config)?;
    if config.rules.is_empty() {
        return Err(CopyloopError::Configuration("rule set must not be empty".to_string()).into());
    }

    let api_key = config.llm.resolve_api_key()?;
    let client = create_client(&config.llm, api_key).context("Failed to create LLM client")?;
    let renderer = Arc::new(PromptRenderer::new()?);

    let creator = Arc::new(Creator::new(client.clone(), renderer.clone()));
    let editor = Arc::new(Editor::new(client.clone(), renderer));

    let mut runner = RefinementLoop::new(creator, editor, config.rules.clone());
    if cli.is_verbose() {
        eprintln!(
            "{} {} for {} (max retries {})",
            "Refining copy:".yellow(),
            context.product(),
            context.audience(),
            context.max_retries()
        );
        runner = runner.with_observer(Arc::new(ConsoleTrace::new()));
    }

    let outcome = tokio::select! {
        result = runner.run(&context) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, abandoning session");
            return Err(CopyloopError::Cancelled.into());
        }
    };

    let usage = client.total_usage();
    info!(
        "Session used {} tokens ({} in, {} out) on {}",
        usage.total(),
        usage.input_tokens,
        usage.output_tokens,
        client.model()
    );

    if cli.is_verbose() {
        let status = if outcome.is_approved() {
            outcome.status.as_str().green().bold()
        } else {
            outcome.status.as_str().yellow().bold()
        };
        eprintln!(
            "{} {} after {} attempt(s), {} tokens",
            "Finished:".yellow(),
            status,
            outcome.attempt_count(),
            usage.total()
        );
    }

    println!("{}", render_report(&outcome, &context, cli.transcript)?);
    Ok(())
}

/// Exit status for a failed run
fn exit_code(err: &eyre::Report) -> ExitCode {
    let kind = err.chain().find_map(|e| e.downcast_ref::<CopyloopError>());
    match kind {
        Some(CopyloopError::Configuration(_)) => ExitCode::from(2),
        Some(CopyloopError::Cancelled) => ExitCode::from(130),
        _ => ExitCode::FAILURE,
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Local .env may hold the API key
    dotenvy::dotenv().ok();

    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_log_level(config.log_level.as_deref());
    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            exit_code(&err)
        }
    }
}
