//! CLI entrypoint for secscope
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use secscope_application::{
    AnalyzeContentUseCase, AnalyzeInput, CompositeStageObserver, EscalatingRetryPolicy,
    RouteQueryUseCase, StageObserver,
};
use secscope_domain::OutputFormat;
use secscope_infrastructure::{ConfigLoader, FileConfig, GeminiGenerator, JsonlStageLogger};
use secscope_presentation::{AppState, Cli, Command, ConsoleFormatter, StageReporter, serve};
use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    info!("Starting secscope");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_isolated(cli.config.as_deref())
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", effective_config(&config)?);
        return Ok(());
    }

    for warning in config.check()? {
        warn!("{}", warning);
    }

    let Some(command) = cli.command.clone() else {
        bail!("No command given. Try `secscope --help`.");
    };

    if !config.output.color {
        colored::control::set_override(false);
    }
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let generator = Arc::new(GeminiGenerator::from_config(&config.gemini)?);
    let policy = EscalatingRetryPolicy::new(generator)
        .with_params(config.to_recovery_params())
        .with_observer(stage_observer(&config, cli.quiet));
    let analyze = AnalyzeContentUseCase::new(policy, Arc::new(config.to_tool_catalog()));
    let router = RouteQueryUseCase::new(analyze.clone())
        .with_router_model(config.models.parse_router().0);

    // Ctrl-C cancels in-flight work and stops the server
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, shutting down");
                shutdown.cancel();
            }
        });
    }

    match command {
        Command::Route { query } => {
            let output = router.route(&query, &Some(shutdown.clone())).await;
            let text = match format {
                OutputFormat::Text => ConsoleFormatter::format_route(&output),
                OutputFormat::Json => ConsoleFormatter::format_json(&output.envelope()),
            };
            println!("{}", text);
        }

        Command::RunTool {
            tool,
            content,
            language,
        } => {
            let content = read_content(&content)?;
            let input = AnalyzeInput::parse(&tool, content)?.with_language(language);
            let tool = input.tool;
            let resolution = analyze.execute(input, &Some(shutdown.clone())).await?;
            let text = match format {
                OutputFormat::Text => ConsoleFormatter::format_tool(tool, &resolution),
                OutputFormat::Json => ConsoleFormatter::format_json(&resolution.result.to_value()),
            };
            println!("{}", text);
        }

        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let addr: SocketAddr = bind
                .trim()
                .parse()
                .with_context(|| format!("Invalid bind address '{}'", bind))?;
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;

            let state = Arc::new(AppState::new(router, analyze).with_shutdown(shutdown));
            serve(listener, state).await?;
            info!("Server stopped");
        }
    }

    Ok(())
}

/// Initialize tracing from verbosity, optionally teeing into a log file.
///
/// The returned guard must live until exit so buffered lines are flushed.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Console reporter (unless quiet) plus the JSONL stage log (if configured).
fn stage_observer(config: &FileConfig, quiet: bool) -> Arc<dyn StageObserver> {
    let mut observers = CompositeStageObserver::default();
    if !quiet {
        observers.push(Arc::new(StageReporter::new()));
    }
    if let Some(path) = &config.logging.stage_log {
        match JsonlStageLogger::new(path) {
            Some(logger) => {
                info!("Stage log: {}", logger.path().display());
                observers.push(Arc::new(logger));
            }
            None => warn!("Stage log disabled: cannot open {}", path.display()),
        }
    }
    Arc::new(observers)
}

/// `-` reads the whole of stdin; anything else is the content itself.
fn read_content(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read content from stdin")?;
    Ok(buf)
}

/// Effective configuration as TOML, with any inline API key redacted.
fn effective_config(config: &FileConfig) -> Result<String> {
    let mut redacted = config.clone();
    if redacted.gemini.api_key.is_some() {
        redacted.gemini.api_key = Some("<redacted>".to_string());
    }
    toml::to_string_pretty(&redacted).context("Failed to render configuration")
}
