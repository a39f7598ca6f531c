//! CLI entrypoint for Boardroom
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use boardroom_application::{CommandRouter, SessionRegistry};
use boardroom_domain::ConversationId;
use boardroom_infrastructure::{BackendFactory, ConfigLoader, FileConfig, Severity};
use boardroom_presentation::{BoardroomRepl, Cli, ConsoleTransport, TurnProgress};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Pause before the console session is restarted after a failure
const RESTART_BACKOFF: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting Boardroom");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    report_config_issues(&config);

    // === Dependency Injection ===
    let registry = Arc::new(SessionRegistry::new(config.to_behavior_config()));

    let mut dispatcher = BackendFactory::build_dispatcher(&config.providers);
    if !cli.quiet && config.repl.show_progress {
        dispatcher = dispatcher.with_notifier(Arc::new(TurnProgress::new()));
    }

    let documents_dir = std::env::current_dir().context("Cannot resolve working directory")?;
    let transport = Arc::new(ConsoleTransport::new(documents_dir));
    let router = Arc::new(CommandRouter::new(
        registry.clone(),
        Arc::new(dispatcher),
        transport.clone(),
    ));

    let conversation =
        ConversationId::from(cli.conversation.unwrap_or(config.repl.conversation_id));
    let history_file = config.repl.history_file.as_ref().map(PathBuf::from);

    let result = tokio::select! {
        result = supervise(router, transport, conversation, history_file) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            Ok(())
        }
    };

    // Stop a discussion that may still be running in the background
    registry.clear_session(conversation);
    info!("Boardroom stopped");
    result
}

/// Keep the console session alive, restarting it after unexpected failures
async fn supervise(
    router: Arc<CommandRouter>,
    transport: Arc<ConsoleTransport>,
    conversation: ConversationId,
    history_file: Option<PathBuf>,
) -> Result<()> {
    loop {
        let repl = BoardroomRepl::new(router.clone(), transport.clone(), conversation)
            .with_history_file(history_file.clone());

        match repl.run().await {
            Ok(()) => return Ok(()),
            Err(e) => {
                error!("Console session failed: {}", e);
                warn!("Restarting in {} seconds", RESTART_BACKOFF.as_secs());
                tokio::time::sleep(RESTART_BACKOFF).await;
            }
        }
    }
}

/// Initialize logging based on verbosity level, or `RUST_LOG` when set.
///
/// With `log_dir`, a daily-rotated file layer is added; the returned guard
/// must live until exit so buffered lines are flushed.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "boardroom.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn report_config_issues(config: &FileConfig) {
    for issue in config.validate() {
        match issue.severity {
            Severity::Warning => {
                warn!(field = %issue.field, "{}", issue.message);
                eprintln!("{} {}", "config warning:".yellow().bold(), issue);
            }
            Severity::Error => {
                error!(field = %issue.field, "{}", issue.message);
                eprintln!("{} {}", "config error:".red().bold(), issue);
            }
        }
    }
}
