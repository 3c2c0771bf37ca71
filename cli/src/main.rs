//! CLI entrypoint for submind
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use submind_application::{
    DiscussionContext, DiscussionError, DiscussionSettings, ModelBackend, NoObserver,
    TranscriptExporter,
};
use submind_infrastructure::{
    ConfigLoader, FileConfig, FileTranscriptExporter, OpenAiCompatibleGateway,
};
use submind_presentation::{ChatRepl, Cli, ConsoleFormatter, LiveReporter};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting submind");

    if cli.show_config {
        for line in ConfigLoader::config_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("Config error: {}", issue);
        }
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }

    // === Dependency Injection ===
    let base_url = config.backend.resolved_base_url();
    let gateway = OpenAiCompatibleGateway::new(&base_url, config.timeout())?
        .with_api_key(config.backend.api_key().map(str::to_string));
    let backend = ModelBackend::new(Arc::new(gateway));

    if cli.list_models {
        let models = backend.list_models().await;
        if models.is_empty() {
            bail!("No models available from {}", base_url);
        }
        for model in models {
            println!("{}", model);
        }
        return Ok(());
    }

    if !backend.validate_connection().await {
        warn!("Model server at {} did not answer; continuing anyway", base_url);
    }

    let context =
        DiscussionContext::new(backend, config.to_profiles()?, settings_for(&cli, &config));

    let export_enabled = config.discussion.enable_export && !cli.no_export;
    let exporter = export_enabled.then(|| -> Arc<dyn TranscriptExporter> {
        Arc::new(FileTranscriptExporter::from_config(&config.export))
    });

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(&context, cli.participants())?
            .with_progress(!cli.quiet)
            .with_exporter(exporter);

        repl.run().await?;
        return Ok(());
    }

    // Single prompt mode - prompt is required
    let prompt = match cli.prompt.as_deref() {
        Some(p) if !p.trim().is_empty() => p.trim(),
        _ => bail!("Prompt is required. Use --chat for interactive mode."),
    };

    let token = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let token = token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        }
    });

    let formatter = ConsoleFormatter::from_profiles(context.profiles());
    let mut discussion = context
        .new_discussion(cli.participants())?
        .with_cancellation(token);

    let result = if cli.quiet {
        discussion.stream(prompt, &NoObserver).await
    } else {
        let reporter = LiveReporter::new(formatter.clone());
        discussion.stream(prompt, &reporter).await
    };
    ctrl_c.abort();

    if cli.quiet {
        print!("{}", formatter.format_transcript(discussion.transcript()));
        if let Some(summary) = discussion.summary() {
            print!("{}", formatter.format_summary(&summary));
        }
    }

    if let Err(DiscussionError::Cancelled) = &result {
        println!("\nDiscussion stopped.");
    }

    if let Some(exporter) = &exporter {
        match discussion.export(exporter.as_ref()) {
            Ok(paths) if !paths.is_empty() => {
                print!("{}", ConsoleFormatter::format_export_paths(&paths));
            }
            Ok(_) => {}
            Err(e) => warn!("Export failed: {}", e),
        }
    }

    match result {
        Ok(outcome) => {
            info!(
                "Finished after {} round(s): {}",
                outcome.rounds, outcome.reason
            );
            Ok(())
        }
        Err(DiscussionError::Cancelled) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Initialize tracing from the verbosity level, optionally into a file
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Discussion settings from config, with command-line overrides applied
fn settings_for(cli: &Cli, config: &FileConfig) -> DiscussionSettings {
    let mut settings = config.to_settings();
    if let Some(max_rounds) = cli.max_rounds {
        settings = settings.with_max_rounds(max_rounds);
    }
    if cli.no_auto_terminate {
        settings = settings.without_auto_terminate();
    }
    settings
}
