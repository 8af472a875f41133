//! CLI entrypoint for tavily-tool
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tavily_application::{
    NoProgress, RunSearchInput, RunSearchUseCase, SearchParams, SearchProgressNotifier,
    ToolSchemaPort,
};
use tavily_domain::{SearchRequest, ToolCall, ToolProvider};
use tavily_infrastructure::{
    ConfigLoader, FileConfig, JsonSchemaToolConverter, TAVILY_TOOL, TavilyMcpGateway,
    TavilySearchTool, default_tool_spec,
};
use tavily_presentation::{
    Cli, Command, ConsoleFormatter, ProgressReporter, SearchArgs, SimpleProgress,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting tavily-tool");

    if let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if cli.show_config {
        if !cli.no_config {
            ConfigLoader::print_config_sources(cli.config.as_ref());
            println!();
        }
        let effective = toml::to_string_pretty(&config.redacted())
            .context("Failed to render configuration")?;
        println!("{}", effective);
        return Ok(ExitCode::SUCCESS);
    }

    config.validate().context("Invalid configuration")?;

    if !config.output.color || std::env::var_os("NO_COLOR").is_some() {
        ConsoleFormatter::disable_color();
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let format = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    match command {
        Command::Schema => {
            let schemas = JsonSchemaToolConverter.all_tools_schema(&default_tool_spec());
            println!("{}", ConsoleFormatter::format_schema(&schemas));
            Ok(ExitCode::SUCCESS)
        }
        Command::Search(args) => {
            let session = SearchSession::new(&config, cli.quiet)?;
            let request = build_request(args)?;
            debug!("Search request: {:?}", request);

            let use_case = RunSearchUseCase::new(session.gateway.clone());
            let input = RunSearchInput::new(request).with_params(session.params.clone());
            let output = use_case
                .execute_with_cancellation(input, session.progress.as_ref(), session.token.clone())
                .await?;

            println!("{}", ConsoleFormatter::format_output(&output, format));
            Ok(ExitCode::SUCCESS)
        }
        Command::Call { arguments } => {
            let arguments: serde_json::Value =
                serde_json::from_str(&arguments).context("Arguments are not valid JSON")?;
            let Some(call) = ToolCall::from_json(TAVILY_TOOL, arguments) else {
                bail!("Arguments must be a JSON object");
            };

            let session = SearchSession::new(&config, cli.quiet)?;
            let tool = TavilySearchTool::new(session.gateway.clone())
                .with_params(session.params.clone())
                .with_progress(session.progress.clone())
                .with_cancellation(session.token.clone());

            let result = tool.execute(&call).await;
            println!("{}", ConsoleFormatter::format_tool_result(&result));

            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Everything a search-running command needs.
struct SearchSession {
    gateway: Arc<TavilyMcpGateway>,
    params: SearchParams,
    progress: Arc<dyn SearchProgressNotifier>,
    token: CancellationToken,
}

impl SearchSession {
    fn new(config: &FileConfig, quiet: bool) -> Result<Self> {
        let gateway = Arc::new(TavilyMcpGateway::from_config(config)?);
        info!("Search provider: {}", gateway.params().display_command());

        let params = SearchParams::default().with_timeout_secs(config.search.timeout_seconds);

        let progress: Arc<dyn SearchProgressNotifier> = if quiet {
            Arc::new(NoProgress)
        } else if std::io::stderr().is_terminal() {
            Arc::new(ProgressReporter::new())
        } else {
            Arc::new(SimpleProgress)
        };

        let token = CancellationToken::new();
        let on_interrupt = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling search");
                on_interrupt.cancel();
            }
        });

        Ok(Self {
            gateway,
            params,
            progress,
            token,
        })
    }
}

fn build_request(args: SearchArgs) -> Result<SearchRequest> {
    let mut request = SearchRequest::new(args.query)?
        .with_domains(args.domains)
        .with_answer(args.include_answer);

    if let Some(max_results) = args.max_results {
        request = request.with_max_results(max_results);
    }
    if let Some(depth) = args.depth {
        request = request.with_depth(depth.into());
    }
    if let Some(topic) = args.topic {
        request = request.with_topic(topic.into());
    }

    Ok(request)
}

/// Initialize logging based on verbosity level.
///
/// `RUST_LOG` overrides the verbosity flags. Logs go to stderr so that
/// stdout only carries results.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "tavily-tool.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
