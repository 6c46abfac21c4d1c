//! tool-agent command-line entry point.

use clap::Parser;
use tool_agent::agent::RunStatus;
use tool_agent::cli::commands::{ask, plan};
use tool_agent::cli::{Cli, Command, CommandContext};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

fn level_filter(log_level: &str) -> EnvFilter {
    EnvFilter::new(format!("tool_agent={}", log_level.to_lowercase()))
}

/// Installed before configuration is read so loading problems are reported.
fn init_tracing() -> reload::Handle<EnvFilter, Registry> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter("info"));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
    handle
}

/// `RUST_LOG` wins over the configured `[logging] log_level`.
fn apply_log_level(handle: &reload::Handle<EnvFilter, Registry>, log_level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Err(e) = handle.reload(level_filter(log_level)) {
        warn!("Could not apply log level {}: {}", log_level, e);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let log_handle = init_tracing();

    let cli = Cli::parse();
    let ctx = CommandContext::load(cli.config.as_deref(), cli.env_file.as_deref())?;
    apply_log_level(&log_handle, &ctx.config.config.logging.log_level);
    info!("{}", ctx.config_source());

    let provider = ctx.provider()?;

    match cli.command {
        Command::Ask(args) => {
            let result = ask::execute_ask(&ctx, provider, &args).await;
            ask::print_result(&result);
            if result.status == RunStatus::TransportError {
                std::process::exit(1);
            }
        }
        Command::Plan(args) => {
            let report = plan::execute_plan(&ctx, provider, &args).await?;
            plan::print_report(&report);
        }
    }

    Ok(())
}
