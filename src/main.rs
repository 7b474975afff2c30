mod cli;
mod commands;
mod config;
mod console;
mod context;
mod error;
mod logging;
mod output;

use clap::Parser;
use kyc::{
    CountryKycAssignment, EntityKind, KycDetail, KycLevel, User, UserKycDetail, UserKycLevel,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::cli::{Cli, Command, ConsoleArgs};
use crate::config::ConsoleConfig;
use crate::context::Context;
use crate::error::ConsoleError;
use crate::logging::LogBuffer;

/// Run `$body` with `$t` bound to the record type of an [`EntityKind`].
macro_rules! with_entity {
    ($kind:expr, $t:ident => $body:expr) => {
        match $kind {
            EntityKind::KycLevels => {
                type $t = KycLevel;
                $body
            }
            EntityKind::KycDetails => {
                type $t = KycDetail;
                $body
            }
            EntityKind::Users => {
                type $t = User;
                $body
            }
            EntityKind::UserKycLevels => {
                type $t = UserKycLevel;
                $body
            }
            EntityKind::UserKycDetails => {
                type $t = UserKycDetail;
                $body
            }
            EntityKind::CountryAssignments => {
                type $t = CountryKycAssignment;
                $body
            }
        }
    };
}

#[tokio::main]
async fn main() {
    // reqwest's rustls backend needs a process-wide provider.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    // The console owns the terminal, so its logs go to the in-app panel.
    let console_config = ConsoleConfig::default();
    let log_buffer = matches!(cli.command, Command::Console(_))
        .then(|| LogBuffer::new(console_config.log_capacity));
    logging::init(&cli.log_level, log_buffer.clone());

    info!(offline = cli.offline, "kyc-console starting");

    let cancel = setup_signal_handlers();

    if let Err(e) = run(&cli, console_config, log_buffer, cancel).await {
        error!(error = %e, "command failed");
        std::process::exit(e.exit_code());
    }
}

async fn run(
    cli: &Cli,
    console_config: ConsoleConfig,
    log_buffer: Option<LogBuffer>,
    cancel: CancellationToken,
) -> Result<(), ConsoleError> {
    let ctx = Context::from_cli(cli)?;

    match &cli.command {
        Command::List(args) => {
            with_entity!(EntityKind::from(args.entity), T => commands::list::<T>(&ctx, args).await)
        }
        Command::Show(args) => {
            with_entity!(EntityKind::from(args.entity), T => commands::show::<T>(&ctx, args).await)
        }
        Command::Review(args) => commands::review(&ctx, args).await,
        Command::Reorder(args) => commands::reorder(&ctx, args).await,
        Command::Progress(args) => commands::progress(&ctx, args).await,
        Command::Console(args) => {
            let logs = log_buffer.unwrap_or_else(|| LogBuffer::new(console_config.log_capacity));
            run_console(ctx, args, console_config, logs, cancel).await
        }
    }
}

async fn run_console(
    ctx: Context,
    args: &ConsoleArgs,
    mut config: ConsoleConfig,
    logs: LogBuffer,
    cancel: CancellationToken,
) -> Result<(), ConsoleError> {
    if let Some(page_size) = args.page_size {
        commands::check_page_size(page_size)?;
        config.page_size = page_size;
    }
    let level = args.level.clone();
    with_entity!(EntityKind::from(args.entity), T => {
        console::run_console::<T>(ctx, config, level, logs, cancel).await
    })
}

/// Cancel on SIGINT, and on SIGTERM where available.
fn setup_signal_handlers() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, shutting down");
        cancel_clone.cancel();
    });

    #[cfg(unix)]
    {
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                    info!("received SIGTERM, shutting down");
                    cancel_clone.cancel();
                }
                Err(e) => error!(error = %e, "failed to register SIGTERM handler"),
            }
        });
    }

    cancel
}
