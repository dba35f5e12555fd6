use clap::Parser;
use drivedesk::domain::ports::ConfigProvider;
use drivedesk::utils::error::{AppError, ErrorSeverity};
use drivedesk::utils::{logger, validation::Validate};
use drivedesk::{AppState, CliConfig};

fn exit_code(e: &AppError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: AppError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_compact_logger(cli.verbose);
            fail(e);
        }
    };

    logger::init_logger(config.logging.verbose, config.logging.format);
    tracing::info!("Starting drivedesk {}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Auth endpoint: {:?}, progress endpoint: {:?}",
        config.auth.endpoint,
        config.progress.endpoint
    );

    if let Err(e) = config.validate() {
        fail(e);
    }

    let bind = match config.bind_addr() {
        Ok(bind) => bind,
        Err(e) => fail(e),
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => fail(e),
    };

    if let Err(e) = drivedesk::server::serve(bind, state, shutdown_signal()).await {
        fail(e);
    }

    Ok(())
}
