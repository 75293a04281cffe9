use anyhow::Context;
use clap::Parser;
use olg_watcher::app::{build_watcher, log_startup_summary, run_single_check};
use olg_watcher::utils::{logger, validation::Validate};
use olg_watcher::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 必須在解析參數前載入，clap 才讀得到環境變數
    let dotenv = dotenvy::dotenv();

    let cli = CliConfig::parse();
    logger::init_logger(cli.verbose, cli.log_format);

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.severity().exit_code());
        }
    };

    log_startup_summary(&config);

    let mut watcher = build_watcher(&config, cli.dry_run).context("failed to set up the watcher")?;
    watcher.initialize().await;

    if cli.once || cli.dry_run {
        let exit_code = run_single_check(&mut watcher).await;
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
        return Ok(());
    }

    watcher.run(config.check_interval(), shutdown_signal()).await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
