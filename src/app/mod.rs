// Application wiring: turns a resolved configuration into a ready watcher.

use crate::adapters::http::{build_client, HttpPageSource};
use crate::adapters::notify::build_dispatcher;
use crate::adapters::storage::LocalStorage;
use crate::config::WatcherConfig;
use crate::core::extract::SectionExtractor;
use crate::core::state::HashStore;
use crate::core::watcher::Watcher;
use crate::core::{PageSource, Storage};
use crate::utils::error::Result;

pub type HttpWatcher = Watcher<HttpPageSource, LocalStorage>;

pub fn build_watcher(config: &WatcherConfig, dry_run: bool) -> Result<HttpWatcher> {
    let client = build_client()?;

    let source = HttpPageSource::new(client.clone(), config.target.url.as_str())
        .with_user_agent(config.target.user_agent.as_str())
        .with_timeout(config.request_timeout());
    let store = HashStore::at_path(&config.state.hash_file)?;
    let dispatcher = build_dispatcher(config, &client);

    Ok(Watcher::new(source, store, dispatcher)
        .with_extractor(SectionExtractor::new(config.target.section_heading.as_str()))
        .with_dry_run(dry_run))
}

pub fn log_startup_summary(config: &WatcherConfig) {
    tracing::info!("🚀 OLG Watcher started");
    tracing::info!("URL: {}", config.target.url);
    tracing::info!("Section: {}", config.target.section_heading);
    tracing::info!("Check interval: {} seconds", config.schedule.check_interval_seconds);
    tracing::info!("State file: {}", config.state.hash_file);

    let channels = config.channels();
    if channels.is_empty() {
        tracing::warn!("⚠️ No notification channels configured!");
    } else {
        let names: Vec<String> = channels.iter().map(|c| c.to_string()).collect();
        tracing::info!("Notification channels: {}", names.join(", "));
    }

    if config.email.is_partial() {
        tracing::warn!("E-mail is partially configured (needs BREVO_API_KEY, FROM_EMAIL and MAIL_TO)");
    }
}

/// Runs one check for `--once`/`--dry-run` and returns the process exit code.
pub async fn run_single_check<P: PageSource, S: Storage>(watcher: &mut Watcher<P, S>) -> i32 {
    match watcher.check_once().await {
        Ok(outcome) => {
            tracing::info!(
                "✅ Check finished at {} ({} change(s))",
                outcome.checked_at.to_rfc3339(),
                outcome.detection.changes.len()
            );
            0
        }
        Err(e) => {
            tracing::error!(
                "❌ Check failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            e.severity().exit_code()
        }
    }
}
