use crate::core::detector;
use crate::core::dispatch::Dispatcher;
use crate::core::extract::SectionExtractor;
use crate::core::state::HashStore;
use crate::core::{Change, CheckOutcome, Fingerprint, PageSource, Storage};
use crate::utils::error::{ErrorCategory, Result};
use std::future::Future;
use std::time::Duration;

pub struct Watcher<P: PageSource, S: Storage> {
    source: P,
    extractor: SectionExtractor,
    store: HashStore<S>,
    dispatcher: Dispatcher,
    last: Option<Fingerprint>,
    dry_run: bool,
}

impl<P: PageSource, S: Storage> Watcher<P, S> {
    pub fn new(source: P, store: HashStore<S>, dispatcher: Dispatcher) -> Self {
        Self {
            source,
            extractor: SectionExtractor::default(),
            store,
            dispatcher,
            last: None,
            dry_run: false,
        }
    }

    pub fn with_extractor(mut self, extractor: SectionExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Dry runs notify nobody and never touch the state file.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn last_fingerprint(&self) -> Option<&Fingerprint> {
        self.last.as_ref()
    }

    /// 載入上一次保存的指紋作為比較基準
    pub async fn initialize(&mut self) {
        self.last = self.store.load().await;
    }

    pub async fn check_once(&mut self) -> Result<CheckOutcome> {
        tracing::info!("Checking {} ...", self.source.location());
        let checked_at = chrono::Utc::now();

        let html = self.source.fetch().await?;
        let section = self.extractor.extract(&html);
        let fingerprint = Fingerprint::of(&html, section.as_deref());
        tracing::debug!(
            "Fingerprint: page={} section={} (section present: {})",
            fingerprint.full_hash,
            fingerprint.section_hash,
            section.is_some()
        );

        let detection = detector::detect(self.last.as_ref(), &fingerprint, section.as_deref());

        let mut notifications = Vec::new();
        let mut deliveries = Vec::new();

        if detection.baseline {
            tracing::info!("First run - baseline set, no notification sent");
        }

        for change in &detection.changes {
            match change {
                Change::StructureChanged => tracing::warn!("⚠️ Page structure change detected!"),
                Change::SectionChanged { .. } => {
                    tracing::info!("✅ Change in the watched section detected!")
                }
            }

            let notification = change.to_notification();
            if self.dry_run {
                tracing::info!("[dry-run] Would notify: {}", notification.subject);
            } else {
                deliveries.push(self.dispatcher.notify(&notification).await);
            }
            notifications.push(notification);
        }

        let section_changed = detection
            .changes
            .iter()
            .any(|c| matches!(c, Change::SectionChanged { .. }));
        if !detection.baseline && !section_changed {
            tracing::info!("No changes detected in the watched section");
        }

        if !self.dry_run {
            self.store.save(&fingerprint).await?;
            self.last = Some(fingerprint.clone());
        }

        Ok(CheckOutcome {
            checked_at,
            fingerprint,
            detection,
            notifications,
            deliveries,
        })
    }

    /// Checks, then sleeps `interval`, until `shutdown` resolves. A failed
    /// check is logged and retried on the next tick.
    pub async fn run<F>(&mut self, interval: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            if let Err(e) = self.check_once().await {
                match e.category() {
                    ErrorCategory::Network => tracing::error!("Failed to fetch the page: {}", e),
                    category => tracing::error!(
                        "Check failed: {} (Category: {:?}, Severity: {:?})",
                        e,
                        category,
                        e.severity()
                    ),
                }
                if e.is_retryable() {
                    tracing::debug!("💡 {}", e.recovery_suggestion());
                } else {
                    tracing::warn!("💡 {}", e.recovery_suggestion());
                }
            }

            tracing::info!(
                "Waiting {} seconds until the next check...",
                interval.as_secs()
            );
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping watcher");
                    break;
                }
            }
        }
    }
}
