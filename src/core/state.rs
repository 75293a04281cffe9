use crate::core::{Fingerprint, Storage};
use crate::utils::error::{Result, WatchError};

/// Persists the last seen fingerprint as two lines: page hash, then section hash.
pub struct HashStore<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> HashStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 讀取失敗一律視為沒有基準值，下一輪會重新建立
    pub async fn load(&self) -> Option<Fingerprint> {
        let data = match self.storage.read_file(&self.key).await {
            Ok(data) => data,
            Err(WatchError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No previous state file found - first run");
                return None;
            }
            Err(e) => {
                tracing::error!("Failed to read state file '{}': {}", self.key, e);
                return None;
            }
        };

        let text = match String::from_utf8(data) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("State file '{}' is not valid UTF-8: {}", self.key, e);
                return None;
            }
        };

        let fingerprint = parse_state(&text);
        if fingerprint.is_some() {
            tracing::debug!("Fingerprints loaded from {}", self.key);
        } else {
            tracing::warn!("State file '{}' is malformed, ignoring it", self.key);
        }
        fingerprint
    }

    pub async fn save(&self, fingerprint: &Fingerprint) -> Result<()> {
        self.storage
            .write_file(&self.key, render_state(fingerprint).as_bytes())
            .await?;
        tracing::debug!("Fingerprints saved to {}", self.key);
        Ok(())
    }
}

pub fn parse_state(text: &str) -> Option<Fingerprint> {
    let lines: Vec<&str> = text.lines().collect();
    match lines.as_slice() {
        [full, section] => Some(Fingerprint {
            full_hash: full.to_string(),
            section_hash: section.to_string(),
        }),
        _ => None,
    }
}

pub fn render_state(fingerprint: &Fingerprint) -> String {
    format!("{}\n{}\n", fingerprint.full_hash, fingerprint.section_hash)
}
