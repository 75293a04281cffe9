//! In-memory port implementations shared by the unit tests.

use crate::core::{Channel, Notification, Notifier, PageSource, Storage};
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MockStorage {
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Default::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub async fn put(&self, path: &str, data: &[u8]) {
        self.files.lock().await.insert(path.to_string(), data.to_vec());
    }

    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(path).cloned()
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        if self.fail_reads {
            return Err(WatchError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )));
        }
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            WatchError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(WatchError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only file system",
            )));
        }
        self.put(path, data).await;
        Ok(())
    }
}

/// Serves queued pages in order; `None` simulates a failed request. The last
/// page keeps being served once the queue runs dry.
#[derive(Clone, Default)]
pub struct ScriptedPage {
    pages: Arc<Mutex<VecDeque<Option<String>>>>,
    last: Arc<Mutex<Option<String>>>,
    pub fetches: Arc<Mutex<usize>>,
}

impl ScriptedPage {
    pub fn new(pages: Vec<Option<&str>>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(
                pages.into_iter().map(|p| p.map(str::to_string)).collect(),
            )),
            ..Default::default()
        }
    }

    pub async fn fetch_count(&self) -> usize {
        *self.fetches.lock().await
    }
}

#[async_trait]
impl PageSource for ScriptedPage {
    fn location(&self) -> &str {
        "memory://page"
    }

    async fn fetch(&self) -> Result<String> {
        *self.fetches.lock().await += 1;
        let next = self.pages.lock().await.pop_front();
        let page = match next {
            Some(page) => {
                *self.last.lock().await = page.clone();
                page
            }
            None => self.last.lock().await.clone(),
        };
        page.ok_or_else(|| {
            WatchError::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))
        })
    }
}

#[derive(Clone)]
pub struct RecordingNotifier {
    channel: Channel,
    fail: bool,
    pub sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            fail: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(channel: Channel) -> Self {
        Self {
            fail: true,
            ..Self::new(channel)
        }
    }

    pub async fn subjects(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .map(|n| n.subject.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        if self.fail {
            return Err(WatchError::notification(self.channel.to_string(), "HTTP 500"));
        }
        self.sent.lock().await.push(notification.clone());
        Ok(())
    }
}
