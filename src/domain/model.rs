use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 整頁與關注區段的 SHA-256 指紋
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub full_hash: String,
    pub section_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The page as a whole changed (layout, navigation, or the watched section).
    StructureChanged,
    SectionChanged { content: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub baseline: bool,
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Telegram,
    Email,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Telegram => write!(f, "Telegram"),
            Channel::Email => write!(f, "E-Mail"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<Channel>,
    pub failed: Vec<Channel>,
}

impl DeliveryReport {
    pub fn any_delivered(&self) -> bool {
        !self.delivered.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub checked_at: DateTime<Utc>,
    pub fingerprint: Fingerprint,
    pub detection: Detection,
    pub notifications: Vec<Notification>,
    pub deliveries: Vec<DeliveryReport>,
}

impl CheckOutcome {
    pub fn changed(&self) -> bool {
        !self.detection.changes.is_empty()
    }
}
