use crate::core::{Channel, Notification, Notifier};
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BREVO_API: &str = "https://api.brevo.com";
pub const DEFAULT_SENDER_NAME: &str = "OLG Watcher";

#[derive(Debug, Serialize)]
struct Contact<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionalEmail<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    text_content: &'a str,
}

/// Transactional e-mail through the Brevo v3 API.
pub struct BrevoNotifier {
    client: Client,
    api_base: String,
    api_key: String,
    sender_name: String,
    sender_email: String,
    recipients: Vec<String>,
    timeout: Duration,
}

impl BrevoNotifier {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        sender_email: impl Into<String>,
        recipients: Vec<String>,
    ) -> Self {
        Self {
            client,
            api_base: DEFAULT_BREVO_API.to_string(),
            api_key: api_key.into(),
            sender_name: DEFAULT_SENDER_NAME.to_string(),
            sender_email: sender_email.into(),
            recipients,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = name.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Splits a comma-separated recipient list, trimming each address and dropping blanks.
pub fn parse_recipients(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl Notifier for BrevoNotifier {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let payload = TransactionalEmail {
            sender: Contact {
                name: Some(self.sender_name.as_str()),
                email: self.sender_email.as_str(),
            },
            to: self
                .recipients
                .iter()
                .map(|email| Contact {
                    name: None,
                    email: email.as_str(),
                })
                .collect(),
            subject: &notification.subject,
            text_content: &notification.body,
        };

        let response = self
            .client
            .post(format!("{}/v3/smtp/email", self.api_base))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header("api-key", &self.api_key)
            .body(serde_json::to_vec(&payload)?)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(WatchError::notification(
                Channel::Email.to_string(),
                format!("HTTP {}: {}", status, detail),
            ));
        }

        Ok(())
    }
}
