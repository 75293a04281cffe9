use crate::core::{Channel, Notification, Notifier};
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(client: Client, bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            api_base: DEFAULT_TELEGRAM_API.to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

/// Bold subject, blank line, then the body with HTML metacharacters escaped.
pub fn render_message(notification: &Notification) -> String {
    format!(
        "<b>{}</b>\n\n{}",
        escape_html(&notification.subject),
        escape_html(&notification.body)
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn channel(&self) -> Channel {
        Channel::Telegram
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text: render_message(notification),
            parse_mode: "HTML",
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            // URL 內含 bot token，不可出現在錯誤訊息與日誌中
            .map_err(|e| WatchError::from(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            // Telegram 會在 description 欄位說明失敗原因
            let detail = response.text().await.unwrap_or_default();
            return Err(WatchError::notification(
                Channel::Telegram.to_string(),
                format!("HTTP {}: {}", status, detail),
            ));
        }

        Ok(())
    }
}
