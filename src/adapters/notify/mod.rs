pub mod brevo;
pub mod telegram;

use crate::config::WatcherConfig;
use crate::core::dispatch::Dispatcher;
use brevo::BrevoNotifier;
use reqwest::Client;
use std::time::Duration;
use telegram::TelegramNotifier;

/// Registers every fully configured channel, Telegram first.
pub fn build_dispatcher(config: &WatcherConfig, client: &Client) -> Dispatcher {
    let mut dispatcher = Dispatcher::default();

    if let (true, Some(token), Some(chat_id)) = (
        config.telegram.is_configured(),
        config.telegram.bot_token.as_deref(),
        config.telegram.chat_id.as_deref(),
    ) {
        dispatcher = dispatcher.with(
            TelegramNotifier::new(client.clone(), token.trim(), chat_id.trim())
                .with_api_base(config.telegram.api_base.as_str())
                .with_timeout(Duration::from_secs(config.telegram.timeout_seconds)),
        );
    } else {
        tracing::debug!("Telegram notifications skipped: bot token or chat id missing");
    }

    if let (true, Some(api_key), Some(from_email)) = (
        config.email.is_configured(),
        config.email.api_key.as_deref(),
        config.email.from_email.as_deref(),
    ) {
        dispatcher = dispatcher.with(
            BrevoNotifier::new(
                client.clone(),
                api_key.trim(),
                from_email.trim(),
                config.email.to.iter().map(|to| to.trim().to_string()).collect(),
            )
            .with_sender_name(config.email.from_name.as_str())
            .with_api_base(config.email.api_base.as_str())
            .with_timeout(Duration::from_secs(config.email.timeout_seconds)),
        );
    } else {
        tracing::debug!("E-mail notifications skipped: Brevo settings missing");
    }

    dispatcher
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Channel;

    #[test]
    fn test_no_channels_without_credentials() {
        let dispatcher = build_dispatcher(&WatcherConfig::default(), &Client::new());
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_channels_follow_configuration() {
        let mut config = WatcherConfig::default();
        config.telegram.bot_token = Some("1:x".to_string());
        config.telegram.chat_id = Some("42".to_string());
        config.email.api_key = Some("key".to_string());
        config.email.from_email = Some("watcher@example.org".to_string());

        // 缺少收件人時不啟用郵件
        let dispatcher = build_dispatcher(&config, &Client::new());
        assert_eq!(dispatcher.channels(), vec![Channel::Telegram]);

        config.email.to = vec!["a@example.org".to_string()];
        let dispatcher = build_dispatcher(&config, &Client::new());
        assert_eq!(dispatcher.channels(), vec![Channel::Telegram, Channel::Email]);
    }
}
