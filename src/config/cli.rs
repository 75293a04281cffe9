use crate::adapters::notify::brevo::parse_recipients;
use crate::config::WatcherConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::fmt;

/// Command line and environment settings. Anything given here overrides the
/// TOML file, which in turn overrides the built-in defaults.
#[derive(Clone, Parser)]
#[command(name = "olg-watcher")]
#[command(about = "Watches a web page section and sends Telegram/e-mail notifications on changes")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "OLG_WATCHER_CONFIG")]
    pub config: Option<String>,

    /// Page to watch
    #[arg(long, env = "WATCH_URL")]
    pub url: Option<String>,

    /// Text of the <h5> heading that opens the watched section
    #[arg(long, env = "SECTION_HEADING")]
    pub section_heading: Option<String>,

    /// Seconds between two checks
    #[arg(long, env = "CHECK_INTERVAL")]
    pub check_interval: Option<u64>,

    /// File holding the last page and section hashes
    #[arg(long, env = "HASH_FILE")]
    pub hash_file: Option<String>,

    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    #[arg(long, env = "BREVO_API_KEY", hide_env_values = true)]
    pub brevo_api_key: Option<String>,

    #[arg(long, env = "FROM_EMAIL")]
    pub from_email: Option<String>,

    #[arg(long, env = "FROM_NAME")]
    pub from_name: Option<String>,

    /// Comma-separated recipient list
    #[arg(long, env = "MAIL_TO")]
    pub mail_to: Option<String>,

    /// Run a single check and exit
    #[arg(long)]
    pub once: bool,

    /// Fetch and compare, but send nothing and keep the state file untouched
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

// token 與 API key 只顯示是否有設定
fn redacted(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "<redacted>")
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("config", &self.config)
            .field("url", &self.url)
            .field("section_heading", &self.section_heading)
            .field("check_interval", &self.check_interval)
            .field("hash_file", &self.hash_file)
            .field("telegram_bot_token", &redacted(&self.telegram_bot_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("brevo_api_key", &redacted(&self.brevo_api_key))
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("mail_to", &self.mail_to)
            .field("once", &self.once)
            .field("dry_run", &self.dry_run)
            .field("verbose", &self.verbose)
            .field("log_format", &self.log_format)
            .finish()
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl CliConfig {
    pub fn resolve(&self) -> Result<WatcherConfig> {
        let mut config = match present(&self.config) {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                WatcherConfig::from_file(&path)?
            }
            None => WatcherConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut WatcherConfig) {
        if let Some(url) = present(&self.url) {
            config.target.url = url;
        }
        if let Some(heading) = present(&self.section_heading) {
            config.target.section_heading = heading;
        }
        if let Some(interval) = self.check_interval {
            config.schedule.check_interval_seconds = interval;
        }
        if let Some(hash_file) = present(&self.hash_file) {
            config.state.hash_file = hash_file;
        }

        if let Some(token) = present(&self.telegram_bot_token) {
            config.telegram.bot_token = Some(token);
        }
        if let Some(chat_id) = present(&self.telegram_chat_id) {
            config.telegram.chat_id = Some(chat_id);
        }

        if let Some(api_key) = present(&self.brevo_api_key) {
            config.email.api_key = Some(api_key);
        }
        if let Some(from_email) = present(&self.from_email) {
            config.email.from_email = Some(from_email);
        }
        if let Some(from_name) = present(&self.from_name) {
            config.email.from_name = from_name;
        }
        if let Some(mail_to) = present(&self.mail_to) {
            config.email.to = parse_recipients(&mail_to);
        }
    }
}
