use crate::adapters::http::DEFAULT_USER_AGENT;
use crate::adapters::notify::brevo::{DEFAULT_BREVO_API, DEFAULT_SENDER_NAME};
use crate::adapters::notify::telegram::DEFAULT_TELEGRAM_API;
use crate::core::extract::DEFAULT_SECTION_HEADING;
use crate::core::Channel;
use crate::utils::error::{Result, WatchError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_URL: &str = "https://www.olg-hamm.nrw.de/aufgaben/geschaeftsverteilung/verwaltung/dez05/10_sammlung/aktuelle_informationen/index.php";
pub const DEFAULT_CHECK_INTERVAL_SECONDS: u64 = 900;
pub const DEFAULT_HASH_FILE: &str = "./hashes.txt";

const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    pub target: TargetConfig,
    pub schedule: ScheduleConfig,
    pub state: StateConfig,
    pub telegram: TelegramConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub url: String,
    pub section_heading: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            section_heading: DEFAULT_SECTION_HEADING.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub check_interval_seconds: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            check_interval_seconds: DEFAULT_CHECK_INTERVAL_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub hash_file: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            hash_file: DEFAULT_HASH_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base: String,
    pub timeout_seconds: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: DEFAULT_TELEGRAM_API.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl TelegramConfig {
    /// Telegram 需要 token 與 chat id 同時存在
    pub fn is_configured(&self) -> bool {
        is_set(&self.bot_token) && is_set(&self.chat_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    pub from_email: Option<String>,
    pub from_name: String,
    pub to: Vec<String>,
    pub api_base: String,
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_email: None,
            from_name: DEFAULT_SENDER_NAME.to_string(),
            to: Vec::new(),
            api_base: DEFAULT_BREVO_API.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        is_set(&self.api_key) && is_set(&self.from_email) && !self.to.is_empty()
    }

    /// Some but not all of the Brevo settings are present.
    pub fn is_partial(&self) -> bool {
        let any = is_set(&self.api_key) || is_set(&self.from_email) || !self.to.is_empty();
        any && !self.is_configured()
    }
}

/// Blank values and `${VAR}` placeholders whose variable was never set count as missing.
fn is_set(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).is_some_and(|v| {
        let unresolved = v.starts_with("${") && v.ends_with('}');
        !v.is_empty() && !unresolved
    })
}

impl WatcherConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| WatchError::config("toml_parsing", format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${TELEGRAM_BOT_TOKEN})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| WatchError::config("env_substitution", e.to_string()))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("target.url", &self.target.url)?;
        validation::validate_non_empty_string("target.section_heading", &self.target.section_heading)?;
        validation::validate_non_empty_string("target.user_agent", &self.target.user_agent)?;
        validation::validate_range("target.timeout_seconds", self.target.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;

        validation::validate_positive_number(
            "schedule.check_interval_seconds",
            self.schedule.check_interval_seconds,
            1,
        )?;

        validation::validate_path("state.hash_file", &self.state.hash_file)?;

        if self.telegram.is_configured() {
            validation::validate_url("telegram.api_base", &self.telegram.api_base)?;
            validation::validate_range(
                "telegram.timeout_seconds",
                self.telegram.timeout_seconds,
                1,
                MAX_TIMEOUT_SECONDS,
            )?;
        }

        if self.email.is_configured() {
            validation::validate_url("email.api_base", &self.email.api_base)?;
            let from = validation::validate_required_field("email.from_email", &self.email.from_email)?;
            validation::validate_email("email.from_email", from)?;
            for recipient in &self.email.to {
                validation::validate_email("email.to", recipient)?;
            }
            validation::validate_range(
                "email.timeout_seconds",
                self.email.timeout_seconds,
                1,
                MAX_TIMEOUT_SECONDS,
            )?;
        }

        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.schedule.check_interval_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.target.timeout_seconds)
    }

    /// 已設定的通知通道，依發送順序排列
    pub fn channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if self.telegram.is_configured() {
            channels.push(Channel::Telegram);
        }
        if self.email.is_configured() {
            channels.push(Channel::Email);
        }
        channels
    }
}

impl Validate for WatcherConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_watch_olg_hamm_page() {
        let config = WatcherConfig::default();

        assert_eq!(config.target.url, DEFAULT_URL);
        assert_eq!(config.check_interval(), Duration::from_secs(900));
        assert_eq!(config.state.hash_file, "./hashes.txt");
        assert_eq!(config.email.from_name, "OLG Watcher");
        assert!(config.channels().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[target]
url = "https://example.org/jobs/index.php"
section_heading = "Offene Stellen:"
timeout_seconds = 20

[schedule]
check_interval_seconds = 300

[state]
hash_file = "/data/hashes.txt"

[telegram]
bot_token = "123:abc"
chat_id = "-100"

[email]
api_key = "xkeysib"
from_email = "watcher@example.org"
to = ["a@example.org", "b@example.org"]
"#;

        let config = WatcherConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.target.section_heading, "Offene Stellen:");
        assert_eq!(config.target.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.check_interval(), Duration::from_secs(300));
        assert_eq!(config.channels(), vec![Channel::Telegram, Channel::Email]);
        assert_eq!(config.email.api_base, DEFAULT_BREVO_API);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("OLG_WATCHER_TEST_BOT_TOKEN", "999:secret");

        let toml_content = r#"
[telegram]
bot_token = "${OLG_WATCHER_TEST_BOT_TOKEN}"
chat_id = "${OLG_WATCHER_TEST_UNSET_CHAT}"
"#;

        let config = WatcherConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.telegram.bot_token.as_deref(), Some("999:secret"));
        assert_eq!(
            config.telegram.chat_id.as_deref(),
            Some("${OLG_WATCHER_TEST_UNSET_CHAT}")
        );
        assert!(!config.telegram.is_configured());

        std::env::remove_var("OLG_WATCHER_TEST_BOT_TOKEN");
    }

    #[test]
    fn test_config_validation() {
        let mut config = WatcherConfig::default();
        config.target.url = "invalid-url".to_string();
        assert!(config.validate().is_err());

        let mut config = WatcherConfig::default();
        config.schedule.check_interval_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = WatcherConfig::default();
        config.target.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_email_validation_only_when_configured() {
        let mut config = WatcherConfig::default();
        config.email.from_email = Some("not-an-address".to_string());
        assert!(config.email.is_partial());
        assert!(config.validate().is_ok());

        config.email.api_key = Some("key".to_string());
        config.email.to = vec!["a@example.org".to_string()];
        assert!(config.email.is_configured());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_telegram_values_do_not_enable_channel() {
        let mut config = WatcherConfig::default();
        config.telegram.bot_token = Some("  ".to_string());
        config.telegram.chat_id = Some("1".to_string());
        assert!(!config.telegram.is_configured());
    }

    #[test]
    fn test_invalid_toml_value_is_config_error() {
        let err = WatcherConfig::from_toml_str("[schedule]\ncheck_interval_seconds = \"soon\"").unwrap_err();
        assert!(matches!(err, WatchError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = WatcherConfig::from_toml_str(include_str!("../../watcher.example.toml")).unwrap();

        assert_eq!(config.target.url, DEFAULT_URL);
        assert_eq!(config.target.section_heading, DEFAULT_SECTION_HEADING);
        assert_eq!(config.state.hash_file, "/data/hashes.txt");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[state]
hash_file = "/tmp/olg/hashes.txt"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = WatcherConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.state.hash_file, "/tmp/olg/hashes.txt");
        assert_eq!(config.target.url, DEFAULT_URL);
    }
}
