use crate::core::PageSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Shared client for page fetches and notification calls; timeouts are set per request.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

pub struct HttpPageSource {
    client: Client,
    url: String,
    user_agent: String,
    timeout: Duration,
}

impl HttpPageSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String> {
        tracing::debug!("Making page request to: {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await?;

        tracing::debug!("Page response status: {}", response.status());
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_sends_browser_user_agent() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/aktuelle_informationen/index.php")
                .header("user-agent", DEFAULT_USER_AGENT);
            then.status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .body("<html><body>ok</body></html>");
        });

        let source = HttpPageSource::new(
            Client::new(),
            server.url("/aktuelle_informationen/index.php"),
        );
        let html = source.fetch().await.unwrap();

        page_mock.assert();
        assert_eq!(html, "<html><body>ok</body></html>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(503);
        });

        let source = HttpPageSource::new(Client::new(), server.url("/"));
        let err = source.fetch().await.unwrap_err();

        page_mock.assert();
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[tokio::test]
    async fn test_slow_page_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .body("late")
                .delay(Duration::from_millis(500));
        });

        let source = HttpPageSource::new(Client::new(), server.url("/"))
            .with_timeout(Duration::from_millis(50));
        let err = source.fetch().await.unwrap_err();

        assert!(err.recovery_suggestion().contains("timeout_seconds"));
    }
}
