//! Network utilities

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use crate::config::UserConfig;
use crate::error::FetchError;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Placeholder replaced by the percent-encoded target in endpoint templates
pub const URL_PLACEHOLDER: &str = "{url}";

/// Body and declared content type of a fetched resource
#[derive(Debug, Clone, Default)]
pub struct FetchedResource {
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchedResource {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("image"))
            .unwrap_or(false)
    }

    /// Body as text, invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Anything that can GET a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError>;
}

/// `reqwest`-backed fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(USER_AGENT))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &UserConfig) -> Result<Self, FetchError> {
        let user_agent = (!config.user_agent.is_empty()).then_some(config.user_agent.as_str());
        Self::new(Duration::from_secs(config.request_timeout_secs), user_agent)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.bytes().await?;

        Ok(FetchedResource { content_type, body })
    }
}

/// Fill an endpoint template with the percent-encoded target URL.
///
/// Templates without the placeholder get the encoded target appended.
pub fn fill_template(template: &str, target: &str) -> String {
    let encoded = urlencoding::encode(target);
    if template.contains(URL_PLACEHOLDER) {
        template.replace(URL_PLACEHOLDER, &encoded)
    } else {
        format!("{}{}", template, encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template() {
        assert_eq!(
            fill_template("https://corsproxy.io/?{url}", "https://a.com/x.png?s=1&t=2"),
            "https://corsproxy.io/?https%3A%2F%2Fa.com%2Fx.png%3Fs%3D1%26t%3D2"
        );
        assert_eq!(
            fill_template("https://relay.test/raw?url=", "https://a.com"),
            "https://relay.test/raw?url=https%3A%2F%2Fa.com"
        );
    }

    #[test]
    fn test_is_image() {
        let png = FetchedResource {
            content_type: Some("Image/PNG".to_string()),
            body: Bytes::new(),
        };
        assert!(png.is_image());

        let html = FetchedResource {
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: Bytes::from_static(b"<p>hi</p>"),
        };
        assert!(!html.is_image());
        assert_eq!(html.text(), "<p>hi</p>");

        assert!(!FetchedResource::default().is_image());
    }

    #[test]
    fn test_http_fetcher_builds() {
        let fetcher = HttpFetcher::from_config(&UserConfig::default());
        assert!(fetcher.is_ok());
    }
}
