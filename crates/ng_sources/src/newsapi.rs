use async_trait::async_trait;
use ng_core::{Error, HeadlineSource, RawArticle, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

/// Name of the environment variable holding the fallback API key.
pub const API_KEY_ENV: &str = "NEWSAPI_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the news provider. The key here is the
/// fallback used when a call does not carry its own.
#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    pub api_key: Option<String>,
    pub base_url: Url,
    pub timeout: Duration,
}

impl NewsApiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Read the fallback key from the `NEWSAPI_KEY` environment variable.
    pub fn from_env() -> Self {
        Self::new(env::var(API_KEY_ENV).ok())
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Client for the provider's top-headlines endpoint.
pub struct NewsApiClient {
    http: Client,
    config: NewsApiConfig,
}

impl NewsApiClient {
    pub fn new(config: NewsApiConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(NewsApiConfig::from_env())
    }

    /// An explicit key wins over the configured one; with neither, the
    /// call fails before any network I/O.
    fn resolve_key(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .map(str::to_owned)
            .or_else(|| self.config.api_key.clone())
            .ok_or(Error::MissingApiKey)
    }
}

#[async_trait]
impl HeadlineSource for NewsApiClient {
    async fn top_headlines(
        &self,
        api_key: Option<&str>,
        category: &str,
        country: &str,
    ) -> Result<Vec<RawArticle>> {
        let key = self.resolve_key(api_key)?;
        let endpoint = self
            .config
            .base_url
            .join("top-headlines")
            .map_err(|e| Error::External(anyhow::anyhow!("invalid endpoint url: {}", e)))?;

        let response = self
            .http
            .get(endpoint)
            .query(&[
                ("apiKey", key.as_str()),
                ("category", category),
                ("country", country),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Pass the provider's structured error through when it parses.
            let detail = serde_json::from_str::<Value>(&body)
                .map(|v| v.to_string())
                .unwrap_or(body);
            return Err(Error::Upstream(format!("{}: {}", status, detail)));
        }

        let payload: HeadlinesResponse =
            serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;

        Ok(payload
            .articles
            .into_iter()
            .map(ProviderArticle::normalize)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<ProviderArticle>,
}

#[derive(Debug, Deserialize)]
struct ProviderArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "publishedAt", default)]
    published_at: Option<String>,
    #[serde(default)]
    source: Option<ProviderSource>,
}

/// The provider documents `source` as an `{id, name}` object, but some
/// payloads carry a bare string. Anything else is rendered as raw JSON.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderSource {
    Named {
        #[serde(default)]
        name: Option<String>,
    },
    Plain(String),
    Other(Value),
}

impl ProviderSource {
    fn into_name(self) -> String {
        match self {
            ProviderSource::Named { name } => name.unwrap_or_default(),
            ProviderSource::Plain(name) => name,
            ProviderSource::Other(value) => value.to_string(),
        }
    }
}

impl ProviderArticle {
    fn normalize(self) -> RawArticle {
        RawArticle {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            published_at: self.published_at.unwrap_or_default(),
            source: self.source.map(ProviderSource::into_name).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = NewsApiClient::new(NewsApiConfig::new(None)).unwrap();
        let err = client
            .top_headlines(None, "business", "us")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[test]
    fn normalizes_source_object() {
        let payload = r#"{"articles": [{"title": "T", "description": "D",
            "url": "https://example.com", "publishedAt": "2024-01-01T00:00:00Z",
            "source": {"id": "ex", "name": "Example"}}]}"#;
        let parsed: HeadlinesResponse = serde_json::from_str(payload).unwrap();
        let article = parsed.articles.into_iter().next().unwrap().normalize();
        assert_eq!(article.source, "Example");
        assert_eq!(article.published_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn normalizes_source_string() {
        let payload = r#"{"articles": [{"title": "T", "url": "u", "source": "Plain Wire"}]}"#;
        let parsed: HeadlinesResponse = serde_json::from_str(payload).unwrap();
        let article = parsed.articles.into_iter().next().unwrap().normalize();
        assert_eq!(article.source, "Plain Wire");
        // Absent fields default to empty strings.
        assert_eq!(article.description, "");
        assert_eq!(article.published_at, "");
    }

    #[test]
    fn unrecognized_source_shape_falls_back_to_json_text() {
        let payload = r#"{"articles": [{"title": "T", "source": 42}]}"#;
        let parsed: HeadlinesResponse = serde_json::from_str(payload).unwrap();
        let article = parsed.articles.into_iter().next().unwrap().normalize();
        assert_eq!(article.source, "42");
    }

    #[test]
    fn null_or_nameless_source_is_empty() {
        let payload = r#"{"articles": [
            {"title": "A", "source": null},
            {"title": "B", "source": {"id": "x"}}
        ]}"#;
        let parsed: HeadlinesResponse = serde_json::from_str(payload).unwrap();
        let articles: Vec<RawArticle> = parsed
            .articles
            .into_iter()
            .map(ProviderArticle::normalize)
            .collect();
        assert_eq!(articles[0].source, "");
        assert_eq!(articles[1].source, "");
    }

    #[test]
    fn missing_article_list_is_empty_not_an_error() {
        let parsed: HeadlinesResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(parsed.articles.is_empty());
    }
}
