//! [`PageFetcher`] backed by the MediaWiki action API.
//!
//! Each fetch issues one `prop=extracts` request for the plain text, then
//! pages through `prop=links` (restricted to namespace 0) until the API stops
//! returning a `continue` block. Redirects are followed, and the links query
//! uses the resolved title.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{FetchError, PageContent, PageFetcher};

/// Namespace id of encyclopedic articles.
const ARTICLE_NAMESPACE: i64 = 0;

/// Upper bound on `continue` round-trips for a single page's links.
const MAX_LINK_BATCHES: usize = 64;

/// Connection settings for [`MediaWikiFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaWikiConfig {
    /// Wikipedia language edition, used when `api_url` is unset.
    #[serde(default = "default_language")]
    pub language: String,

    /// Full `api.php` endpoint; overrides `language`.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Sent as `User-Agent`; Wikimedia rejects anonymous clients.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    #[serde(default = "default_connect_timeout", with = "duration_secs")]
    pub connect_timeout: Duration,
}

impl Default for MediaWikiConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            api_url: None,
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl MediaWikiConfig {
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolved `api.php` endpoint.
    pub fn endpoint(&self) -> Result<String, FetchError> {
        if let Some(url) = self.api_url.as_deref() {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(FetchError::InvalidConfig(format!(
                    "api_url must be an http(s) URL, got '{url}'"
                )));
            }
            return Ok(url.to_string());
        }

        let lang = self.language.trim();
        if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(FetchError::InvalidConfig(format!(
                "invalid wiki language '{lang}'"
            )));
        }
        Ok(format!("https://{lang}.wikipedia.org/w/api.php"))
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_user_agent() -> String {
    format!(
        "wikicount/{} (https://github.com/wikicount/wikicount)",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// Fetches pages from a MediaWiki installation (Wikipedia by default).
///
/// Holds its own pooled HTTP client; clone the fetcher (or wrap it in an
/// `Arc`) to share it.
#[derive(Debug, Clone)]
pub struct MediaWikiFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl MediaWikiFetcher {
    pub fn new(config: &MediaWikiConfig) -> Result<Self, FetchError> {
        let endpoint = config.endpoint()?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(32)
            .build()
            .map_err(|e| FetchError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query(&self, params: &[(String, String)]) -> Result<ApiResponse, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(format!("invalid JSON response: {e}")))?;

        if let Some(err) = body.error {
            return Err(FetchError::Decode(format!("{}: {}", err.code, err.info)));
        }
        Ok(body)
    }

    async fn fetch_links(&self, title: &str) -> Result<Vec<String>, FetchError> {
        let mut links = Vec::new();
        let mut continuation: Option<Map<String, Value>> = None;

        for _ in 0..MAX_LINK_BATCHES {
            let mut params = base_params(title);
            params.push(("prop".into(), "links".into()));
            params.push(("plnamespace".into(), ARTICLE_NAMESPACE.to_string()));
            params.push(("pllimit".into(), "max".into()));
            if let Some(cont) = continuation.take() {
                params.extend(continue_params(cont));
            }

            let body = self.query(&params).await?;
            if let Some(page) = body.query.and_then(|q| q.pages.into_iter().next()) {
                links.extend(
                    page.links
                        .into_iter()
                        .filter(|link| link.ns == ARTICLE_NAMESPACE)
                        .map(|link| link.title),
                );
            }

            match body.continuation {
                Some(cont) if !cont.is_empty() => continuation = Some(cont),
                _ => return Ok(links),
            }
        }

        tracing::warn!(
            title,
            batches = MAX_LINK_BATCHES,
            "link listing truncated after max continuation batches"
        );
        Ok(links)
    }
}

#[async_trait]
impl PageFetcher for MediaWikiFetcher {
    async fn fetch(&self, title: &str) -> Result<PageContent, FetchError> {
        let mut params = base_params(title);
        params.push(("prop".into(), "extracts".into()));
        params.push(("explaintext".into(), "1".into()));

        let body = self.query(&params).await?;
        let page = body
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| FetchError::Decode("response has no pages".into()))?;

        if page.missing || page.invalid {
            return Ok(PageContent::missing());
        }

        let resolved = page.title.unwrap_or_else(|| title.to_string());
        let links = self.fetch_links(&resolved).await?;
        Ok(PageContent::new(page.extract.unwrap_or_default(), links))
    }
}

fn base_params(title: &str) -> Vec<(String, String)> {
    vec![
        ("action".into(), "query".into()),
        ("format".into(), "json".into()),
        ("formatversion".into(), "2".into()),
        ("redirects".into(), "1".into()),
        ("titles".into(), title.to_string()),
    ]
}

fn continue_params(cont: Map<String, Value>) -> impl Iterator<Item = (String, String)> {
    cont.into_iter().map(|(key, value)| {
        let value = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        (key, value)
    })
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<QueryBody>,
    #[serde(default, rename = "continue")]
    continuation: Option<Map<String, Value>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    links: Vec<ApiLink>,
}

#[derive(Debug, Deserialize)]
struct ApiLink {
    ns: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}
