//! GitHub REST repository source (blocking).
//!
//! Public mode pages through `/search/repositories`; owned mode pages
//! through `/user/repos`. The provider's pages are 1-based on the wire.

use super::RepositorySource;
use crate::model::{FetchError, PageRequest, RepositorySummary, SearchMode};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`GitHubClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubSettings {
    /// API root, e.g. `https://api.github.com`.
    pub base_url: String,
    /// Personal access token sent as a bearer credential.
    pub token: String,
    /// Entries per page.
    pub per_page: u32,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// Blocking GitHub API client implementing [`RepositorySource`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: String,
    per_page: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RepositorySummary>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GitHubClient {
    /// Build a client from settings.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be built
    /// (e.g. TLS backend initialization failure).
    pub fn new(settings: &GitHubSettings) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("ghscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            per_page: settings.per_page.clamp(1, 100),
        })
    }

    fn endpoint(&self, mode: SearchMode) -> String {
        match mode {
            SearchMode::Public => format!("{}/search/repositories", self.base_url),
            SearchMode::Owned => format!("{}/user/repos", self.base_url),
        }
    }
}

impl RepositorySource for GitHubClient {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<RepositorySummary>, FetchError> {
        let mut params = vec![
            ("page", (u64::from(request.page.get()) + 1).to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if request.mode == SearchMode::Public {
            params.push(("q", request.query.as_str().to_string()));
        }

        debug!(mode = ?request.mode, query = %request.query, page = request.page.get(), "GET page");

        let response = self
            .http
            .get(self.endpoint(request.mode))
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .query(&params)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let remaining = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.text().unwrap_or_default();
            return Err(classify_failure(
                status.as_u16(),
                remaining.as_deref(),
                &body,
                request.page.get(),
            ));
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        decode_page(request.mode, &body)
    }
}

/// Map a non-success response onto the fetch error taxonomy.
pub fn classify_failure(
    status: u16,
    rate_limit_remaining: Option<&str>,
    body: &str,
    page: u32,
) -> FetchError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_default();
    let mentions_rate_limit = message.to_ascii_lowercase().contains("rate limit");

    match status {
        429 => FetchError::RateLimited { attempts: 1 },
        403 if rate_limit_remaining == Some("0") || mentions_rate_limit => {
            FetchError::RateLimited { attempts: 1 }
        }
        422 => FetchError::OutOfRange { page },
        _ => FetchError::Http { status, message },
    }
}

/// Decode a successful page body for the given mode.
pub fn decode_page(mode: SearchMode, body: &str) -> Result<Vec<RepositorySummary>, FetchError> {
    let decoded = match mode {
        SearchMode::Public => serde_json::from_str::<SearchResponse>(body).map(|r| r.items),
        SearchMode::Owned => serde_json::from_str::<Vec<RepositorySummary>>(body),
    };
    decoded.map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = r#"{"full_name":"a/raft","html_url":"https://github.com/a/raft","stargazers_count":3}"#;

    #[test]
    fn too_many_requests_is_rate_limited() {
        assert!(classify_failure(429, None, "", 0).is_rate_limited());
    }

    #[test]
    fn forbidden_with_exhausted_quota_is_rate_limited() {
        assert!(classify_failure(403, Some("0"), "", 0).is_rate_limited());
    }

    #[test]
    fn forbidden_mentioning_rate_limit_is_rate_limited() {
        let body = r#"{"message":"API rate limit exceeded for user ID 1."}"#;
        assert!(classify_failure(403, Some("12"), body, 0).is_rate_limited());
    }

    #[test]
    fn plain_forbidden_is_http_error() {
        let body = r#"{"message":"Resource not accessible"}"#;
        assert_eq!(
            classify_failure(403, Some("4999"), body, 0),
            FetchError::Http {
                status: 403,
                message: "Resource not accessible".to_string()
            }
        );
    }

    #[test]
    fn unprocessable_is_out_of_range() {
        let body = r#"{"message":"Only the first 1000 search results are available"}"#;
        assert_eq!(
            classify_failure(422, None, body, 34),
            FetchError::OutOfRange { page: 34 }
        );
    }

    #[test]
    fn decodes_search_envelope() {
        let body = format!(r#"{{"total_count":1,"incomplete_results":false,"items":[{ITEM}]}}"#);
        let page = decode_page(SearchMode::Public, &body).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].stargazers_count, 3);
    }

    #[test]
    fn decodes_owned_array() {
        let body = format!("[{ITEM},{ITEM}]");
        assert_eq!(decode_page(SearchMode::Owned, &body).unwrap().len(), 2);
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(
            decode_page(SearchMode::Owned, "{not json"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn client_builds_and_trims_base_url() {
        let client = GitHubClient::new(&GitHubSettings {
            base_url: "https://api.github.com/".to_string(),
            token: "t".to_string(),
            per_page: 500,
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        assert_eq!(
            client.endpoint(SearchMode::Public),
            "https://api.github.com/search/repositories"
        );
        assert_eq!(client.per_page, 100);
    }
}
