//! Repository summary projection of provider data.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Read-only metadata describing one hosted repository.
///
/// Deserialized directly from the provider's repository JSON; unknown
/// fields are ignored. Never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySummary {
    /// `owner/name`.
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub stargazers_count: u64,
    /// Canonical browser URL; this is what the copy action puts on the clipboard.
    pub html_url: String,
}

impl RepositorySummary {
    /// Minimal summary with every optional field empty.
    pub fn new(full_name: impl Into<String>, html_url: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            description: None,
            created_at: None,
            pushed_at: None,
            homepage: None,
            language: None,
            forks_count: 0,
            stargazers_count: 0,
            html_url: html_url.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stargazers_count = stars;
        self
    }

    pub fn with_forks(mut self, forks: u64) -> Self {
        self.forks_count = forks;
        self
    }

    /// Detail fields as `(label, value)` pairs in display order.
    ///
    /// Missing optional values render as `None`.
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        fn or_none(value: Option<&str>) -> String {
            match value {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => "None".to_string(),
            }
        }
        fn timestamp(value: Option<DateTime<Utc>>) -> String {
            value
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "None".to_string())
        }

        vec![
            ("Full name", self.full_name.clone()),
            ("Description", or_none(self.description.as_deref())),
            ("Date created", timestamp(self.created_at)),
            ("Date of last push", timestamp(self.pushed_at)),
            ("Home Page", or_none(self.homepage.as_deref())),
            ("Language", or_none(self.language.as_deref())),
            ("Number of forks", self.forks_count.to_string()),
            ("Number of stars", self.stargazers_count.to_string()),
            ("URL", self.html_url.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 1,
        "full_name": "hashicorp/raft",
        "description": "Golang implementation of the Raft consensus protocol",
        "created_at": "2013-11-07T20:22:36Z",
        "pushed_at": "2024-05-01T10:00:00Z",
        "homepage": "",
        "language": "Go",
        "forks": 1000,
        "forks_count": 1000,
        "stargazers_count": 8000,
        "html_url": "https://github.com/hashicorp/raft",
        "owner": { "login": "hashicorp" }
    }"#;

    #[test]
    fn decodes_provider_json() {
        let repo: RepositorySummary = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(repo.full_name, "hashicorp/raft");
        assert_eq!(repo.language.as_deref(), Some("Go"));
        assert_eq!(repo.forks_count, 1000);
        assert_eq!(repo.stargazers_count, 8000);
        assert_eq!(repo.html_url, "https://github.com/hashicorp/raft");
        assert!(repo.created_at.is_some());
    }

    #[test]
    fn null_optionals_decode() {
        let json = r#"{
            "full_name": "a/b",
            "description": null,
            "pushed_at": null,
            "homepage": null,
            "language": null,
            "html_url": "https://github.com/a/b"
        }"#;
        let repo: RepositorySummary = serde_json::from_str(json).unwrap();
        assert_eq!(repo.description, None);
        assert_eq!(repo.stargazers_count, 0);
    }

    #[test]
    fn detail_fields_render_missing_values_as_none() {
        let repo = RepositorySummary::new("a/b", "https://github.com/a/b");
        let fields = repo.detail_fields();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[0], ("Full name", "a/b".to_string()));
        assert_eq!(fields[1], ("Description", "None".to_string()));
        assert_eq!(fields[8], ("URL", "https://github.com/a/b".to_string()));
    }

    #[test]
    fn empty_homepage_renders_as_none() {
        let repo: RepositorySummary = serde_json::from_str(SAMPLE).unwrap();
        let homepage = repo
            .detail_fields()
            .into_iter()
            .find(|(label, _)| *label == "Home Page")
            .map(|(_, value)| value);
        assert_eq!(homepage.as_deref(), Some("None"));
    }
}
