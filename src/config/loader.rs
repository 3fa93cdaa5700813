//! Configuration file loading with precedence handling.

use crate::model::SearchMode;
use crate::source::RetryPolicy;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default GitHub API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Default name of the environment variable holding the access token.
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_ACCESS_TOKEN";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// The environment variable that should hold the access token is unset or empty.
    #[error("No access token: set the {var} environment variable")]
    MissingToken {
        /// Name of the variable that was consulted.
        var: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/ghscout/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// API root (e.g. a GitHub Enterprise endpoint).
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Entries per page, 1..=100.
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Startup mode: "search" or "owned".
    #[serde(default)]
    pub mode: Option<SearchMode>,

    /// Name of the environment variable holding the access token.
    #[serde(default)]
    pub token_env: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Whole-request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Rate-limit retry budget.
    #[serde(default)]
    pub retry: Option<RetrySection>,
}

/// `[retry]` table.
///
/// ```toml
/// [retry]
/// max_attempts = 5
/// base_delay_ms = 500
/// max_delay_ms = 8000
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub base_delay_ms: Option<u64>,
    #[serde(default)]
    pub max_delay_ms: Option<u64>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// API root, without trailing slash.
    pub api_base_url: String,
    /// Entries per page.
    pub per_page: u32,
    /// Startup mode.
    pub mode: SearchMode,
    /// Name of the environment variable holding the access token.
    pub token_env: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// Rate-limit retry budget.
    pub retry: RetryPolicy,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            per_page: 30,
            mode: SearchMode::Public,
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            log_file_path: default_log_path(),
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/ghscout/ghscout.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("ghscout").join("ghscout.log")
    } else {
        PathBuf::from("ghscout.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/ghscout/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ghscout").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `GHSCOUT_CONFIG` environment variable
/// 3. Default path `~/.config/ghscout/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("GHSCOUT_CONFIG") {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(
                "GHSCOUT_CONFIG is set but empty".to_string(),
            ));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `GHSCOUT_API_URL`: Override API root
/// - `GHSCOUT_MODE`: Override startup mode (unrecognized values are ignored)
pub fn apply_env_overrides(config: ResolvedConfig) -> ResolvedConfig {
    apply_env_overrides_from(config, |name| std::env::var(name).ok())
}

/// [`apply_env_overrides`] with an injectable variable lookup.
pub fn apply_env_overrides_from(
    mut config: ResolvedConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    if let Some(url) = lookup("GHSCOUT_API_URL").filter(|u| !u.trim().is_empty()) {
        config.api_base_url = normalize_base_url(&url);
    }

    if let Some(mode) = lookup("GHSCOUT_MODE").and_then(|m| SearchMode::parse(&m)) {
        config.mode = mode;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let retry = config.retry.unwrap_or_default();
    let default_retry = defaults.retry;

    ResolvedConfig {
        api_base_url: config
            .api_base_url
            .map(|url| normalize_base_url(&url))
            .unwrap_or(defaults.api_base_url),
        per_page: config
            .per_page
            .map(|n| n.clamp(1, 100))
            .unwrap_or(defaults.per_page),
        mode: config.mode.unwrap_or(defaults.mode),
        token_env: config.token_env.unwrap_or(defaults.token_env),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        request_timeout: config
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout),
        retry: RetryPolicy::new(
            retry.max_attempts.unwrap_or(default_retry.max_attempts),
            retry
                .base_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(default_retry.base_delay),
            retry
                .max_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(default_retry.max_delay),
        ),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, owned: bool) -> ResolvedConfig {
    if owned {
        config.mode = SearchMode::Owned;
    }
    config
}

/// Read the access token from the environment variable named in `config`.
///
/// # Errors
///
/// `MissingToken` if the variable is unset or blank.
pub fn resolve_token(config: &ResolvedConfig) -> Result<String, ConfigError> {
    resolve_token_from(config, |name| std::env::var(name).ok())
}

/// [`resolve_token`] with an injectable variable lookup.
pub fn resolve_token_from(
    config: &ResolvedConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    lookup(&config.token_env)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ConfigError::MissingToken {
            var: config.token_env.clone(),
        })
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
