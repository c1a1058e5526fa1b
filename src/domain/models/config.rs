use serde::{Deserialize, Serialize};

use crate::domain::models::report::RequiredPolicy;

/// Main configuration structure for need-cla
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// GitHub API access
    #[serde(default)]
    pub github: GitHubConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Patterns the heuristics match against
    #[serde(default)]
    pub patterns: PatternConfig,

    /// Organisations treated as known CLA requirers
    #[serde(default)]
    pub known_owners: KnownOwnersConfig,

    /// How signals combine into the final verdict
    #[serde(default)]
    pub policy: RequiredPolicy,
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// Personal access token; unauthenticated requests are used when absent
    #[serde(default)]
    pub token: Option<String>,

    /// Base URL of the REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pull requests sampled by the label heuristic (1-100)
    #[serde(default = "default_pr_page_size")]
    pub pr_page_size: u8,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_pr_page_size() -> u8 {
    100
}

fn default_user_agent() -> String {
    format!("need-cla/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            pr_page_size: default_pr_page_size(),
            user_agent: default_user_agent(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation for file output (daily, hourly, never)
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "never".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Regular expressions used by the matching heuristics.
///
/// Matching is case-sensitive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct PatternConfig {
    /// Tried in order against CONTRIBUTING.md and README.md
    #[serde(default = "default_reference_patterns")]
    pub references: Vec<String>,

    /// Workflow step using the cla-assistant action
    #[serde(default = "default_action_pattern")]
    pub action: String,

    /// Pull request label such as `cla: yes`
    #[serde(default = "default_pr_label_pattern")]
    pub pr_label: String,
}

fn default_reference_patterns() -> Vec<String> {
    vec![
        r"\bCLA\b".to_string(),
        "Contributor License Agreement".to_string(),
    ]
}

fn default_action_pattern() -> String {
    "uses:[[:space:]]*cla-assistant/github-action".to_string()
}

fn default_pr_label_pattern() -> String {
    "cla:[[:space:]]*(?:yes|no)".to_string()
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            references: default_reference_patterns(),
            action: default_action_pattern(),
            pr_label: default_pr_label_pattern(),
        }
    }
}

/// Known-owner list configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct KnownOwnersConfig {
    /// Include the built-in list of organisations
    #[serde(default = "default_use_builtin")]
    pub use_builtin: bool,

    /// Additional owners
    #[serde(default)]
    pub extra: Vec<String>,
}

const fn default_use_builtin() -> bool {
    true
}

impl Default for KnownOwnersConfig {
    fn default() -> Self {
        Self {
            use_builtin: default_use_builtin(),
            extra: Vec::new(),
        }
    }
}
