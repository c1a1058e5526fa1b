//! Precompiled patterns shared by the matching heuristics.

use regex::bytes::Regex as BytesRegex;
use regex::Regex;
use thiserror::Error;

use crate::domain::models::PatternConfig;

/// A configured pattern failed to compile.
#[derive(Debug, Error)]
#[error("invalid pattern \"{pattern}\": {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Compiled form of [`PatternConfig`].
///
/// Built once per evaluator; heuristics only borrow it.
#[derive(Debug, Clone)]
pub struct Matchers {
    references: Vec<BytesRegex>,
    action: BytesRegex,
    pr_label: Regex,
}

impl Matchers {
    pub fn from_config(config: &PatternConfig) -> Result<Self, PatternError> {
        let references = config
            .references
            .iter()
            .map(|p| compile_bytes(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            references,
            action: compile_bytes(&config.action)?,
            pr_label: Regex::new(&config.pr_label).map_err(|source| PatternError {
                pattern: config.pr_label.clone(),
                source,
            })?,
        })
    }

    /// Whether document content mentions a CLA. Patterns are tried in order.
    pub fn references_cla(&self, content: &[u8]) -> bool {
        self.references.iter().any(|re| re.is_match(content))
    }

    /// Whether a workflow file uses the cla-assistant action.
    pub fn uses_cla_action(&self, content: &[u8]) -> bool {
        self.action.is_match(content)
    }

    /// Whether a pull request label is CLA tagging.
    pub fn is_cla_label(&self, name: &str) -> bool {
        self.pr_label.is_match(name)
    }
}

impl Default for Matchers {
    fn default() -> Self {
        Self::from_config(&PatternConfig::default()).expect("built-in patterns compile")
    }
}

fn compile_bytes(pattern: &str) -> Result<BytesRegex, PatternError> {
    BytesRegex::new(pattern).map_err(|source| PatternError {
        pattern: pattern.to_string(),
        source,
    })
}
