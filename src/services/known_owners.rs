//! Organisations publicly known to require a CLA.

use std::collections::HashSet;

use crate::domain::models::KnownOwnersConfig;

/// See <https://en.wikipedia.org/wiki/Contributor_License_Agreement#Users>.
const BUILTIN_OWNERS: &[&str] = &[
    "dotnet",
    "apache",
    "canonical",
    "clojure",
    "cncf",
    "diaspora",
    "discourse",
    "django",
    "dojo",
    "ebay",
    "eclipse",
    "elastic",
    "facebook",
    "golang",
    "google",
    "hashicorp",
    "influxdata",
    "joomla",
    "jquery",
    "kubernetes",
    "openbmc",
    "python",
    "meteor",
    "microsoft",
    "musescore",
    "openmediavault",
    "puppetlabs",
    "salesforce",
];

/// Immutable owner lookup set. Comparison is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownOwners {
    owners: HashSet<String>,
}

impl KnownOwners {
    /// The built-in list.
    pub fn builtin() -> Self {
        Self::from_iter(BUILTIN_OWNERS.iter().copied())
    }

    pub fn from_config(config: &KnownOwnersConfig) -> Self {
        let mut owners = if config.use_builtin {
            Self::builtin()
        } else {
            Self::default()
        };
        owners
            .owners
            .extend(config.extra.iter().filter(|o| !o.is_empty()).cloned());
        owners
    }

    pub fn contains(&self, owner: &str) -> bool {
        self.owners.contains(owner)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownOwners {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            owners: iter.into_iter().map(Into::into).collect(),
        }
    }
}
