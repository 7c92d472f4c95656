//! Tunable policy for one run.

use serde::{Deserialize, Serialize};

/// Filtering policy applied by the alias resolver and the reconciler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keywords a reverse-lookup name must contain to be considered.
    /// An empty list accepts every name.
    pub allowed_keywords: Vec<String>,

    /// CNAME targets ending with any of these are internal plumbing.
    pub alias_suffixes: Vec<String>,

    /// Minimum dot-separated labels a CNAME target needs to survive.
    pub min_alias_labels: usize,

    /// Extension marking zone files when a directory is given.
    pub zone_extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allowed_keywords: ["money", "fx", "ttt", "novo", "explore", "currency"]
                .into_iter()
                .map(String::from)
                .collect(),
            alias_suffixes: vec![String::from(".gtm")],
            min_alias_labels: 3,
            zone_extension: String::from(orbit_core::zones::ZONE_EXTENSION),
        }
    }
}

impl Settings {
    /// Returns true if a reverse-lookup name passes the keyword allow-list.
    #[must_use]
    pub fn is_allowed_name(&self, name: &str) -> bool {
        let keywords: Vec<&str> = self
            .allowed_keywords
            .iter()
            .map(String::as_str)
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return true;
        }
        let name = name.to_ascii_lowercase();
        keywords
            .iter()
            .any(|k| name.contains(k.to_ascii_lowercase().as_str()))
    }

    /// Returns true if a CNAME target survives the noise filter.
    #[must_use]
    pub fn is_meaningful_alias(&self, target: &str) -> bool {
        let lower = target.to_ascii_lowercase();
        let internal = self
            .alias_suffixes
            .iter()
            .filter(|s| !s.is_empty())
            .any(|s| lower.ends_with(s.to_ascii_lowercase().as_str()));
        let labels = target.split('.').filter(|l| !l.is_empty()).count();
        !internal && labels >= self.min_alias_labels
    }
}
