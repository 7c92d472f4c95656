//! Configuration management.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use orbit::Settings;
use orbit_recon::ResolverPreset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Filtering policy
    #[serde(flatten)]
    pub settings: Settings,

    /// Upstream resolver
    pub resolver: ResolverPreset,

    /// Run WHOIS enrichment of untracked addresses.
    pub whois: bool,

    /// Alternative WHOIS server list (whois-servers JSON format)
    pub whois_servers: Option<PathBuf>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            resolver: ResolverPreset::default(),
            whois: true,
            whois_servers: None,
            output_format: None,
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "orbit")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `explicit`, else the default path.
    ///
    /// A missing default file yields defaults; a missing explicit file is an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse TOML configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if !cli.keywords.is_empty() {
            self.settings.allowed_keywords.clone_from(&cli.keywords);
        }
        if let Some(resolver) = cli.resolver {
            self.resolver = resolver;
        }
        if cli.no_whois {
            self.whois = false;
        }
        if cli.output.is_some() {
            self.output_format = cli.output;
        }
        self
    }
}
