//! Upstream resolver selection.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which upstream servers the DNS client queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverPreset {
    /// System configuration (`/etc/resolv.conf` or platform equivalent)
    #[default]
    System,
    /// Google Public DNS
    Google,
    /// Cloudflare 1.1.1.1
    Cloudflare,
    /// Quad9
    Quad9,
}

impl FromStr for ResolverPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Self::System),
            "google" => Ok(Self::Google),
            "cloudflare" => Ok(Self::Cloudflare),
            "quad9" => Ok(Self::Quad9),
            _ => Err(format!(
                "unknown resolver: {s} (valid: system, google, cloudflare, quad9)"
            )),
        }
    }
}

impl std::fmt::Display for ResolverPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Google => write!(f, "google"),
            Self::Cloudflare => write!(f, "cloudflare"),
            Self::Quad9 => write!(f, "quad9"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preset() {
        assert_eq!("Google".parse::<ResolverPreset>(), Ok(ResolverPreset::Google));
        assert_eq!("quad9".parse::<ResolverPreset>(), Ok(ResolverPreset::Quad9));
        assert!("opendns".parse::<ResolverPreset>().is_err());
        assert_eq!(ResolverPreset::default().to_string(), "system");
    }
}
