use thiserror::Error;

/// Result type alias for live lookups
pub type ReconResult<T> = std::result::Result<T, ReconError>;

/// Errors from live DNS and WHOIS clients
#[derive(Error, Debug)]
pub enum ReconError {
    /// WHOIS lookup error
    #[error("WHOIS error: {0}")]
    Whois(String),

    /// DNS resolution error
    #[error("DNS error: {0}")]
    Dns(String),

    /// Resolver or server list could not be set up
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid IP address
    #[error("invalid IP address: {0}")]
    InvalidIp(String),
}

impl From<ReconError> for orbit_core::OrbitError {
    fn from(err: ReconError) -> Self {
        match err {
            ReconError::Whois(msg) => Self::Whois(msg),
            ReconError::Dns(msg) | ReconError::Config(msg) => Self::Dns(msg),
            ReconError::InvalidIp(ip) => Self::InvalidIp(ip),
        }
    }
}
