use std::path::Path;
use thiserror::Error;

/// Result type alias for orbit operations
pub type Result<T> = std::result::Result<T, OrbitError>;

/// Errors that can occur while building an assessment
#[derive(Error, Debug)]
pub enum OrbitError {
    /// Input file could not be opened or read
    #[error("unable to read {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Mandatory input has no usable content
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Origin line does not carry an origin token
    #[error("{path}:{line}: origin line has no origin")]
    MissingOrigin {
        /// Zone file
        path: String,
        /// 1-based line number
        line: usize,
    },

    /// TTL field is not a non-negative integer
    #[error("{path}:{line}: invalid TTL {value:?}")]
    InvalidTtl {
        /// Zone file
        path: String,
        /// 1-based line number
        line: usize,
        /// Offending token
        value: String,
    },

    /// Record line has too few fields
    #[error("{path}:{line}: malformed record: {reason}")]
    MalformedRecord {
        /// Zone file
        path: String,
        /// 1-based line number
        line: usize,
        /// What is missing
        reason: String,
    },

    /// Path is neither a regular file nor a directory
    #[error("invalid zone path: {0}")]
    InvalidPath(String),

    /// Directory held no parseable zone files
    #[error("no zone files parsed from {0}")]
    NoZoneFiles(String),

    /// Invalid IP address format
    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// WHOIS lookup failed
    #[error("WHOIS lookup failed: {0}")]
    Whois(String),
}

impl OrbitError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Returns true if the error must abort the run.
    ///
    /// Enrichment failures (live DNS and WHOIS queries) are recoverable:
    /// the affected item is skipped and the pipeline moves on.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Dns(_) | Self::Whois(_))
    }
}
