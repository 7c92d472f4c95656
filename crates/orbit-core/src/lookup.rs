//! Live lookup seams.
//!
//! The pipeline talks to DNS and WHOIS only through these traits, which keeps
//! it testable without a network. `orbit-recon` provides the real clients.

use async_trait::async_trait;
use std::net::IpAddr;

use crate::error::Result;

/// DNS client used by the reconciler and the DNSSEC audit.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// Resolve a domain to its A/AAAA addresses.
    async fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>>;

    /// Resolve an address to its PTR names, without the trailing root dot.
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Vec<String>>;

    /// Query for delegation signer records.
    ///
    /// `Ok(false)` is a confirmed absence. Transport or server failures are
    /// errors, never `Ok(false)`.
    async fn has_delegation_signer(&self, domain: &str) -> Result<bool>;
}

/// WHOIS client returning the raw free-text response.
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    /// Look up the registration for an address.
    async fn whois(&self, ip: IpAddr) -> Result<String>;
}
