//! DNS resolution integration.

use async_trait::async_trait;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, TokioResolver};
use std::net::IpAddr;
use std::time::Instant;
use tracing::debug;

use crate::error::{ReconError, ReconResult};
use crate::preset::ResolverPreset;

/// DNS resolver
pub struct DnsResolver {
    resolver: TokioResolver,
}

impl DnsResolver {
    /// Create a resolver for the given upstream preset
    pub fn new(preset: ResolverPreset) -> ReconResult<Self> {
        let resolver = match preset {
            ResolverPreset::System => TokioResolver::builder_tokio()
                .map_err(|e| ReconError::Config(format!("failed to read system resolver: {e}")))?
                .build(),
            ResolverPreset::Google => Self::with_config(ResolverConfig::google()),
            ResolverPreset::Cloudflare => Self::with_config(ResolverConfig::cloudflare()),
            ResolverPreset::Quad9 => Self::with_config(ResolverConfig::quad9()),
        };
        debug!(%preset, "created DNS resolver");
        Ok(Self { resolver })
    }

    fn with_config(config: ResolverConfig) -> TokioResolver {
        TokioResolver::builder_with_config(config, TokioConnectionProvider::default()).build()
    }

    /// Resolve hostname to IP addresses
    pub async fn lookup(&self, hostname: &str) -> ReconResult<Vec<IpAddr>> {
        let start = Instant::now();

        let response = self
            .resolver
            .lookup_ip(absolute(hostname))
            .await
            .map_err(|e| ReconError::Dns(format!("{hostname}: {e}")))?;

        let addresses: Vec<IpAddr> = response.iter().collect();
        debug!(hostname, count = addresses.len(), elapsed = ?start.elapsed(), "resolved");
        Ok(addresses)
    }

    /// Reverse DNS lookup (IP to hostnames)
    pub async fn reverse(&self, ip: IpAddr) -> ReconResult<Vec<String>> {
        let start = Instant::now();

        let response = self
            .resolver
            .reverse_lookup(ip)
            .await
            .map_err(|e| ReconError::Dns(format!("{ip}: {e}")))?;

        let hostnames: Vec<String> = response
            .iter()
            .map(|n| n.to_string().trim_end_matches('.').to_string())
            .collect();
        debug!(%ip, count = hostnames.len(), elapsed = ?start.elapsed(), "reverse resolved");
        Ok(hostnames)
    }

    /// Check for DS records at the parent of `domain`.
    ///
    /// Only a NOERROR answer without DS records, or NXDOMAIN, is a
    /// confirmed `false`. SERVFAIL, REFUSED and transport failures are errors.
    pub async fn lookup_ds(&self, domain: &str) -> ReconResult<bool> {
        match self.resolver.lookup(absolute(domain), RecordType::DS).await {
            Ok(lookup) => Ok(lookup
                .record_iter()
                .any(|r| r.record_type() == RecordType::DS)),
            Err(e) if is_confirmed_absence(&e) => {
                debug!(domain, error = %e, "no DS records");
                Ok(false)
            }
            Err(e) => Err(ReconError::Dns(format!("{domain}: {e}"))),
        }
    }
}

/// Returns true if the server answered authoritatively that nothing exists.
fn is_confirmed_absence(err: &ResolveError) -> bool {
    err.proto().is_some_and(|proto| {
        matches!(
            proto.kind(),
            ProtoErrorKind::NoRecordsFound {
                response_code: ResponseCode::NoError | ResponseCode::NXDomain,
                ..
            }
        )
    })
}

/// Fully qualify a name so search domains are never appended.
fn absolute(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

#[async_trait]
impl orbit_core::DnsLookup for DnsResolver {
    async fn lookup_ip(&self, domain: &str) -> orbit_core::Result<Vec<IpAddr>> {
        Ok(self.lookup(domain).await?)
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> orbit_core::Result<Vec<String>> {
        Ok(self.reverse(ip).await?)
    }

    async fn has_delegation_signer(&self, domain: &str) -> orbit_core::Result<bool> {
        Ok(self.lookup_ds(domain).await?)
    }
}
