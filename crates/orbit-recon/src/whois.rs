//! WHOIS lookup integration using whois-rust.

use async_trait::async_trait;
use std::net::IpAddr;
use std::path::Path;
use tracing::debug;
use whois_rust::{WhoIs, WhoIsLookupOptions};

use crate::error::{ReconError, ReconResult};

/// WHOIS client
pub struct WhoisClient {
    whois: WhoIs,
}

impl WhoisClient {
    /// Create a client from the embedded server list
    pub fn new() -> ReconResult<Self> {
        let whois = WhoIs::from_string(include_str!("whois_servers.json"))
            .map_err(|e| ReconError::Config(format!("embedded WHOIS servers: {e}")))?;
        Ok(Self { whois })
    }

    /// Create a client from a JSON server list on disk
    pub fn from_path(path: &Path) -> ReconResult<Self> {
        let whois = WhoIs::from_path(path)
            .map_err(|e| ReconError::Config(format!("{}: {e}", path.display())))?;
        Ok(Self { whois })
    }

    /// Raw WHOIS response for an address.
    ///
    /// The query blocks the calling task until the server answers.
    pub fn lookup_ip(&self, ip: IpAddr) -> ReconResult<String> {
        let options = WhoIsLookupOptions::from_string(&ip.to_string())
            .map_err(|e| ReconError::InvalidIp(format!("{ip}: {e}")))?;
        debug!(%ip, "querying WHOIS");
        self.whois
            .lookup(options)
            .map_err(|e| ReconError::Whois(format!("{ip}: {e}")))
    }
}

#[async_trait]
impl orbit_core::WhoisLookup for WhoisClient {
    async fn whois(&self, ip: IpAddr) -> orbit_core::Result<String> {
        Ok(self.lookup_ip(ip)?)
    }
}
