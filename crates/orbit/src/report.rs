//! Final report assembly with WHOIS enrichment.

use chrono::{DateTime, Utc};
use orbit_core::{Assessment, UntrackedDomains, WhoisRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::net::IpAddr;
use tracing::debug;

use crate::context::Pipeline;

/// Organisation shown when WHOIS is disabled, fails or rejects the query
pub const UNKNOWN_WHOIS: &str = "Unknown WHOIS";

/// One untracked address with the known domain that resolved to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UntrackedIpRow {
    /// Resolved address missing from the tracked pool
    pub address: IpAddr,
    /// Domain whose forward lookup returned it
    pub domain: String,
    /// WHOIS organisation, or `Unknown WHOIS`
    pub organisation: String,
}

/// Everything one run reports, in output order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,

    /// Known domains followed by alias targets
    pub potential_domains: Vec<String>,

    /// One row per (domain, address) pair outside the tracked pool
    pub untracked_ips: Vec<UntrackedIpRow>,

    /// Zone origins with a confirmed absence of DS records
    pub missing_dnssec: Vec<String>,

    /// Allowed reverse-DNS names not yet known, with the addresses that produced them
    pub untracked_domains: UntrackedDomains,

    /// Tracked or resolved addresses in private ranges
    pub private_addresses: Vec<IpAddr>,

    /// Identified organisations and the untracked addresses they hold
    pub hosting_providers: BTreeMap<String, Vec<IpAddr>>,
}

pub(crate) async fn build(ctx: &Pipeline<'_>, assessment: &Assessment) -> Report {
    let mut untracked_ips = Vec::new();
    let mut hosting_providers: BTreeMap<String, Vec<IpAddr>> = BTreeMap::new();

    for entry in &assessment.untracked_ips {
        for address in entry.addresses.iter() {
            let organisation = organisation_for(ctx, address).await;
            if organisation != UNKNOWN_WHOIS {
                let held = hosting_providers.entry(organisation.clone()).or_default();
                if !held.contains(&address) {
                    held.push(address);
                }
            }
            untracked_ips.push(UntrackedIpRow {
                address,
                domain: entry.domain.clone(),
                organisation,
            });
        }
    }

    Report {
        generated_at: Utc::now(),
        potential_domains: assessment.potential_domains(),
        untracked_ips,
        missing_dnssec: assessment.missing_dnssec.clone(),
        untracked_domains: assessment.untracked_domains.clone(),
        private_addresses: assessment.private_addresses.iter().collect(),
        hosting_providers,
    }
}

async fn organisation_for(ctx: &Pipeline<'_>, ip: IpAddr) -> String {
    let Some(whois) = ctx.whois else {
        return UNKNOWN_WHOIS.to_string();
    };

    let raw = match whois.whois(ip).await {
        Ok(raw) => raw,
        Err(e) => {
            debug!(%ip, error = %e, "whois lookup failed");
            return UNKNOWN_WHOIS.to_string();
        }
    };

    if WhoisRecord::is_invalid_response(&raw) {
        return UNKNOWN_WHOIS.to_string();
    }
    WhoisRecord::parse(&raw).organisation().to_string()
}
