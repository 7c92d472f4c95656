use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;

use super::zone::ZoneFile;
use crate::address::AddressCollection;

/// One surviving CNAME relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasPair {
    /// Alias FQDN (`name.origin`)
    pub alias: String,

    /// Canonical target without the trailing root dot
    pub target: String,
}

/// CNAME relationships of one zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    /// Zone origin the aliases were taken from
    pub domain: String,

    /// Surviving relationships in file order
    pub relationships: Vec<AliasPair>,
}

/// Addresses a known domain resolved to that were not in the tracked pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UntrackedIp {
    /// Known domain that produced the addresses
    pub domain: String,

    /// Discovered addresses, deduplicated
    pub addresses: AddressCollection,
}

/// Domains found by reverse lookup that are not in the known-domain list.
///
/// Keys are unique across the run; each maps to the deduplicated source
/// addresses whose PTR records named it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UntrackedDomains(BTreeMap<String, Vec<IpAddr>>);

impl UntrackedDomains {
    /// Record that `ip` reverse-resolved to `domain`.
    ///
    /// Returns true if anything changed.
    pub fn record(&mut self, domain: &str, ip: IpAddr) -> bool {
        let sources = self.0.entry(domain.to_string()).or_default();
        if sources.contains(&ip) {
            return false;
        }
        sources.push(ip);
        true
    }

    /// Source addresses for a domain
    #[must_use]
    pub fn get(&self, domain: &str) -> Option<&[IpAddr]> {
        self.0.get(domain).map(Vec::as_slice)
    }

    /// Iterate over domain-sources pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<IpAddr>)> {
        self.0.iter()
    }

    /// Number of untracked domains
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was discovered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The inventory built by one run of the pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assessment {
    /// Parsed zone files
    pub zones: Vec<ZoneFile>,

    /// Known addresses: IP seeds, zone A/AAAA contents, IP-literal origins
    pub tracked_addresses: AddressCollection,

    /// Addresses discovered through forward lookups of known domains
    pub untracked_ips: Vec<UntrackedIp>,

    /// Internal addresses seen in public-facing data
    pub private_addresses: AddressCollection,

    /// Known domains: domain seeds and zone-derived FQDNs
    pub domains: Vec<String>,

    /// Domains discovered through reverse lookups
    pub untracked_domains: UntrackedDomains,

    /// Zone origins with a confirmed absence of DS records
    pub missing_dnssec: Vec<String>,

    /// CNAME relationships per zone
    pub aliases: Vec<AliasRecord>,
}

impl Assessment {
    /// Create an empty assessment
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the domain is in the known-domain list (case-insensitive)
    #[must_use]
    pub fn is_known_domain(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d.eq_ignore_ascii_case(domain))
    }

    /// Add a known domain unless already present.
    pub fn add_domain(&mut self, domain: &str) -> bool {
        if domain.is_empty() || self.is_known_domain(domain) {
            return false;
        }
        self.domains.push(domain.to_string());
        true
    }

    /// Record a zone origin lacking DNSSEC, once.
    pub fn add_missing_dnssec(&mut self, domain: &str) -> bool {
        if self
            .missing_dnssec
            .iter()
            .any(|d| d.eq_ignore_ascii_case(domain))
        {
            return false;
        }
        self.missing_dnssec.push(domain.to_string());
        true
    }

    /// Every address referenced by an untracked-IP entry, deduplicated
    #[must_use]
    pub fn untracked_addresses(&self) -> AddressCollection {
        let mut all = AddressCollection::new();
        for entry in &self.untracked_ips {
            all.merge(&entry.addresses);
        }
        all
    }

    /// Known domains followed by alias targets, deduplicated
    #[must_use]
    pub fn potential_domains(&self) -> Vec<String> {
        let mut targets = self.domains.clone();
        for pair in self.aliases.iter().flat_map(|a| &a.relationships) {
            if !targets.iter().any(|t| t.eq_ignore_ascii_case(&pair.target)) {
                targets.push(pair.target.clone());
            }
        }
        targets
    }
}
