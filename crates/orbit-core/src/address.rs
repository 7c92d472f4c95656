//! Address classification and canonical deduplication.
//!
//! Every address entering an [`AddressCollection`] is canonicalized first, so
//! an IPv4-mapped IPv6 address (`::ffff:192.0.2.1`) lands in the IPv4 bucket
//! and compares equal to its plain IPv4 form.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address family of a candidate address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// IPv4 address (including IPv4-mapped IPv6)
    Ipv4(Ipv4Addr),
    /// IPv6 address
    Ipv6(Ipv6Addr),
    /// Not an IP address
    Invalid,
}

impl Classification {
    /// The classified address, if valid.
    #[must_use]
    pub const fn ip(self) -> Option<IpAddr> {
        match self {
            Self::Ipv4(v4) => Some(IpAddr::V4(v4)),
            Self::Ipv6(v6) => Some(IpAddr::V6(v6)),
            Self::Invalid => None,
        }
    }
}

/// Classify a textual address by parsing it, never by string heuristics.
#[must_use]
pub fn classify(input: &str) -> Classification {
    input
        .trim()
        .parse::<IpAddr>()
        .map_or(Classification::Invalid, classify_ip)
}

/// Classify a typed address by its canonical family.
#[must_use]
pub const fn classify_ip(ip: IpAddr) -> Classification {
    match ip.to_canonical() {
        IpAddr::V4(v4) => Classification::Ipv4(v4),
        IpAddr::V6(v6) => Classification::Ipv6(v6),
    }
}

/// IPv4 and IPv6 addresses bucketed by family, in insertion order.
///
/// No canonical address appears twice as long as only [`add_if_absent`]
/// is used, or [`add_unconditional`] where the caller already guarantees
/// absence.
///
/// [`add_if_absent`]: AddressCollection::add_if_absent
/// [`add_unconditional`]: AddressCollection::add_unconditional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCollection {
    ipv4: Vec<Ipv4Addr>,
    ipv6: Vec<Ipv6Addr>,
}

impl AddressCollection {
    /// Create an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ipv4: Vec::new(),
            ipv6: Vec::new(),
        }
    }

    /// IPv4 bucket
    #[must_use]
    pub fn ipv4(&self) -> &[Ipv4Addr] {
        &self.ipv4
    }

    /// IPv6 bucket
    #[must_use]
    pub fn ipv6(&self) -> &[Ipv6Addr] {
        &self.ipv6
    }

    /// Add an address unless a canonically equal one is already present.
    ///
    /// Returns true if the address was inserted.
    pub fn add_if_absent(&mut self, ip: IpAddr) -> bool {
        if self.contains(ip) {
            return false;
        }
        self.add_unconditional(ip);
        true
    }

    /// Parse and add a textual address. Invalid input is ignored.
    pub fn add_str_if_absent(&mut self, input: &str) -> bool {
        classify(input).ip().is_some_and(|ip| self.add_if_absent(ip))
    }

    /// Append without a membership check.
    pub fn add_unconditional(&mut self, ip: IpAddr) {
        match classify_ip(ip) {
            Classification::Ipv4(v4) => self.ipv4.push(v4),
            Classification::Ipv6(v6) => self.ipv6.push(v6),
            Classification::Invalid => {}
        }
    }

    /// Exact membership test across both buckets.
    #[must_use]
    pub fn contains(&self, ip: IpAddr) -> bool {
        match classify_ip(ip) {
            Classification::Ipv4(v4) => self.ipv4.contains(&v4),
            Classification::Ipv6(v6) => self.ipv6.contains(&v6),
            Classification::Invalid => false,
        }
    }

    /// Add every address of `other` that is not already present.
    pub fn merge(&mut self, other: &Self) {
        for ip in other.iter() {
            self.add_if_absent(ip);
        }
    }

    /// Iterate over all addresses, IPv4 first.
    pub fn iter(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.ipv4
            .iter()
            .copied()
            .map(IpAddr::V4)
            .chain(self.ipv6.iter().copied().map(IpAddr::V6))
    }

    /// Total number of addresses
    #[must_use]
    pub fn len(&self) -> usize {
        self.ipv4.len() + self.ipv6.len()
    }

    /// Returns true if both buckets are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty()
    }
}

impl FromIterator<IpAddr> for AddressCollection {
    fn from_iter<T: IntoIterator<Item = IpAddr>>(iter: T) -> Self {
        let mut collection = Self::new();
        for ip in iter {
            collection.add_if_absent(ip);
        }
        collection
    }
}
