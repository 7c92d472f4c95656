use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::address::AddressCollection;

/// One resource-record line of a zone file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Record type (A, AAAA, CNAME, MX, SOA, ...)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Record class, usually IN
    pub class: String,

    /// Owner name as written (`www`, `@`, `*`)
    pub name: String,

    /// Record data, multi-field data joined with single spaces
    pub content: String,

    /// Time to live in seconds
    pub ttl: u32,
}

impl ZoneRecord {
    /// Returns true if the record type matches, ignoring case
    #[must_use]
    pub fn is_type(&self, record_type: &str) -> bool {
        self.record_type.eq_ignore_ascii_case(record_type)
    }

    /// Returns true if this is an A or AAAA record
    #[must_use]
    pub fn is_address_record(&self) -> bool {
        self.is_type("A") || self.is_type("AAAA")
    }

    /// Returns true if this is a CNAME record
    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.is_type("CNAME")
    }

    /// Try to parse the content as an IP address
    #[must_use]
    pub fn as_ip(&self) -> Option<IpAddr> {
        self.content.parse().ok()
    }
}

/// A parsed zone: its origin and records in file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneFile {
    /// Origin as written on the first line, e.g. `example.com.`
    pub origin: String,

    /// Data records in file order
    pub records: Vec<ZoneRecord>,
}

impl ZoneFile {
    /// Origin without the trailing root dot
    #[must_use]
    pub fn apex(&self) -> &str {
        trim_root(&self.origin)
    }

    /// The origin as an address, when the zone is keyed by an IP literal
    #[must_use]
    pub fn origin_ip(&self) -> Option<IpAddr> {
        self.apex().parse().ok()
    }

    /// All records of a given type
    pub fn records_by_type<'a>(
        &'a self,
        record_type: &'a str,
    ) -> impl Iterator<Item = &'a ZoneRecord> + 'a {
        self.records.iter().filter(move |r| r.is_type(record_type))
    }

    /// Fully qualify an owner name against this zone.
    ///
    /// `@` and `*` map to the bare origin; absolute names keep their own
    /// labels.
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        match name {
            "@" | "*" => self.apex().to_string(),
            n if n.ends_with('.') => trim_root(n).to_string(),
            n => format!("{n}.{}", self.apex()),
        }
    }

    /// Unique FQDNs named by A, AAAA and CNAME records, in file order
    #[must_use]
    pub fn fqdn_targets(&self) -> Vec<String> {
        let mut results: Vec<String> = Vec::new();
        for record in self
            .records
            .iter()
            .filter(|r| r.is_address_record() || r.is_alias())
        {
            let fqdn = self.qualify(&record.name);
            if !results.contains(&fqdn) {
                results.push(fqdn);
            }
        }
        results
    }

    /// Unique addresses found in A and AAAA record contents
    #[must_use]
    pub fn address_targets(&self) -> AddressCollection {
        self.records
            .iter()
            .filter(|r| r.is_address_record())
            .filter_map(ZoneRecord::as_ip)
            .collect()
    }
}

/// Strip a single trailing root-label dot.
#[must_use]
pub fn trim_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
