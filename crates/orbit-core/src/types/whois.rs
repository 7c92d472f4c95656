use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Marker ARIN-style servers return for queries they cannot answer.
pub const INVALID_QUERY_MARKER: &str = "Error: Invalid query";

/// Fields the extractor knows how to fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    NetRange,
    Cidr,
    NetName,
    Organization,
    OrgName,
    Address,
    City,
    StateProv,
    PostalCode,
    Country,
    OrgTechEmail,
    OrgAbuseEmail,
    Remarks,
}

/// Ordered `(field, pattern)` table; every pattern captures the value.
const FIELD_PATTERNS: &[(Field, &str)] = &[
    (Field::NetRange, r"(?i)^NetRange:\s+(.+)"),
    (Field::Cidr, r"(?i)^CIDR:\s+(.+)"),
    (Field::NetName, r"(?i)^NetName:\s+(.+)"),
    (Field::Organization, r"(?i)^Organization:\s+(.+)"),
    (Field::OrgName, r"(?i)^OrgName:\s+(.+)"),
    (Field::Address, r"(?i)^Address:\s+(.+)"),
    (Field::City, r"(?i)^City:\s+(.+)"),
    (Field::StateProv, r"(?i)^StateProv:\s+(.+)"),
    (Field::PostalCode, r"(?i)^PostalCode:\s+(.+)"),
    (Field::Country, r"(?i)^Country:\s+(.+)"),
    (Field::OrgTechEmail, r"(?i)^OrgTechEmail:\s+(.+)"),
    (Field::OrgAbuseEmail, r"(?i)^OrgAbuseEmail:\s+(.+)"),
    (Field::Remarks, r"(?i)^remarks:\s+(.+)"),
];

static PATTERNS: LazyLock<Vec<(Field, Regex)>> = LazyLock::new(|| {
    FIELD_PATTERNS
        .iter()
        .map(|(field, pattern)| (*field, Regex::new(pattern).expect("static WHOIS pattern")))
        .collect()
});

/// Fields extracted from a free-text WHOIS response.
///
/// Every field is empty when the response did not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisRecord {
    /// Allocated range, e.g. `203.0.113.0 - 203.0.113.255`
    pub net_range: String,
    /// Allocated block in CIDR notation
    pub cidr: String,
    /// Network name
    pub net_name: String,
    /// Organization handle line
    pub organization: String,
    /// Organization display name
    pub org_name: String,
    /// Street address lines joined with `"; "`
    pub address: String,
    /// City
    pub city: String,
    /// State or province
    pub state_prov: String,
    /// Postal code
    pub postal_code: String,
    /// Country code
    pub country: String,
    /// Technical contact e-mail
    pub org_tech_email: String,
    /// Abuse contact e-mail
    pub org_abuse_email: String,
    /// Mail domain mentioned in remarks
    pub remarks: String,
}

impl WhoisRecord {
    /// Extract known fields from a free-text response.
    ///
    /// Walks the pattern table once per line. Repeated fields keep the last
    /// value, except `Address` lines which accumulate.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut record = Self::default();
        for line in raw.lines() {
            for (field, pattern) in PATTERNS.iter() {
                if let Some(value) = pattern.captures(line).and_then(|c| c.get(1)) {
                    record.assign(*field, value.as_str().trim());
                }
            }
        }
        record
    }

    /// Returns true if the server rejected the query
    #[must_use]
    pub fn is_invalid_response(raw: &str) -> bool {
        raw.contains(INVALID_QUERY_MARKER)
    }

    fn assign(&mut self, field: Field, value: &str) {
        let value = value.to_string();
        match field {
            Field::NetRange => self.net_range = value,
            Field::Cidr => self.cidr = value,
            Field::NetName => self.net_name = value,
            Field::Organization => self.organization = value,
            Field::OrgName => self.org_name = value,
            Field::Address => {
                if self.address.is_empty() {
                    self.address = value;
                } else {
                    self.address.push_str("; ");
                    self.address.push_str(&value);
                }
            }
            Field::City => self.city = value,
            Field::StateProv => self.state_prov = value,
            Field::PostalCode => self.postal_code = value,
            Field::Country => self.country = value,
            Field::OrgTechEmail => self.org_tech_email = value,
            Field::OrgAbuseEmail => self.org_abuse_email = value,
            Field::Remarks => {
                if let Some((_, domain)) = value.split_once('@') {
                    self.remarks = domain.to_string();
                }
            }
        }
    }

    /// Organisation name to report: `OrgName`, else `Organization`, else empty.
    #[must_use]
    pub fn organisation(&self) -> &str {
        if self.org_name.is_empty() {
            &self.organization
        } else {
            &self.org_name
        }
    }
}
