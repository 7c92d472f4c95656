//! Exposure audits: internal addressing and missing DNSSEC.

use orbit_core::{AddressCollection, Assessment};
use std::net::IpAddr;
use tracing::{debug, warn};

use crate::context::Pipeline;

/// Returns true for non-globally-routable internal addresses.
///
/// IPv4: RFC 1918, loopback and link-local. IPv6: unique-local `fc00::/7`,
/// loopback and link-local `fe80::/10`.
#[must_use]
pub const fn is_private(ip: IpAddr) -> bool {
    match ip.to_canonical() {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            v6.is_loopback() || (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
        }
    }
}

/// Flag every private address in the tracked pool or any untracked entry.
pub(crate) fn audit_private_addresses(assessment: &mut Assessment) {
    let mut union = AddressCollection::new();
    for ip in assessment.tracked_addresses.iter() {
        union.add_unconditional(ip);
    }
    union.merge(&assessment.untracked_addresses());

    for ip in union.iter().filter(|ip| is_private(*ip)) {
        if assessment.private_addresses.add_if_absent(ip) {
            debug!(%ip, "private address exposed");
        }
    }
}

/// Query the zone origin for DS records and record a confirmed absence.
///
/// A failed query leaves the origin unreported.
pub(crate) async fn audit_dnssec(ctx: &Pipeline<'_>, domain: &str, assessment: &mut Assessment) {
    match ctx.dns.has_delegation_signer(domain).await {
        Ok(true) => debug!(domain, "DS record present"),
        Ok(false) => {
            if assessment.add_missing_dnssec(domain) {
                debug!(domain, "no DS record");
            }
        }
        Err(e) => warn!(domain, error = %e, "DNSSEC status undetermined"),
    }
}
