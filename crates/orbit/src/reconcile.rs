//! Forward and reverse DNS reconciliation against the tracked inventory.

use orbit_core::{AddressCollection, Assessment, UntrackedIp};
use std::net::IpAddr;
use tracing::{debug, warn};

use crate::context::Pipeline;

/// Resolve every known domain and collect addresses missing from the tracked pool.
///
/// A failed lookup skips that domain only.
pub(crate) async fn forward_pass(ctx: &Pipeline<'_>, assessment: &mut Assessment) {
    let domains = assessment.domains.clone();

    for domain in &domains {
        let addresses = match ctx.dns.lookup_ip(domain).await {
            Ok(addresses) => addresses,
            Err(e) => {
                warn!(domain = %domain, error = %e, "forward lookup failed");
                continue;
            }
        };

        let mut untracked = AddressCollection::new();
        for ip in addresses {
            if assessment.tracked_addresses.contains(ip) {
                continue;
            }
            untracked.add_if_absent(ip);
        }

        if untracked.is_empty() {
            continue;
        }
        debug!(domain = %domain, count = untracked.len(), "untracked addresses");
        record_untracked(assessment, domain, &untracked);
    }
}

fn record_untracked(assessment: &mut Assessment, domain: &str, found: &AddressCollection) {
    if let Some(entry) = assessment
        .untracked_ips
        .iter_mut()
        .find(|e| e.domain.eq_ignore_ascii_case(domain))
    {
        entry.addresses.merge(found);
        return;
    }
    assessment.untracked_ips.push(UntrackedIp {
        domain: domain.to_string(),
        addresses: found.clone(),
    });
}

/// Reverse-resolve every tracked IPv4 address and record unknown names.
///
/// Every candidate of an address is evaluated; names outside the keyword
/// allow-list and names already known are ignored.
pub(crate) async fn reverse_pass(ctx: &Pipeline<'_>, assessment: &mut Assessment) {
    let targets: Vec<IpAddr> = assessment
        .tracked_addresses
        .ipv4()
        .iter()
        .copied()
        .map(IpAddr::V4)
        .collect();

    for ip in targets {
        let names = match ctx.dns.reverse_lookup(ip).await {
            Ok(names) => names,
            Err(e) => {
                warn!(%ip, error = %e, "reverse lookup failed");
                continue;
            }
        };

        for name in names {
            let candidate = name.trim().trim_end_matches('.').to_ascii_lowercase();
            if candidate.is_empty() || !ctx.settings.is_allowed_name(&candidate) {
                continue;
            }
            if assessment.is_known_domain(&candidate) {
                continue;
            }
            if assessment.untracked_domains.record(&candidate, ip) {
                debug!(%ip, domain = %candidate, "untracked domain");
            }
        }
    }
}
