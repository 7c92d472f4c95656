//! Alias (CNAME) extraction and per-zone resolution.

use orbit_core::types::trim_root;
use orbit_core::{AliasPair, AliasRecord, Assessment, ZoneFile};
use tracing::debug;

use crate::audit;
use crate::context::Pipeline;
use crate::settings::Settings;

/// Surviving `(alias, target)` pairs of a zone, in file order.
///
/// Targets ending with an internal suffix marker, or with fewer labels than
/// a registrable name needs, are dropped.
#[must_use]
pub fn extract_aliases(zone: &ZoneFile, settings: &Settings) -> Vec<AliasPair> {
    zone.records
        .iter()
        .filter(|r| r.is_alias())
        .filter_map(|r| {
            let target = trim_root(&r.content);
            if settings.is_meaningful_alias(target) {
                Some(AliasPair {
                    alias: zone.qualify(&r.name),
                    target: target.to_string(),
                })
            } else {
                debug!(zone = zone.apex(), target, "dropping alias");
                None
            }
        })
        .collect()
}

/// The zone's alias record, or `None` when nothing survives filtering.
#[must_use]
pub fn alias_record(zone: &ZoneFile, settings: &Settings) -> Option<AliasRecord> {
    let relationships = extract_aliases(zone, settings);
    if relationships.is_empty() {
        return None;
    }
    Some(AliasRecord {
        domain: zone.apex().to_string(),
        relationships,
    })
}

/// Per zone: collect aliases, audit DNSSEC and register tracked targets.
///
/// A zone keyed by an IP literal contributes that address to the tracked
/// pool; any other zone contributes the FQDNs of its A/AAAA/CNAME records
/// as known domains. IP-literal zones are never queried for DS records.
pub(crate) async fn resolve_zones(ctx: &Pipeline<'_>, assessment: &mut Assessment) {
    let zones = std::mem::take(&mut assessment.zones);

    for zone in &zones {
        if let Some(record) = alias_record(zone, ctx.settings) {
            assessment.aliases.push(record);
        }

        if let Some(ip) = zone.origin_ip() {
            assessment.tracked_addresses.add_if_absent(ip);
            continue;
        }

        audit::audit_dnssec(ctx, zone.apex(), assessment).await;

        for fqdn in zone.fqdn_targets() {
            assessment.add_domain(&fqdn);
        }
    }

    assessment.zones = zones;
}
