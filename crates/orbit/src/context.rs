//! The per-run pipeline context.

use orbit_core::{Assessment, DnsLookup, WhoisLookup};
use tracing::info;

use crate::report::Report;
use crate::settings::Settings;
use crate::{aliases, audit, reconcile, report};

/// Collaborators and policy shared by every stage of one run.
///
/// Built once and passed by reference; stages never reach for global state.
pub struct Pipeline<'a> {
    pub(crate) dns: &'a dyn DnsLookup,
    pub(crate) whois: Option<&'a dyn WhoisLookup>,
    pub(crate) settings: &'a Settings,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline without WHOIS enrichment
    #[must_use]
    pub fn new(dns: &'a dyn DnsLookup, settings: &'a Settings) -> Self {
        Self {
            dns,
            whois: None,
            settings,
        }
    }

    /// Add WHOIS client
    #[must_use]
    pub fn with_whois(mut self, whois: &'a dyn WhoisLookup) -> Self {
        self.whois = Some(whois);
        self
    }

    /// Run every enrichment stage over a loaded assessment, in order.
    ///
    /// Live-query failures never abort the run; the affected item is skipped.
    pub async fn run(&self, mut assessment: Assessment) -> Assessment {
        aliases::resolve_zones(self, &mut assessment).await;
        info!(
            domains = assessment.domains.len(),
            aliases = assessment.aliases.len(),
            "zones resolved"
        );

        reconcile::forward_pass(self, &mut assessment).await;
        reconcile::reverse_pass(self, &mut assessment).await;
        info!(
            untracked_ips = assessment.untracked_ips.len(),
            untracked_domains = assessment.untracked_domains.len(),
            "reconciliation finished"
        );

        audit::audit_private_addresses(&mut assessment);
        info!(
            private = assessment.private_addresses.len(),
            missing_dnssec = assessment.missing_dnssec.len(),
            "exposure audit finished"
        );

        assessment
    }

    /// Build the final report, querying WHOIS for every untracked address.
    pub async fn report(&self, assessment: &Assessment) -> Report {
        report::build(self, assessment).await
    }
}
