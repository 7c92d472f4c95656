//! Attack-surface reconciliation of DNS zone data against live observations.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use orbit::{load, Inputs, Pipeline, Settings};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> orbit::Result<()> {
//!     let settings = Settings::default();
//!     let inputs = Inputs {
//!         zones: Some("zones/".into()),
//!         ..Inputs::default()
//!     };
//!     let assessment = load(&inputs, &settings)?;
//!
//!     let dns = orbit_recon::dns::DnsResolver::new(Default::default())?;
//!     let pipeline = Pipeline::new(&dns, &settings);
//!
//!     let assessment = pipeline.run(assessment).await;
//!     let report = pipeline.report(&assessment).await;
//!     println!("{} untracked addresses", report.untracked_ips.len());
//!     Ok(())
//! }
//! ```
//!
//! Stages run strictly in order: alias resolution and DNSSEC audit per zone,
//! the forward pass, the reverse pass, then the private-address audit.

mod aliases;
mod audit;
mod context;
mod load;
mod reconcile;
mod report;
mod settings;

#[cfg(test)]
mod testing;

pub use aliases::{alias_record, extract_aliases};
pub use audit::is_private;
pub use context::Pipeline;
pub use load::{load, Inputs};
pub use report::{Report, UntrackedIpRow, UNKNOWN_WHOIS};
pub use settings::Settings;

// Re-export core types
pub use orbit_core::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDns, FakeWhois};
    use std::fs;
    use std::net::IpAddr;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_single_record_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let zone = dir.path().join("example.com.zone");
        fs::write(&zone, "$ORIGIN example.com.\nwww IN A 203.0.113.9\n").unwrap();

        let settings = Settings::default();
        let inputs = Inputs {
            zones: Some(zone),
            ..Inputs::default()
        };
        let assessment = load(&inputs, &settings).unwrap();

        let dns = FakeDns::default().ds("example.com", false);
        let assessment = Pipeline::new(&dns, &settings).run(assessment).await;

        assert_eq!(assessment.domains, vec!["www.example.com"]);
        let v4: Vec<IpAddr> = assessment.tracked_addresses.iter().collect();
        assert_eq!(v4, vec![ip("203.0.113.9")]);
        assert!(assessment.private_addresses.is_empty());
        assert_eq!(assessment.missing_dnssec, vec!["example.com"]);
    }

    #[tokio::test]
    async fn test_signed_zone_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        let zone = dir.path().join("example.com.zone");
        fs::write(&zone, "$ORIGIN example.com.\nwww IN A 203.0.113.9\n").unwrap();

        let settings = Settings::default();
        let inputs = Inputs {
            zones: Some(zone),
            ..Inputs::default()
        };
        let assessment = load(&inputs, &settings).unwrap();

        let dns = FakeDns::default().ds("example.com", true);
        let assessment = Pipeline::new(&dns, &settings).run(assessment).await;

        assert!(assessment.missing_dnssec.is_empty());
    }

    #[tokio::test]
    async fn test_full_run_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let zone = dir.path().join("example.com.zone");
        fs::write(
            &zone,
            "$ORIGIN example.com.
$TTL 300
www  IN A     203.0.113.9
pay  IN CNAME pay.money.vendor.example.
int  IN A     10.0.0.5
",
        )
        .unwrap();

        let settings = Settings::default();
        let inputs = Inputs {
            zones: Some(zone),
            ..Inputs::default()
        };
        let assessment = load(&inputs, &settings).unwrap();

        let dns = FakeDns::default()
            .ds("example.com", true)
            .forward("www.example.com", &["203.0.113.9", "198.51.100.20"])
            .forward("int.example.com", &["10.0.0.5"])
            .reverse("203.0.113.9", &["www.example.com", "fx.example.net"]);
        let whois = FakeWhois::default().respond("198.51.100.20", "OrgName: Example Cloud\n");
        let pipeline = Pipeline::new(&dns, &settings).with_whois(&whois);

        let assessment = pipeline.run(assessment).await;
        let report = pipeline.report(&assessment).await;

        assert_eq!(
            report.potential_domains,
            vec![
                "www.example.com",
                "pay.example.com",
                "int.example.com",
                "pay.money.vendor.example"
            ]
        );
        assert_eq!(report.untracked_ips.len(), 1);
        assert_eq!(report.untracked_ips[0].address, ip("198.51.100.20"));
        assert_eq!(report.untracked_ips[0].domain, "www.example.com");
        assert_eq!(report.untracked_ips[0].organisation, "Example Cloud");
        assert_eq!(report.private_addresses, vec![ip("10.0.0.5")]);
        assert!(report.untracked_domains.get("fx.example.net").is_some());
        assert!(report.missing_dnssec.is_empty());
    }
}
