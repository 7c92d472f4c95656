//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use orbit::{Report, ZoneFile, ZoneRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::cli::args::ListingArgs;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Report sections as plain lines
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Offline zone listings selected on the command line
#[derive(Debug, Default, Serialize)]
pub struct Listing<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a_records: Option<BTreeMap<&'a str, Vec<&'a ZoneRecord>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname: Option<BTreeMap<&'a str, Vec<&'a ZoneRecord>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ips: Option<Vec<String>>,
}

impl<'a> Listing<'a> {
    /// Collect the requested listings from parsed zones.
    pub fn collect(zones: &'a [ZoneFile], flags: ListingArgs) -> Self {
        let addresses = || {
            group_by_apex(zones, |z| z.records.iter().filter(|r| r.is_address_record()))
        };
        let aliases = || group_by_apex(zones, |z| z.records_by_type("CNAME"));

        let mut targets = Vec::new();
        let mut ips = Vec::new();
        for zone in zones {
            for fqdn in zone.fqdn_targets() {
                if !targets.contains(&fqdn) {
                    targets.push(fqdn);
                }
            }
            for ip in zone.address_targets().iter() {
                let ip = ip.to_string();
                if !ips.contains(&ip) {
                    ips.push(ip);
                }
            }
        }

        Self {
            a_records: flags.a_records.then(addresses),
            cname: flags.cname.then(aliases),
            targets: flags.targets.then_some(targets),
            ips: flags.ips.then_some(ips),
        }
    }
}

/// Matching records per apex; zones sharing an origin are merged.
fn group_by_apex<'a, I>(
    zones: &'a [ZoneFile],
    select: impl Fn(&'a ZoneFile) -> I,
) -> BTreeMap<&'a str, Vec<&'a ZoneRecord>>
where
    I: Iterator<Item = &'a ZoneRecord>,
{
    let mut grouped: BTreeMap<&str, Vec<&ZoneRecord>> = BTreeMap::new();
    for zone in zones {
        grouped.entry(zone.apex()).or_default().extend(select(zone));
    }
    grouped
}

/// Print a report to stdout in the chosen format.
pub fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(report)?)?,
        OutputFormat::Yaml => write!(stdout, "{}", serde_yaml::to_string(report)?)?,
        OutputFormat::Pretty => write_report(&mut stdout, report)?,
    }
    Ok(())
}

/// Print zone listings to stdout in the chosen format.
pub fn print_listing(listing: &Listing<'_>, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(listing)?)?,
        OutputFormat::Yaml => write!(stdout, "{}", serde_yaml::to_string(listing)?)?,
        OutputFormat::Pretty => write_listing(&mut stdout, listing)?,
    }
    Ok(())
}

fn header(w: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(w, "{}", format!("---- {title} ----").bold())
}

/// Plain-text report: the three primary sections, then discovered names
/// and internal addresses.
pub fn write_report(w: &mut impl Write, report: &Report) -> io::Result<()> {
    header(w, "Potential Domains")?;
    for domain in &report.potential_domains {
        writeln!(w, "{domain}")?;
    }

    header(w, "Untracked IPs")?;
    for row in &report.untracked_ips {
        writeln!(
            w,
            "{} - {} - {}",
            row.address.to_string().yellow(),
            row.domain,
            row.organisation
        )?;
    }

    header(w, "No DNSSEC")?;
    for domain in &report.missing_dnssec {
        writeln!(w, "{}", domain.red())?;
    }

    header(w, "Untracked Domains")?;
    for (domain, sources) in report.untracked_domains.iter() {
        let sources: Vec<String> = sources.iter().map(ToString::to_string).collect();
        writeln!(w, "{} - {}", domain.cyan(), sources.join(", "))?;
    }

    header(w, "Private IPs")?;
    for ip in &report.private_addresses {
        writeln!(w, "{}", ip.to_string().red())?;
    }
    Ok(())
}

fn write_records(
    w: &mut impl Write,
    title: &str,
    zones: &BTreeMap<&str, Vec<&ZoneRecord>>,
) -> io::Result<()> {
    header(w, title)?;
    for (zone, records) in zones {
        writeln!(w, "{}", zone.cyan())?;
        for r in records {
            writeln!(w, "  {:6} {:30} {:>6} {}", r.record_type, r.name, r.ttl, r.content)?;
        }
    }
    Ok(())
}

/// Plain-text zone listings in flag order.
pub fn write_listing(w: &mut impl Write, listing: &Listing<'_>) -> io::Result<()> {
    if let Some(zones) = &listing.a_records {
        write_records(w, "A Records", zones)?;
    }
    if let Some(zones) = &listing.cname {
        write_records(w, "CNAME Records", zones)?;
    }
    if let Some(targets) = &listing.targets {
        header(w, "Targets")?;
        for target in targets {
            writeln!(w, "{target}")?;
        }
    }
    if let Some(ips) = &listing.ips {
        header(w, "IP Targets")?;
        for ip in ips {
            writeln!(w, "{ip}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit::zones::parse_lines;
    use orbit::{UntrackedDomains, UntrackedIpRow};

    fn sample_report() -> Report {
        let mut untracked_domains = UntrackedDomains::default();
        untracked_domains.record("fx.example.net", "203.0.113.9".parse().unwrap());
        Report {
            generated_at: fixed_time(),
            potential_domains: vec!["www.example.com".into(), "a.b.c.com".into()],
            untracked_ips: vec![UntrackedIpRow {
                address: "198.51.100.20".parse().unwrap(),
                domain: "www.example.com".into(),
                organisation: "Unknown WHOIS".into(),
            }],
            missing_dnssec: vec!["example.com".into()],
            untracked_domains,
            private_addresses: vec!["10.0.0.5".parse().unwrap()],
            hosting_providers: BTreeMap::new(),
        }
    }

    fn fixed_time() -> chrono::DateTime<chrono::Utc> {
        "2026-01-01T00:00:00Z".parse().unwrap()
    }

    fn render(report: &Report) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        write_report(&mut out, report).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn pretty_report_sections_in_order() {
        let text = render(&sample_report());
        let expected = "\
---- Potential Domains ----
www.example.com
a.b.c.com
---- Untracked IPs ----
198.51.100.20 - www.example.com - Unknown WHOIS
---- No DNSSEC ----
example.com
---- Untracked Domains ----
fx.example.net - 203.0.113.9
---- Private IPs ----
10.0.0.5
";
        assert_eq!(text, expected);
    }

    #[test]
    fn listing_collects_only_requested() {
        let lines: Vec<String> = "$ORIGIN example.com.
www 300 IN A 203.0.113.9
api 300 IN AAAA 2001:db8::9
shop 300 IN CNAME a.b.c.com.
mail 300 IN MX 10 mx.example.com."
            .lines()
            .map(str::to_owned)
            .collect();
        let zones = vec![parse_lines("example.com.zone", &lines).unwrap()];

        let flags = ListingArgs {
            targets: true,
            ips: true,
            ..ListingArgs::default()
        };
        let listing = Listing::collect(&zones, flags);
        assert!(listing.a_records.is_none());
        assert!(listing.cname.is_none());
        assert_eq!(
            listing.targets.as_deref(),
            Some(
                &[
                    "www.example.com".to_string(),
                    "api.example.com".into(),
                    "shop.example.com".into()
                ][..]
            )
        );
        assert_eq!(
            listing.ips.as_deref(),
            Some(&["203.0.113.9".to_string(), "2001:db8::9".into()][..])
        );

        let flags = ListingArgs {
            cname: true,
            ..ListingArgs::default()
        };
        let listing = Listing::collect(&zones, flags);
        let cnames = listing.cname.unwrap();
        assert_eq!(cnames["example.com"].len(), 1);
        assert_eq!(cnames["example.com"][0].content, "a.b.c.com.");
    }

    #[test]
    fn listing_merges_zones_with_same_origin() {
        let internal: Vec<String> = ["$ORIGIN example.com.", "www 300 IN A 10.0.0.5"]
            .map(str::to_owned)
            .to_vec();
        let external: Vec<String> = [
            "$ORIGIN example.com.",
            "www 300 IN A 203.0.113.9",
            "shop 300 IN CNAME a.b.c.com.",
        ]
        .map(str::to_owned)
        .to_vec();
        let zones = vec![
            parse_lines("internal/example.com.zone", &internal).unwrap(),
            parse_lines("external/example.com.zone", &external).unwrap(),
        ];

        let flags = ListingArgs {
            a_records: true,
            cname: true,
            ..ListingArgs::default()
        };
        let listing = Listing::collect(&zones, flags);
        let a_records = listing.a_records.unwrap();
        let contents: Vec<&str> = a_records["example.com"]
            .iter()
            .map(|r| r.content.as_str())
            .collect();
        assert_eq!(contents, ["10.0.0.5", "203.0.113.9"]);
        assert_eq!(listing.cname.unwrap()["example.com"].len(), 1);
    }
}
