//! Command-line argument definitions using clap.

use clap::{ArgAction, Args, Parser};
use orbit_recon::ResolverPreset;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Reconcile DNS zone data against live DNS and WHOIS
///
/// Builds an inventory of tracked and untracked domains and addresses,
/// flags internal addresses published in public records and zones
/// without DNSSEC.
#[derive(Parser, Debug)]
#[command(name = "orbit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Zone file, or directory of zone files
    #[arg(long = "iZ", value_name = "PATH")]
    pub zones: Option<PathBuf>,

    /// File of newline-delimited IP address seeds
    #[arg(long = "iI", value_name = "FILE")]
    pub ip_seeds: Option<PathBuf>,

    /// File of newline-delimited domain seeds
    #[arg(long = "iU", value_name = "FILE")]
    pub domain_seeds: Option<PathBuf>,

    /// Configuration file (default: platform config dir)
    #[arg(short, long, env = "ORBIT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Reverse-lookup keyword; repeat to build the allow-list
    #[arg(short = 'k', long = "keyword", value_name = "WORD")]
    pub keywords: Vec<String>,

    /// Upstream resolver: system, google, cloudflare, quad9
    #[arg(long)]
    pub resolver: Option<ResolverPreset>,

    /// Skip WHOIS enrichment of untracked addresses
    #[arg(long)]
    pub no_whois: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[command(flatten)]
    pub listing: ListingArgs,
}

/// Offline zone listings. Any of these skips the live pipeline.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct ListingArgs {
    /// List A and AAAA records per zone
    #[arg(short = 'a', long)]
    pub a_records: bool,

    /// List CNAME records per zone
    #[arg(short = 'n', long)]
    pub cname: bool,

    /// List FQDN targets of every zone
    #[arg(short = 't', long)]
    pub targets: bool,

    /// List IP targets of every zone
    #[arg(short = 'i', long)]
    pub ips: bool,
}

impl ListingArgs {
    /// Returns true if any listing was requested
    pub const fn any(&self) -> bool {
        self.a_records || self.cname || self.targets || self.ips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_input_flags() {
        let cli = Cli::parse_from([
            "orbit",
            "--iZ",
            "zones/",
            "--iI",
            "ips.txt",
            "--iU",
            "domains.txt",
            "-k",
            "money",
            "--keyword",
            "fx",
            "--resolver",
            "quad9",
            "--no-whois",
            "-vv",
        ]);
        assert_eq!(cli.zones, Some(PathBuf::from("zones/")));
        assert_eq!(cli.ip_seeds, Some(PathBuf::from("ips.txt")));
        assert_eq!(cli.domain_seeds, Some(PathBuf::from("domains.txt")));
        assert_eq!(cli.keywords, vec!["money", "fx"]);
        assert_eq!(cli.resolver, Some(ResolverPreset::Quad9));
        assert!(cli.no_whois);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.listing.any());
    }

    #[test]
    fn listing_flags() {
        let cli = Cli::parse_from(["orbit", "--iZ", "a.zone", "-t", "--ips"]);
        assert!(cli.listing.any());
        assert!(cli.listing.targets);
        assert!(cli.listing.ips);
        assert!(!cli.listing.cname);
    }

    #[test]
    fn rejects_unknown_resolver() {
        assert!(Cli::try_parse_from(["orbit", "--resolver", "nowhere"]).is_err());
    }

    #[test]
    fn parses_output_format() {
        let cli = Cli::parse_from(["orbit", "-o", "yaml"]);
        assert_eq!(cli.output, Some(OutputFormat::Yaml));
        assert!(Cli::try_parse_from(["orbit", "--output", "csv"]).is_err());
    }
}
