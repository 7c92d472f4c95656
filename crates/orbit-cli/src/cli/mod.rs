//! CLI argument parsing and run orchestration.

pub mod args;

use anyhow::{Context, Result};
use args::Cli;
use clap::Parser;
use orbit::{Inputs, Pipeline};
use orbit_recon::dns::DnsResolver;
use orbit_recon::whois::WhoisClient;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::{self, Listing};

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?.with_overrides(&cli);
    let format = config.output_format.unwrap_or_default();
    debug!(?config, "configuration loaded");

    let inputs = Inputs {
        zones: cli.zones.clone(),
        ip_seeds: cli.ip_seeds.clone(),
        domain_seeds: cli.domain_seeds.clone(),
    };
    let assessment = orbit::load(&inputs, &config.settings).context("failed to load inputs")?;

    if cli.listing.any() {
        let listing = Listing::collect(&assessment.zones, cli.listing);
        return output::print_listing(&listing, format);
    }

    let dns = DnsResolver::new(config.resolver).context("failed to set up DNS resolver")?;
    let whois = if config.whois {
        let client = match &config.whois_servers {
            Some(path) => WhoisClient::from_path(path),
            None => WhoisClient::new(),
        };
        Some(client.context("failed to set up WHOIS client")?)
    } else {
        None
    };

    let mut pipeline = Pipeline::new(&dns, &config.settings);
    if let Some(whois) = &whois {
        pipeline = pipeline.with_whois(whois);
    }

    info!(resolver = %config.resolver, whois = config.whois, "starting reconciliation");
    let assessment = pipeline.run(assessment).await;
    let report = pipeline.report(&assessment).await;

    output::print_report(&report, format)
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
