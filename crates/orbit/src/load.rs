//! Input loading: zone files and seed lists into a fresh assessment.
//!
//! Everything here is fatal on failure; no live queries are made.

use orbit_core::{input, zones, Assessment, Result};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::settings::Settings;

/// Paths given for one run. Every input is optional.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    /// Zone file or directory of zone files
    pub zones: Option<PathBuf>,
    /// Newline-delimited IP seeds
    pub ip_seeds: Option<PathBuf>,
    /// Newline-delimited domain seeds
    pub domain_seeds: Option<PathBuf>,
}

/// Read all inputs and seed the assessment.
///
/// The tracked pool gets the IP seeds first, then every A/AAAA address in
/// the zones. Domain seeds become the initial known domains.
///
/// # Errors
///
/// Any unreadable input or unparseable zone file aborts loading.
pub fn load(inputs: &Inputs, settings: &Settings) -> Result<Assessment> {
    let mut assessment = Assessment::new();

    if let Some(path) = &inputs.zones {
        assessment.zones = zones::parse_with_extension(path, &settings.zone_extension)?;
        info!(path = %path.display(), zones = assessment.zones.len(), "loaded zones");
    }

    if let Some(path) = &inputs.ip_seeds {
        let seeds = input::parse_ip_seeds(&input::read_lines(path)?);
        debug!(path = %path.display(), count = seeds.len(), "loaded IP seeds");
        assessment.tracked_addresses.merge(&seeds);
    }

    if let Some(path) = &inputs.domain_seeds {
        for domain in input::parse_domain_seeds(&input::read_lines(path)?) {
            assessment.add_domain(&domain);
        }
        debug!(path = %path.display(), count = assessment.domains.len(), "loaded domain seeds");
    }

    for zone in &assessment.zones {
        assessment.tracked_addresses.merge(&zone.address_targets());
    }

    Ok(assessment)
}
