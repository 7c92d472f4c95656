//! Line-oriented seed readers.

use std::path::Path;
use tracing::debug;
use url::Url;

use crate::address::{classify, AddressCollection};
use crate::error::{OrbitError, Result};

/// Read a file as an ordered sequence of lines.
///
/// # Errors
///
/// Returns `OrbitError::Io` if the file cannot be opened or is not UTF-8.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| OrbitError::io(path, e))?;
    Ok(content.lines().map(str::to_owned).collect())
}

/// Parse newline-delimited IP seeds. Lines that are not addresses are skipped.
#[must_use]
pub fn parse_ip_seeds(lines: &[String]) -> AddressCollection {
    let mut ips = AddressCollection::new();
    for line in lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        match classify(line).ip() {
            Some(ip) => {
                ips.add_if_absent(ip);
            }
            None => debug!(line, "skipping non-address seed"),
        }
    }
    ips
}

/// Parse newline-delimited domain seeds into unique bare host names.
#[must_use]
pub fn parse_domain_seeds(lines: &[String]) -> Vec<String> {
    let mut domains: Vec<String> = Vec::new();
    for line in lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        match normalise_host(line) {
            Some(host) if !domains.contains(&host) => domains.push(host),
            Some(_) => {}
            None => debug!(line, "skipping unparseable domain seed"),
        }
    }
    domains
}

/// Reduce a URL-ish seed to its host name.
///
/// Schemes, paths, ports, leading dots and the trailing root dot are
/// dropped: `https://www.example.com/login` becomes `www.example.com`.
#[must_use]
pub fn normalise_host(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&with_scheme).ok()?;
    let host = url.host_str()?.trim_end_matches('.');
    if host.is_empty() {
        return None;
    }
    Some(host.trim_matches(|c| c == '[' || c == ']').to_string())
}
