//! # orbit-cli
//!
//! Command-line interface for orbit attack-surface reconciliation.
//!
//! ## Features
//!
//! - **Zone, IP and domain inputs**: `--iZ`, `--iI` and `--iU`
//! - **Live reconciliation**: forward and reverse DNS against the tracked inventory
//! - **Exposure audit**: private addresses in public records, zones without DNSSEC
//! - **Offline listings**: A, CNAME, FQDN and IP targets of the zones
//! - **Multiple output formats**: Pretty text, JSON, YAML

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
