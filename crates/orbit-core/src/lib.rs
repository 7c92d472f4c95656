//! Core types and traits for orbit.
//!
//! This crate provides the foundational pieces used across the orbit workspace:
//!
//! - **Types**: zone files, address collections and the [`Assessment`] aggregate
//! - **Zones**: the zone-file parser ([`zones::parse`])
//! - **Addresses**: family classification and canonical deduplication
//! - **Input**: line-oriented seed readers for IP and domain lists
//! - **Lookup**: the [`DnsLookup`] and [`WhoisLookup`] seams implemented by `orbit-recon`
//! - **Errors**: input and enrichment failures in [`OrbitError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use orbit_core::{zones, Result};
//!
//! fn print_origins(path: &std::path::Path) -> Result<()> {
//!     for zone in zones::parse(path)? {
//!         println!("{} ({} records)", zone.origin, zone.records.len());
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/orbit-core/0.4.0")]

pub mod address;
mod error;
pub mod input;
mod lookup;
pub mod types;
pub mod zones;

pub use address::{classify, Classification};
pub use error::{OrbitError, Result};
pub use lookup::{DnsLookup, WhoisLookup};
pub use types::*;
