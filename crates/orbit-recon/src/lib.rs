//! Live network collaborators for orbit.
//!
//! Implements the [`orbit_core::DnsLookup`] and [`orbit_core::WhoisLookup`]
//! seams against real services.

#![doc(html_root_url = "https://docs.rs/orbit-recon/0.4.0")]

mod error;
mod preset;

#[cfg(feature = "dns")]
pub mod dns;

#[cfg(feature = "whois")]
pub mod whois;

pub use error::{ReconError, ReconResult};
pub use preset::ResolverPreset;
