//! orbit - attack-surface reconciliation of DNS zones
//!
//! Exits with status 1 on any fatal input error.

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    orbit_cli::run().await
}
