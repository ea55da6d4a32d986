//! Connectivity check
//!
//! Loads settings from `config/` and `PWINTY__*` environment variables,
//! then lists the supported countries.
//!
//! ```text
//! PWINTY__MERCHANT_ID=... PWINTY__API_KEY=... cargo run --example check_connection
//! ```

use pwinty_client::{PwintyClient, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pwinty_client=debug".parse()?),
        )
        .json()
        .init();

    let config = Settings::load()?.into_client_config();
    info!(base_url = %config.base_url(), "Connecting to Pwinty");

    let client = PwintyClient::from_config(config)?;
    let countries = client.get_countries().await?;

    let count = countries.as_array().map(Vec::len).unwrap_or_default();
    info!(count, "Supported countries fetched");

    Ok(())
}
