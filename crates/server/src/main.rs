//! idgate - edge gateway for identity-card OCR and PII masking
//!
//! Configuration comes from an optional `gateway.{toml,yaml,json}` file and
//! `IDGATE__*` environment variables.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
