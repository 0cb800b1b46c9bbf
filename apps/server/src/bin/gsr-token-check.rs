//! Fetch one GSR access token with the configured credentials and report its expiry.

use ea_gsr::{GsrSettings, TokenClient};
use ea_server::{config::LogFormat, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());

    let settings = GsrSettings::from_env()?;
    tracing::info!("Requesting access token for user {}", settings.user_id);

    let client = TokenClient::new(settings)?;
    let token = client.fetch_access_token().await?;
    tracing::info!("Access token acquired, valid until {}", token.valid_until);
    Ok(())
}
