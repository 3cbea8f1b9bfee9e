// Entrypoint for the CRM terminal client.
// - Keeps `main` small: set up logging, read config once, build the API
//   client and hand it to the UI loop.
// - Returns `anyhow::Result` so startup errors print with context.

use anyhow::Context;
use crm_client::{api::ApiClient, config::Config, ui::main_menu};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the menus on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Base URL comes from `CRM_API_URL` (or `.env`), see `config::Config`.
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(api_url = %config.api_url, "starting CRM client");

    let api = ApiClient::new(&config).context("Failed to build HTTP client")?;

    // Blocks until the user exits.
    main_menu(api).await
}
