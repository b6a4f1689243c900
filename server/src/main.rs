//! Car sharing API server.
//!
//! Reads configuration from the environment (and `.env`), creates the database
//! and tables if missing, then serves until Ctrl+C or SIGTERM.

use carsharing::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    carsharing::init_tracing("carsharing=info,tower_http=info");

    let config = Config::from_env()?;
    tracing::info!(addr = %format!("{}:{}", config.host, config.port), "starting");
    carsharing::serve(config).await?;
    Ok(())
}
