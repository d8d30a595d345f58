//! SSO Service Binary
//!
//! Loads `.env` and YAML configuration, connects to postgres, and serves
//! the auth API.
//!
//! Options: --config PATH (or CONFIG_PATH), --migrate
use clap::Parser;
use sso_auth::Argon;
use sso_auth::Crypto;
use sso_auth::Keyring;
use sso_auth::Service;
use sso_core::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, env = "CONFIG_PATH", help = "Path to the YAML configuration file")]
    config: PathBuf,
    #[arg(long, help = "Create missing tables before serving")]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => return Err(e.into()),
        _ => {}
    }
    let args = Args::parse();
    let config = Config::load(&args.config)?;
    sso_core::log(config.env)?;
    log::info!("environment       {}", config.env);
    log::info!("access token ttl  {:?}", config.access_token_ttl);
    log::info!("refresh token ttl {:?} (reserved)", config.refresh_token_ttl);
    log::info!("configured apps   {}", config.secrets.len());
    if config.secrets.is_empty() && !config.secrets_from_env {
        log::warn!("no app secrets configured, every login will fail");
    }
    let client = sso_pg::db(&config.postgres.dsn()).await?;
    if args.migrate {
        log::info!("migrating schema");
        sso_auth::migrate(&client).await?;
    }
    let service = Service::new(
        client.clone(),
        Argon::new(&config.hasher)?,
        Crypto,
        Keyring::from(&config),
        config.access_token_ttl,
    );
    sso_server::run(&config.server, service, client).await?;
    log::info!("sso service stopped");
    Ok(())
}
