//! Service entry-point: loads configuration, opens the account database,
//! seeds the optional administrator, and serves the HTTP API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use risk_appetite::domain::{BootstrapOutcome, CredentialService};
use risk_appetite::inbound::http::health::HealthState;
use risk_appetite::inbound::http::session_config::fingerprint::key_fingerprint;
use risk_appetite::inbound::http::session_config::{BuildMode, session_settings};
use risk_appetite::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use risk_appetite::outbound::security::Argon2PasswordHasher;
use risk_appetite::settings::AppSettings;

use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }
}

async fn open_pool(settings: &AppSettings) -> color_eyre::Result<DbPool> {
    let mut config = PoolConfig::new(settings.database_path().to_string_lossy().into_owned());
    if let Some(max_size) = settings.pool_max_size {
        config = config.with_max_size(max_size);
    }
    DbPool::new(config)
        .await
        .wrap_err("failed to open the account database")
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|error| eyre!("failed to load configuration: {error}"))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session key loaded"
    );

    let pool = open_pool(&settings).await?;
    let service = Arc::new(CredentialService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
    ));

    if let Some(admin) = settings.admin_credentials()? {
        match service.bootstrap_admin(&admin).await? {
            BootstrapOutcome::Created => {
                info!(username = %admin.username(), "administrator account created");
            }
            BootstrapOutcome::AlreadyPresent => {
                info!(username = %admin.username(), "administrator account already present");
            }
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr()?,
        service,
    );
    let server = create_server(health_state.clone(), config)?;
    health_state.mark_ready();
    info!("listening");
    server.await?;
    Ok(())
}
