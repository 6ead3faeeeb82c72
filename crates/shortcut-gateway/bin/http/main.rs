mod cli;
mod logging;

use crate::cli::{StorageBackendArg, CLI};
use clap::Parser;
use shortcut_gateway::{App, AppState, Credentials};
use shortcut_generator::{GeneratorSettings, RandomGenerator};
use shortcut_registry::{AliasRegistry, RegistryPolicy};
use shortcut_storage::{InMemoryRepository, PostgresRepository, Repository};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = CLI::try_parse()?;

    logging::init(config.env)?;

    info!(
        env = %config.env,
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting shortcut"
    );

    let generator = RandomGenerator::new(
        GeneratorSettings::builder()
            .length(config.alias_length)
            .build(),
    )?;
    let policy = RegistryPolicy::builder()
        .max_attempts(config.max_attempts)
        .store_timeout(Some(config.store_timeout))
        .build();
    let credentials = Credentials::new(config.auth_user.as_str(), config.auth_password.as_str());

    match config.storage {
        StorageBackendArg::InMemory => {
            let registry = AliasRegistry::with_policy(InMemoryRepository::new(), generator, policy);
            run_server(config.listen_addr, registry, credentials, config.request_timeout).await?;
        }
        StorageBackendArg::Postgres => {
            let repository = PostgresRepository::connect(&config.postgres_settings()).await?;
            let registry = AliasRegistry::with_policy(repository, generator, policy);
            run_server(config.listen_addr, registry, credentials, config.request_timeout).await?;
        }
    }

    Ok(())
}

async fn run_server<R: Repository>(
    listen_addr: SocketAddr,
    registry: AliasRegistry<R, RandomGenerator>,
    credentials: Credentials,
    request_timeout: Duration,
) -> std::io::Result<()> {
    let router = App::router(AppState::new(registry, credentials), request_timeout);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
