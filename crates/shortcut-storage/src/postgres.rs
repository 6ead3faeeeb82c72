use async_trait::async_trait;
use shortcut_core::repository::Result;
use shortcut_core::{Alias, DeleteRepository, ReadRepository, StorageError, WriteRepository};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

/// Idempotent DDL applied on every start.
const SCHEMA: &str = include_str!("../ddl/postgres/url.sql");

/// Connection parameters for [`PostgresRepository`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct PostgresSettings {
    #[builder(default = "localhost".to_string(), setter(into))]
    pub host: String,
    #[builder(default = 5432)]
    pub port: u16,
    #[builder(default = "postgres".to_string(), setter(into))]
    pub user: String,
    #[builder(default = "password".to_string(), setter(into))]
    pub password: String,
    #[builder(default = "url_shortener".to_string(), setter(into))]
    pub database: String,
    #[builder(default = 10)]
    pub max_connections: u32,
    /// Upper bound on waiting for a pooled connection.
    #[builder(default = Duration::from_secs(3))]
    pub acquire_timeout: Duration,
}

impl PostgresSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// PostgreSQL implementation of the repository traits.
///
/// Uniqueness of `alias` is enforced by the table's `UNIQUE` constraint, so
/// concurrent inserts of the same alias resolve to one success and one
/// [`StorageError::Conflict`] regardless of isolation level.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Opens a connection pool and makes sure the schema exists.
    pub async fn connect(settings: &PostgresSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(settings.connect_options())
            .await
            .map_err(map_sqlx_error)?;

        info!(
            host = %settings.host,
            port = settings.port,
            database = %settings.database,
            "connected to postgres"
        );

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and makes sure the schema exists.
    pub async fn from_pool(pool: PgPool) -> Result<Self> {
        let repository = Self { pool };
        repository.bootstrap().await?;
        Ok(repository)
    }

    /// Creates the `url` table and its index if they are absent.
    ///
    /// Safe to run any number of times.
    pub async fn bootstrap(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Schema(e.to_string()))?;

        info!("storage schema is ready");
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for PostgresRepository {
    async fn read(&self, alias: &Alias) -> Result<String> {
        let url: Option<String> = sqlx::query_scalar(
            r#"
            SELECT url
            FROM url
            WHERE alias = $1
            "#,
        )
        .bind(alias.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        url.ok_or_else(|| StorageError::NotFound(alias.to_string()))
    }
}

#[async_trait]
impl WriteRepository for PostgresRepository {
    async fn create(&self, alias: &Alias, target_url: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO url (alias, url)
            VALUES ($1, $2)
            "#,
        )
        .bind(alias.as_str())
        .bind(target_url)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                debug!(alias = %alias, "unique violation on insert");
                Err(StorageError::Conflict(alias.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}

#[async_trait]
impl DeleteRepository for PostgresRepository {
    async fn delete(&self, alias: &Alias) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM url
            WHERE alias = $1
            "#,
        )
        .bind(alias.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(alias.to_string()));
        }

        Ok(())
    }
}
