use clap::{Parser, ValueEnum};
use shortcut_storage::PostgresSettings;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "SHORTCUT_LISTEN_ADDR";
pub const ENV_ENV: &str = "SHORTCUT_ENV";
pub const STORAGE_BACKEND_ENV: &str = "SHORTCUT_STORAGE_BACKEND";
pub const PG_HOST_ENV: &str = "SHORTCUT_PG_HOST";
pub const PG_PORT_ENV: &str = "SHORTCUT_PG_PORT";
pub const PG_USER_ENV: &str = "SHORTCUT_PG_USER";
pub const PG_PASSWORD_ENV: &str = "SHORTCUT_PG_PASSWORD";
pub const PG_DATABASE_ENV: &str = "SHORTCUT_PG_DATABASE";
pub const PG_MAX_CONNECTIONS_ENV: &str = "SHORTCUT_PG_MAX_CONNECTIONS";
pub const REQUEST_TIMEOUT_ENV: &str = "SHORTCUT_REQUEST_TIMEOUT";
pub const STORE_TIMEOUT_ENV: &str = "SHORTCUT_STORE_TIMEOUT";
pub const ALIAS_LENGTH_ENV: &str = "SHORTCUT_ALIAS_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "SHORTCUT_MAX_ATTEMPTS";
pub const AUTH_USER_ENV: &str = "SHORTCUT_AUTH_USER";
pub const AUTH_PASSWORD_ENV: &str = "SHORTCUT_AUTH_PASSWORD";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "postgres")]
    Postgres,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Postgres => write!(f, "postgres"),
        }
    }
}

/// Deployment environment; selects the log format and default level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvArg {
    Local,
    Dev,
    Prod,
}

impl Display for EnvArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvArg::Local => write!(f, "local"),
            EnvArg::Dev => write!(f, "dev"),
            EnvArg::Prod => write!(f, "prod"),
        }
    }
}

fn parse_duration(value: &str) -> Result<Duration, String> {
    let signed: jiff::SignedDuration = value
        .parse()
        .map_err(|e| format!("invalid duration '{value}': {e}"))?;
    Duration::try_from(signed).map_err(|e| format!("invalid duration '{value}': {e}"))
}

#[derive(Debug, Parser)]
#[command(name = "shortcut")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(long, env = ENV_ENV, value_enum, default_value_t = EnvArg::Local)]
    pub env: EnvArg,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = PG_HOST_ENV, default_value = "localhost")]
    pub pg_host: String,

    #[arg(long, env = PG_PORT_ENV, default_value_t = 5432)]
    pub pg_port: u16,

    #[arg(long, env = PG_USER_ENV, default_value = "postgres")]
    pub pg_user: String,

    #[arg(long, env = PG_PASSWORD_ENV, default_value = "password", hide_env_values = true)]
    pub pg_password: String,

    #[arg(long, env = PG_DATABASE_ENV, default_value = "url_shortener")]
    pub pg_database: String,

    #[arg(long, env = PG_MAX_CONNECTIONS_ENV, default_value_t = 10)]
    pub pg_max_connections: u32,

    #[arg(long, env = REQUEST_TIMEOUT_ENV, default_value = "4s", value_parser = parse_duration)]
    pub request_timeout: Duration,

    #[arg(long, env = STORE_TIMEOUT_ENV, default_value = "3s", value_parser = parse_duration)]
    pub store_timeout: Duration,

    #[arg(long, env = ALIAS_LENGTH_ENV, default_value_t = 7)]
    pub alias_length: usize,

    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    #[arg(long, env = AUTH_USER_ENV)]
    pub auth_user: String,

    #[arg(long, env = AUTH_PASSWORD_ENV, hide_env_values = true)]
    pub auth_password: String,
}

impl CLI {
    pub fn postgres_settings(&self) -> PostgresSettings {
        PostgresSettings::builder()
            .host(self.pg_host.as_str())
            .port(self.pg_port)
            .user(self.pg_user.as_str())
            .password(self.pg_password.as_str())
            .database(self.pg_database.as_str())
            .max_connections(self.pg_max_connections)
            .acquire_timeout(self.store_timeout)
            .build()
    }
}
