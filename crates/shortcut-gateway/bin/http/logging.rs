use crate::cli::EnvArg;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Installs the global subscriber. `RUST_LOG` overrides the default level.
///
/// `local` logs human-readable lines at debug, `dev` logs JSON at debug and
/// `prod` logs JSON at info.
pub fn init(env: EnvArg) -> Result<(), BoxError> {
    let default_level = match env {
        EnvArg::Local | EnvArg::Dev => "debug",
        EnvArg::Prod => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match env {
        EnvArg::Local => builder.try_init(),
        EnvArg::Dev | EnvArg::Prod => builder.json().try_init(),
    }
}
