use anyhow::Result;
use tracing_subscriber::EnvFilter;
use url_shortener::config::{self, Environment};
use url_shortener::server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    configure_tracing(config.env);

    tracing::info!(env = %config.env, "starting url-shortener");
    tracing::debug!("debug logging enabled");
    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber: text for `local`, JSON otherwise.
/// `RUST_LOG` takes precedence over the environment's default level.
fn configure_tracing(env: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env.default_log_level()));

    if env.json_logs() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
