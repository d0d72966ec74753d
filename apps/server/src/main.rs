use anyhow::Context;
use iredo::domain::config::ApiConfig;
use iredo::kernel::config::load_config;
use iredo_logger::{LevelFilter, Logger};
use iredo_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first: the logger's level and file path come from it.
    let cfg: ApiConfig =
        load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let level = cfg
        .log
        .level
        .parse::<LevelFilter>()
        .with_context(|| format!("Invalid log level '{}'", cfg.log.level))?;

    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level);
    let _log = match &cfg.log.path {
        Some(path) => builder.path(path).init()?,
        None => builder.init()?,
    };

    // Config loading happened before any subscriber existed; restate the
    // outcome now that logs go somewhere.
    tracing::info!(
        environment = ?cfg.server.environment,
        port = cfg.server.port,
        log_level = %cfg.log.level,
        "Configuration loaded"
    );

    Server::builder().config(cfg).build()?.run().await
}
