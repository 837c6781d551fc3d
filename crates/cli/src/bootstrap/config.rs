use gtld_census_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logged separately because the subscriber is built from the loaded config.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        upstreams = ?config.dns.upstream_servers,
        timeout_ms = config.dns.query_timeout_ms,
        concurrency = config.dns.enrichment_concurrency,
        database = %config.database.path,
        "Configuration loaded"
    );
}
