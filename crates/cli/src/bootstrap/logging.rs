use gtld_census_domain::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries reports and CSV.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_ids(false)
        .with_level(true);

    if config.logging.json {
        builder.json().with_target(true).init();
    } else {
        builder.with_target(true).with_ansi(true).init();
    }

    info!("Logging initialized at level: {}", config.logging.level);
}
