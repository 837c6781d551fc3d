//! Configuration for gtld-census
//!
//! - `root`: Main configuration and CLI overrides
//! - `dns`: Upstream resolvers and enrichment settings
//! - `database`: SQLite store location
//! - `logging`: Logging settings
//! - `patterns`: Pattern list files used by the classifier
//! - `errors`: Configuration errors

pub mod database;
pub mod dns;
pub mod errors;
pub mod logging;
pub mod patterns;
pub mod root;

pub use database::DatabaseConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use patterns::PatternsConfig;
pub use root::{CliOverrides, Config};
