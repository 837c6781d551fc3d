use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use super::ConfigError;

const DEFAULT_DNS_PORT: u16 = 53;

/// Upstream resolution settings used by enrichment lookups
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream recursive resolvers, "ip" or "ip:port"
    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,

    /// Per-query timeout in milliseconds (default: 2000)
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Reverse lookups in flight at once during zone enrichment (default: 32)
    #[serde(default = "default_enrichment_concurrency")]
    pub enrichment_concurrency: usize,

    /// Retry truncated UDP answers over TCP (default: true)
    #[serde(default = "default_true")]
    pub use_tcp_fallback: bool,
}

impl DnsConfig {
    /// Parses `upstream_servers`, defaulting the port to 53.
    pub fn upstream_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.upstream_servers
            .iter()
            .map(|server| parse_upstream(server))
            .collect()
    }
}

fn parse_upstream(server: &str) -> Result<SocketAddr, ConfigError> {
    let trimmed = server.trim();
    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }
    trimmed
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| ConfigError::Validation(format!("invalid upstream server '{}'", server)))
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_servers: default_upstream_servers(),
            query_timeout_ms: default_query_timeout_ms(),
            enrichment_concurrency: default_enrichment_concurrency(),
            use_tcp_fallback: true,
        }
    }
}

fn default_upstream_servers() -> Vec<String> {
    vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()]
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_enrichment_concurrency() -> usize {
    32
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_without_port_defaults_to_53() {
        let cfg = DnsConfig {
            upstream_servers: vec!["9.9.9.9".to_string(), "[2620:fe::fe]:5353".to_string()],
            ..DnsConfig::default()
        };

        let addrs = cfg.upstream_addrs().unwrap();
        assert_eq!(addrs[0], "9.9.9.9:53".parse().unwrap());
        assert_eq!(addrs[1], "[2620:fe::fe]:5353".parse().unwrap());
    }

    #[test]
    fn test_upstream_rejects_hostnames() {
        let cfg = DnsConfig {
            upstream_servers: vec!["dns.google".to_string()],
            ..DnsConfig::default()
        };
        assert!(cfg.upstream_addrs().is_err());
    }
}
