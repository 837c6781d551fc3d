use crate::dns::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::transport::Transport;
use async_trait::async_trait;
use gtld_census_application::ports::{AbsenceReason, DnsResolver, LookupOutcome};
use gtld_census_domain::config::DnsConfig;
use gtld_census_domain::{ConfigError, DomainError, RecordType};
use hickory_proto::op::ResponseCode;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Asks a fixed list of recursive resolvers, in order, until one of them
/// gives a definite answer.
///
/// NOERROR and NXDOMAIN are definite. Any other rcode, and any transport
/// failure, moves on to the next server. If no server answered definitely
/// but at least one answered with a failing rcode, the name is treated as
/// unresolvable (`NoNameservers`), even when other servers timed out. Only
/// when every server failed at the transport level is the last transport
/// error returned.
pub struct UpstreamResolver {
    servers: Vec<SocketAddr>,
    timeout: Duration,
    use_tcp_fallback: bool,
}

impl UpstreamResolver {
    pub fn new(servers: Vec<SocketAddr>, timeout: Duration, use_tcp_fallback: bool) -> Self {
        Self {
            servers,
            timeout,
            use_tcp_fallback,
        }
    }

    pub fn from_config(config: &DnsConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.upstream_addrs()?,
            Duration::from_millis(config.query_timeout_ms),
            config.use_tcp_fallback,
        ))
    }

    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }

    async fn exchange(
        &self,
        server: SocketAddr,
        name: &str,
        record_type: RecordType,
    ) -> Result<DnsResponse, DomainError> {
        let (id, query) = MessageBuilder::build_query_with_id(name, record_type)?;

        let mut transport = Transport::udp(server);
        let mut response = self.send(&transport, &query, id, record_type).await?;

        if response.truncated && self.use_tcp_fallback {
            debug!(server = %server, name = %name, "Truncated UDP answer, retrying over TCP");
            transport = Transport::tcp(server);
            response = self.send(&transport, &query, id, record_type).await?;
        }

        Ok(response)
    }

    async fn send(
        &self,
        transport: &Transport,
        query: &[u8],
        id: u16,
        record_type: RecordType,
    ) -> Result<DnsResponse, DomainError> {
        let reply = transport.send(query, self.timeout).await?;
        let response = ResponseParser::parse(&reply.bytes, record_type)?;

        if response.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} response id {} does not match query id {}",
                reply.protocol_used, response.id, id
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl DnsResolver for UpstreamResolver {
    #[instrument(skip(self), level = "debug")]
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<LookupOutcome, DomainError> {
        let mut failed_rcodes = 0usize;
        let mut last_error: Option<DomainError> = None;

        for &server in &self.servers {
            match self.exchange(server, name, record_type).await {
                Ok(response) => match response.rcode {
                    ResponseCode::NoError if response.answers.is_empty() => {
                        return Ok(LookupOutcome::Absent(AbsenceReason::NoAnswer));
                    }
                    ResponseCode::NoError => return Ok(LookupOutcome::Found(response.answers)),
                    ResponseCode::NXDomain => {
                        return Ok(LookupOutcome::Absent(AbsenceReason::NxDomain));
                    }
                    rcode => {
                        debug!(
                            server = %server,
                            rcode = ResponseParser::rcode_to_status(rcode),
                            "Upstream refused to answer"
                        );
                        failed_rcodes += 1;
                    }
                },
                Err(e @ DomainError::InvalidDomainName(_)) => return Err(e),
                Err(e) => {
                    warn!(server = %server, error = %e, "Upstream query failed");
                    last_error = Some(e);
                }
            }
        }

        if failed_rcodes > 0 {
            return Ok(LookupOutcome::Absent(AbsenceReason::NoNameservers));
        }

        Err(last_error.unwrap_or_else(|| DomainError::Transport {
            server: "none".to_string(),
            reason: "no upstream servers configured".to_string(),
        }))
    }
}
