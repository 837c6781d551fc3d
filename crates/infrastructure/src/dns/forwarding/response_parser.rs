use super::record_type_map::RecordTypeMapper;
use gtld_census_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, ResponseCode};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Presentation-format rdata of the answers matching the queried type.
    /// CNAME hops and other types in the answer section are left out.
    pub answers: Vec<String>,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8], queried: RecordType) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let answers: Vec<String> = message
            .answers
            .iter()
            .filter(|record| RecordTypeMapper::from_hickory(record.record_type()) == Some(queried))
            .map(|record| record.data.to_string())
            .collect();

        let response = DnsResponse {
            id: message.metadata.id,
            rcode: message.metadata.response_code,
            truncated: message.metadata.truncation,
            answers,
        };

        debug!(
            rcode = ?response.rcode,
            answers = response.answers.len(),
            truncated = response.truncated,
            "DNS response parsed"
        );

        Ok(response)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
