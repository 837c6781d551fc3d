use async_trait::async_trait;
use gtld_census_domain::{reverse_pointer_name, DomainError, RecordType};
use std::fmt;
use std::net::IpAddr;

/// Why a lookup produced nothing. All three are confirmed answers from the
/// DNS, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsenceReason {
    NxDomain,
    NoAnswer,
    NoNameservers,
}

impl fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AbsenceReason::NxDomain => "NXDOMAIN",
            AbsenceReason::NoAnswer => "no answer",
            AbsenceReason::NoNameservers => "no nameservers",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Textual rdata of every answer of the queried type.
    Found(Vec<String>),
    Absent(AbsenceReason),
}

/// Upstream DNS as seen by enrichment.
///
/// `Ok(Absent(..))` means the DNS answered that there is nothing there;
/// `Err` means no usable answer could be obtained at all.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<LookupOutcome, DomainError>;

    fn reverse_name(&self, ip: IpAddr) -> String {
        reverse_pointer_name(ip)
    }
}
