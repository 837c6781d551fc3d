mod dns_resolver;
mod zone_repository;
mod zone_source;

pub use dns_resolver::{AbsenceReason, DnsResolver, LookupOutcome};
pub use zone_repository::{ZoneRepository, ZoneSummary};
pub use zone_source::ZoneSource;
