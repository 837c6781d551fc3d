use gtld_census_domain::{DomainError, ParsedZone};
use std::path::Path;

/// Reads zone master-file text into NS delegations.
pub trait ZoneSource: Send + Sync {
    fn read_zone(&self, path: &Path, origin: &str) -> Result<ParsedZone, DomainError>;
}
