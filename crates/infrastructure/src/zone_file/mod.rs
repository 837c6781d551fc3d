//! Zone files scanned with `domain`'s in-place master-file scanner.
//!
//! Only the SOA serial and NS records below the apex are kept; every other
//! record is scanned and dropped.

use domain::base::name::{Name, ToName};
use domain::rdata::ZoneRecordData;
use domain::zonefile::inplace::{Entry, Zonefile};
use gtld_census_application::ports::ZoneSource;
use gtld_census_domain::{DomainError, NsDelegation, ParsedZone};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Reads zone files from disk into [`ParsedZone`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZoneFileReader;

impl ZoneFileReader {
    pub fn new() -> Self {
        Self
    }

    /// Parses zone text already in memory.
    pub fn read_str(&self, text: &str, origin: &str) -> Result<ParsedZone, DomainError> {
        collect_delegations(Zonefile::from(text), origin)
    }
}

impl ZoneSource for ZoneFileReader {
    fn read_zone(&self, path: &Path, origin: &str) -> Result<ParsedZone, DomainError> {
        let io_error = |e: std::io::Error| DomainError::IoError(format!("{}: {}", path.display(), e));

        let mut file = File::open(path).map_err(io_error)?;
        let zonefile = Zonefile::load(&mut file).map_err(io_error)?;
        let zone = collect_delegations(zonefile, origin)?;

        info!(
            path = %path.display(),
            origin = %zone.origin,
            delegations = zone.delegations.len(),
            soa_serial = ?zone.soa_serial,
            "Zone file read"
        );
        Ok(zone)
    }
}

fn collect_delegations(mut zonefile: Zonefile, origin: &str) -> Result<ParsedZone, DomainError> {
    let apex = Name::bytes_from_str(origin.trim()).map_err(|e| {
        DomainError::InvalidDomainName(format!("Invalid origin '{}': {}", origin, e))
    })?;
    zonefile.set_origin(apex.clone());

    let mut zone = ParsedZone {
        origin: fully_qualified(&apex),
        ..ParsedZone::default()
    };
    let mut skipped = 0usize;

    for entry in zonefile {
        let record = match entry.map_err(|e| DomainError::ZoneParse(e.to_string()))? {
            Entry::Record(record) => record,
            Entry::Include { .. } => {
                return Err(DomainError::ZoneParse(
                    "$INCLUDE is not supported".to_string(),
                ))
            }
        };

        match record.data() {
            ZoneRecordData::Soa(soa) if zone.soa_serial.is_none() => {
                zone.soa_serial = Some(soa.serial().into_int());
            }
            // Apex NS records are the zone's own servers
            ZoneRecordData::Ns(ns) if !record.owner().name_eq(&apex) => {
                zone.delegations.push(NsDelegation::new(
                    Arc::from(fully_qualified(record.owner())),
                    Arc::from(fully_qualified(ns.nsdname())),
                ));
            }
            _ => skipped += 1,
        }
    }

    debug!(skipped = skipped, "Non-delegation records ignored");
    Ok(zone)
}

fn fully_qualified(name: &impl ToName) -> String {
    let name = name.to_bytes();
    if name.is_root() {
        ".".to_string()
    } else {
        format!("{}.", name)
    }
}
