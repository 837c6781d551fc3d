//! gTLD census domain layer
pub mod config;
pub mod delegated_domain;
pub mod disposition;
pub mod errors;
pub mod nameserver;
pub mod ptr_entry;
pub mod record_type;
pub mod reverse_name;
pub mod zone_snapshot;
pub mod zone_source;

pub use config::{CliOverrides, Config, ConfigError};
pub use delegated_domain::DelegatedDomain;
pub use disposition::Disposition;
pub use errors::DomainError;
pub use nameserver::Nameserver;
pub use ptr_entry::PtrEntry;
pub use record_type::RecordType;
pub use reverse_name::reverse_pointer_name;
pub use zone_snapshot::ZoneSnapshot;
pub use zone_source::{NsDelegation, ParsedZone};
