pub mod entity_repository;
pub mod zone_repository;

pub use entity_repository::{ChildTable, EntityRepository, RDataRow, Table, ZoneFileRow};
pub use zone_repository::SqliteZoneRepository;
