mod build_zone;
mod classify_zone;
mod enrich_zone;
mod list_zones;
mod load_zone;
mod save_zone;

pub use build_zone::BuildZoneUseCase;
pub use classify_zone::ClassifyZoneUseCase;
pub use enrich_zone::{EnrichZoneUseCase, EnrichmentSummary};
pub use list_zones::ListZonesUseCase;
pub use load_zone::LoadZoneUseCase;
pub use save_zone::SaveZoneUseCase;
