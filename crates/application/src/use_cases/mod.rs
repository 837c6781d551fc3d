pub mod zones;

pub use zones::{
    BuildZoneUseCase, ClassifyZoneUseCase, EnrichZoneUseCase, EnrichmentSummary,
    ListZonesUseCase, LoadZoneUseCase, SaveZoneUseCase,
};
