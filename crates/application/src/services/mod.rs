mod domain_enricher;
mod pattern_list;
mod zone_processor;

pub use domain_enricher::DomainEnricher;
pub use pattern_list::PatternList;
pub use zone_processor::{
    Bucket, ClassificationPatterns, ClassificationReport, ZoneClassification, ZoneProcessor,
};
