use futures::stream::{self, StreamExt};
use gtld_census_domain::ZoneSnapshot;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::services::DomainEnricher;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    pub domains: usize,
    pub enriched: usize,
    pub with_ptrs: usize,
    pub failed: usize,
}

/// Runs reverse lookups across a whole zone with a bounded number in flight.
pub struct EnrichZoneUseCase {
    enricher: Arc<DomainEnricher>,
}

impl EnrichZoneUseCase {
    pub fn new(enricher: Arc<DomainEnricher>) -> Self {
        Self { enricher }
    }

    /// Each in-flight lookup owns exactly one domain. A domain whose lookup
    /// fails keeps whatever it had cached and is counted in `failed`.
    #[instrument(skip(self, zone), fields(origin = %zone.origin))]
    pub async fn execute(&self, zone: &mut ZoneSnapshot, concurrency: usize) -> EnrichmentSummary {
        let enricher = &self.enricher;
        let mut summary = EnrichmentSummary {
            domains: zone.domain_count(),
            ..EnrichmentSummary::default()
        };

        let outcomes: Vec<Option<bool>> = stream::iter(zone.domains_mut())
            .map(|domain| async move {
                let name = Arc::clone(&domain.name);
                match enricher.reverse_lookup(domain, false).await {
                    Ok(ptrs) => Some(!ptrs.is_empty()),
                    Err(e) => {
                        warn!(domain = %name, error = %e, "Reverse lookup failed");
                        None
                    }
                }
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                Some(has_ptrs) => {
                    summary.enriched += 1;
                    if has_ptrs {
                        summary.with_ptrs += 1;
                    }
                }
                None => summary.failed += 1,
            }
        }

        info!(
            domains = summary.domains,
            enriched = summary.enriched,
            with_ptrs = summary.with_ptrs,
            failed = summary.failed,
            "Zone enrichment finished"
        );

        summary
    }
}
