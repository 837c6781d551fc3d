use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An authoritative server seen in a zone's NS records.
///
/// Identity is the nameserver name alone; `domain_count` is payload and
/// only ever grows through [`Nameserver::record_delegation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nameserver {
    pub id: Option<i64>,
    pub zone_id: Option<i64>,
    pub name: Arc<str>,
    domain_count: u64,
}

impl Nameserver {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: None,
            zone_id: None,
            name: name.into(),
            domain_count: 0,
        }
    }

    /// Rebuilds a nameserver from storage with its recorded tally.
    pub fn with_count(name: impl Into<Arc<str>>, domain_count: u64) -> Self {
        Self {
            domain_count,
            ..Self::new(name)
        }
    }

    pub fn record_delegation(&mut self) {
        self.domain_count += 1;
    }

    pub fn domain_count(&self) -> u64 {
        self.domain_count
    }
}

impl PartialEq for Nameserver {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Nameserver {}

impl Hash for Nameserver {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
