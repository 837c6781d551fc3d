use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{Disposition, PtrEntry, RecordType};

/// A domain delegated by a zone, with everything the census learned about it.
///
/// Identity is the fully-qualified name only (case-sensitive, trailing dot
/// included). Nameservers are held by name; the owning [`crate::ZoneSnapshot`]
/// keeps the shared [`crate::Nameserver`] entries with their tallies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegatedDomain {
    pub id: Option<i64>,
    pub zone_id: Option<i64>,
    pub name: Arc<str>,
    pub nameservers: BTreeSet<Arc<str>>,
    pub ptrs: BTreeSet<PtrEntry>,
    pub disposition: Disposition,
    records: BTreeMap<RecordType, BTreeSet<String>>,
}

impl DelegatedDomain {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: None,
            zone_id: None,
            name: name.into(),
            nameservers: BTreeSet::new(),
            ptrs: BTreeSet::new(),
            disposition: Disposition::Unknown,
            records: BTreeMap::new(),
        }
    }

    pub fn add_nameserver(&mut self, nameserver: Arc<str>) -> bool {
        self.nameservers.insert(nameserver)
    }

    /// Cached answer for `record_type`, if a lookup was ever stored.
    ///
    /// `Some(empty)` is a remembered "no such record" and is as final as a
    /// non-empty answer.
    pub fn cached_records(&self, record_type: RecordType) -> Option<&BTreeSet<String>> {
        self.records.get(&record_type)
    }

    /// Replaces the cache entry for `record_type` and returns the stored set.
    pub fn cache_records(
        &mut self,
        record_type: RecordType,
        values: BTreeSet<String>,
    ) -> &BTreeSet<String> {
        self.records.insert(record_type, values);
        &self.records[&record_type]
    }

    /// Adds a single value to the cache, creating the entry if needed.
    pub fn push_record(&mut self, record_type: RecordType, value: impl Into<String>) {
        self.records
            .entry(record_type)
            .or_default()
            .insert(value.into());
    }

    pub fn records(&self) -> &BTreeMap<RecordType, BTreeSet<String>> {
        &self.records
    }

    /// True when at least one record type resolved to at least one value.
    pub fn has_rdata(&self) -> bool {
        self.records.values().any(|values| !values.is_empty())
    }

    /// Addresses from the cached A and AAAA answers, in cache order.
    pub fn cached_addresses(&self) -> impl Iterator<Item = &str> {
        [RecordType::A, RecordType::AAAA]
            .into_iter()
            .filter_map(|rt| self.records.get(&rt))
            .flat_map(|values| values.iter().map(String::as_str))
    }
}

impl PartialEq for DelegatedDomain {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for DelegatedDomain {}

impl Hash for DelegatedDomain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
