use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::net::IpAddr;
use std::sync::Arc;

/// Result of one reverse lookup: the forward address and the name its PTR
/// record points at.
///
/// Two entries are the same only when both the address and the reverse
/// name match. The zone and domain ids are storage back-references and do
/// not take part in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PtrEntry {
    pub id: Option<i64>,
    pub zone_id: Option<i64>,
    pub domain_id: Option<i64>,
    pub ip_address: IpAddr,
    pub reverse_name: Arc<str>,
}

impl PtrEntry {
    pub fn new(ip_address: IpAddr, reverse_name: impl Into<Arc<str>>) -> Self {
        Self {
            id: None,
            zone_id: None,
            domain_id: None,
            ip_address,
            reverse_name: reverse_name.into(),
        }
    }

    fn key(&self) -> (&IpAddr, &str) {
        (&self.ip_address, &self.reverse_name)
    }
}

impl PartialEq for PtrEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PtrEntry {}

impl Hash for PtrEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for PtrEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PtrEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
