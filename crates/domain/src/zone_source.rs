use std::sync::Arc;

/// One NS record delegating `owner` to `nameserver`, both fully qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsDelegation {
    pub owner: Arc<str>,
    pub nameserver: Arc<str>,
}

impl NsDelegation {
    pub fn new(owner: impl Into<Arc<str>>, nameserver: impl Into<Arc<str>>) -> Self {
        Self {
            owner: owner.into(),
            nameserver: nameserver.into(),
        }
    }
}

/// What a zone-file parser hands over: the apex, its SOA serial and every
/// delegation found below the apex.
#[derive(Debug, Clone, Default)]
pub struct ParsedZone {
    pub origin: String,
    pub soa_serial: Option<u32>,
    pub delegations: Vec<NsDelegation>,
}
