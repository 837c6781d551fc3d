use serde::{Deserialize, Serialize};

/// Pattern list files, one regular expression per line.
///
/// Any list left unset is treated as empty and its bucket stays empty.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatternsConfig {
    #[serde(default = "default_parked_nameservers")]
    pub parked_nameservers: Option<String>,

    #[serde(default)]
    pub blocked_nameservers: Option<String>,

    #[serde(default)]
    pub parked_ptr: Option<String>,

    #[serde(default)]
    pub expired_ptr: Option<String>,

    #[serde(default)]
    pub other_inactive_nameservers: Option<String>,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            parked_nameservers: default_parked_nameservers(),
            blocked_nameservers: None,
            parked_ptr: None,
            expired_ptr: None,
            other_inactive_nameservers: None,
        }
    }
}

fn default_parked_nameservers() -> Option<String> {
    Some("data/parking_nameservers.txt".to_string())
}
