use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Classification label carried by a domain.
///
/// The classification engine reports bucket membership on its own; this
/// field is the per-entity label and may lag behind a fresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disposition {
    #[default]
    Unknown,
    Parked,
    Blocked,
    Cname,
    CnameToOtherTld,
    Nxdomain,
    Active,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Unknown => "UNKNOWN",
            Disposition::Parked => "PARKED",
            Disposition::Blocked => "BLOCKED",
            Disposition::Cname => "CNAME",
            Disposition::CnameToOtherTld => "CNAME_TO_OTHER_TLD",
            Disposition::Nxdomain => "NXDOMAIN",
            Disposition::Active => "ACTIVE",
        }
    }

    pub fn all() -> &'static [Disposition] {
        &[
            Disposition::Unknown,
            Disposition::Parked,
            Disposition::Blocked,
            Disposition::Cname,
            Disposition::CnameToOtherTld,
            Disposition::Nxdomain,
            Disposition::Active,
        ]
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disposition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Disposition::all()
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::InvalidDisposition(s.to_string()))
    }
}
