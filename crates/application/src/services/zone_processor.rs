use gtld_census_domain::{DelegatedDomain, DomainError};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::PatternList;

/// The seven disjoint outputs of a classification run, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Parked,
    Blocked,
    ReverseParked,
    ReverseExpired,
    OtherInactive,
    NoRdata,
    Unknown,
}

impl Bucket {
    pub const ALL: [Bucket; 7] = [
        Bucket::Parked,
        Bucket::Blocked,
        Bucket::ReverseParked,
        Bucket::ReverseExpired,
        Bucket::OtherInactive,
        Bucket::NoRdata,
        Bucket::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Parked => "parked",
            Bucket::Blocked => "blocked",
            Bucket::ReverseParked => "reverse_parked",
            Bucket::ReverseExpired => "reverse_expired",
            Bucket::OtherInactive => "other_inactive",
            Bucket::NoRdata => "no_rdata",
            Bucket::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five pattern lists a run can use. Unset lists are empty and their
/// bucket stays empty.
#[derive(Debug, Clone)]
pub struct ClassificationPatterns {
    pub parked_nameservers: PatternList,
    pub blocked_nameservers: PatternList,
    pub parked_ptr: PatternList,
    pub expired_ptr: PatternList,
    pub other_inactive_nameservers: PatternList,
}

impl Default for ClassificationPatterns {
    fn default() -> Self {
        Self {
            parked_nameservers: PatternList::empty("parked_nameservers"),
            blocked_nameservers: PatternList::empty("blocked_nameservers"),
            parked_ptr: PatternList::empty("parked_ptr"),
            expired_ptr: PatternList::empty("expired_ptr"),
            other_inactive_nameservers: PatternList::empty("other_inactive_nameservers"),
        }
    }
}

impl ClassificationPatterns {
    pub fn lists(&self) -> [&PatternList; 5] {
        [
            &self.parked_nameservers,
            &self.blocked_nameservers,
            &self.parked_ptr,
            &self.expired_ptr,
            &self.other_inactive_nameservers,
        ]
    }
}

enum Rule<'p> {
    Nameserver(&'p PatternList),
    Ptr(&'p PatternList),
    NoRdata,
}

impl Rule<'_> {
    fn applies(&self, domain: &DelegatedDomain) -> bool {
        match self {
            Rule::Nameserver(list) => list.matches_any(domain.nameservers.iter().map(|ns| &**ns)),
            Rule::Ptr(list) => list.matches_any(domain.ptrs.iter().map(|ptr| &*ptr.reverse_name)),
            Rule::NoRdata => !domain.has_rdata(),
        }
    }
}

/// Bucket membership for one run, keyed by domain name.
#[derive(Debug, Clone, Default)]
pub struct ZoneClassification {
    buckets: BTreeMap<Bucket, Vec<Arc<str>>>,
    pattern_list_sizes: Vec<(String, usize)>,
    total: usize,
}

impl ZoneClassification {
    pub fn members(&self, bucket: Bucket) -> &[Arc<str>] {
        self.buckets
            .get(&bucket)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.members(bucket).len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn bucket_of(&self, name: &str) -> Option<Bucket> {
        self.buckets
            .iter()
            .find(|(_, members)| members.iter().any(|member| &**member == name))
            .map(|(bucket, _)| *bucket)
    }

    /// Every bucket with its sorted members, in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[Arc<str>])> {
        Bucket::ALL
            .into_iter()
            .map(move |bucket| (bucket, self.members(bucket)))
    }

    pub fn report(&self) -> ClassificationReport {
        ClassificationReport {
            total: self.total,
            bucket_counts: self.iter().map(|(b, members)| (b, members.len())).collect(),
            pattern_list_sizes: self.pattern_list_sizes.clone(),
        }
    }

    /// Confirms the buckets are pairwise disjoint and cover `domains` exactly.
    pub fn check_partition(
        &self,
        domains: &FxHashMap<Arc<str>, DelegatedDomain>,
    ) -> Result<(), DomainError> {
        let mut seen: FxHashMap<&str, Bucket> = FxHashMap::default();
        for (bucket, members) in self.iter() {
            for name in members {
                if let Some(previous) = seen.insert(&**name, bucket) {
                    return Err(DomainError::InvariantViolation(format!(
                        "domain {} assigned to both {} and {}",
                        name, previous, bucket
                    )));
                }
                if !domains.contains_key(name) {
                    return Err(DomainError::InvariantViolation(format!(
                        "bucket {} holds {} which is not in the zone",
                        bucket, name
                    )));
                }
            }
        }
        if seen.len() != domains.len() {
            return Err(DomainError::InvariantViolation(format!(
                "{} of {} domains were classified",
                seen.len(),
                domains.len()
            )));
        }
        Ok(())
    }
}

/// Counts for display and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationReport {
    pub total: usize,
    pub bucket_counts: Vec<(Bucket, usize)>,
    pub pattern_list_sizes: Vec<(String, usize)>,
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "domains: {}", self.total)?;
        for (name, size) in &self.pattern_list_sizes {
            writeln!(f, "patterns {}: {}", name, size)?;
        }
        for (bucket, count) in &self.bucket_counts {
            writeln!(f, "{}: {}", bucket, count)?;
        }
        Ok(())
    }
}

/// Sorts a zone's domains into dispositions by sequential elimination.
///
/// Each rule only sees domains no earlier rule claimed, so a domain that
/// matches several lists lands in the first one. The caller's map is never
/// modified; the engine works on its own list of references.
pub struct ZoneProcessor {
    patterns: ClassificationPatterns,
}

impl ZoneProcessor {
    pub fn new(patterns: ClassificationPatterns) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &ClassificationPatterns {
        &self.patterns
    }

    pub fn process_zone_data(
        &self,
        domains: &FxHashMap<Arc<str>, DelegatedDomain>,
    ) -> ZoneClassification {
        let rules = [
            (Bucket::Parked, Rule::Nameserver(&self.patterns.parked_nameservers)),
            (Bucket::Blocked, Rule::Nameserver(&self.patterns.blocked_nameservers)),
            (Bucket::ReverseParked, Rule::Ptr(&self.patterns.parked_ptr)),
            (Bucket::ReverseExpired, Rule::Ptr(&self.patterns.expired_ptr)),
            (
                Bucket::OtherInactive,
                Rule::Nameserver(&self.patterns.other_inactive_nameservers),
            ),
            (Bucket::NoRdata, Rule::NoRdata),
        ];

        let mut remaining: Vec<&DelegatedDomain> = domains.values().collect();
        let mut buckets = BTreeMap::new();

        for (bucket, rule) in rules {
            let (matched, rest): (Vec<_>, Vec<_>) =
                remaining.into_iter().partition(|domain| rule.applies(domain));
            buckets.insert(bucket, sorted_names(matched));
            remaining = rest;
        }
        buckets.insert(Bucket::Unknown, sorted_names(remaining));

        ZoneClassification {
            buckets,
            pattern_list_sizes: self
                .patterns
                .lists()
                .iter()
                .map(|list| (list.name().to_string(), list.len()))
                .collect(),
            total: domains.len(),
        }
    }
}

fn sorted_names(domains: Vec<&DelegatedDomain>) -> Vec<Arc<str>> {
    let mut names: Vec<Arc<str>> = domains.into_iter().map(|d| Arc::clone(&d.name)).collect();
    names.sort();
    names
}
