//! Plain CSV dumps. Domain and nameserver names never contain commas or
//! quotes, so fields are written unquoted.

use gtld_census_application::services::ZoneClassification;
use gtld_census_domain::ZoneSnapshot;
use std::io::{self, Write};

/// `bucket,domain`, buckets in precedence order, names sorted.
pub fn write_buckets<W: Write>(out: &mut W, classification: &ZoneClassification) -> io::Result<usize> {
    writeln!(out, "bucket,domain")?;
    let mut rows = 0;
    for (bucket, members) in classification.iter() {
        for name in members {
            writeln!(out, "{},{}", bucket, name)?;
            rows += 1;
        }
    }
    Ok(rows)
}

/// `nameserver,count`, busiest first.
pub fn write_nameservers<W: Write>(out: &mut W, zone: &ZoneSnapshot) -> io::Result<usize> {
    writeln!(out, "nameserver,count")?;
    let nameservers = zone.nameservers_by_count();
    for nameserver in &nameservers {
        writeln!(out, "{},{}", nameserver.name, nameserver.domain_count())?;
    }
    Ok(nameservers.len())
}

/// `domain,ptr1,ptr2,...` for every domain with at least one PTR, sorted by
/// domain name.
pub fn write_reverse_zone<W: Write>(out: &mut W, zone: &ZoneSnapshot) -> io::Result<usize> {
    let mut domains: Vec<_> = zone.domains().filter(|d| !d.ptrs.is_empty()).collect();
    domains.sort_by(|a, b| a.name.cmp(&b.name));

    for domain in &domains {
        write!(out, "{}", domain.name)?;
        for ptr in &domain.ptrs {
            write!(out, ",{}", ptr.reverse_name)?;
        }
        writeln!(out)?;
    }
    Ok(domains.len())
}
