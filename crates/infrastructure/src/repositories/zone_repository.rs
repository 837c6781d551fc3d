use async_trait::async_trait;
use gtld_census_application::ports::{ZoneRepository, ZoneSummary};
use gtld_census_domain::{
    DelegatedDomain, DomainError, Nameserver, PtrEntry, ZoneSnapshot,
};
use rustc_hash::FxHashMap;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use super::entity_repository::{
    EmptyRRSetRow, EntityRepository, RDataRow, Table, ZoneFileRow,
};

type PtrKey = (IpAddr, Arc<str>);

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!(error = %e, "{}", context);
        DomainError::DatabaseError(e.to_string())
    }
}

/// Stores zone snapshots in SQLite, one transaction per write unit.
pub struct SqliteZoneRepository {
    pool: SqlitePool,
}

impl SqliteZoneRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Writes one domain with its nameserver links, PTRs and cached record
    /// values; cached absences are kept as marker rows. `nameserver_ids` and
    /// `ptr_ids` carry ids already written in this zone; missing entries are
    /// looked up or inserted and then added.
    async fn write_domain(
        conn: &mut SqliteConnection,
        zone_id: i64,
        domain: &mut DelegatedDomain,
        nameserver_ids: &mut FxHashMap<Arc<str>, i64>,
        ptr_ids: &mut FxHashMap<PtrKey, i64>,
    ) -> Result<i64, DomainError> {
        let domain_id = EntityRepository::<DelegatedDomain>::insert(conn, zone_id, domain).await?;
        domain.id = Some(domain_id);
        domain.zone_id = Some(zone_id);

        for nameserver in &domain.nameservers {
            let nameserver_id = match nameserver_ids.get(nameserver) {
                Some(id) => *id,
                None => {
                    // Seen only through a live lookup, not in the zone's own tally
                    let entry = Nameserver::with_count(Arc::clone(nameserver), 1);
                    let id = EntityRepository::insert(conn, zone_id, &entry).await?;
                    nameserver_ids.insert(Arc::clone(nameserver), id);
                    id
                }
            };

            sqlx::query(
                "INSERT OR IGNORE INTO domain_nameservers (domain_id, nameserver_id) VALUES (?, ?)",
            )
            .bind(domain_id)
            .bind(nameserver_id)
            .execute(&mut *conn)
            .await
            .map_err(db_error("Failed to link domain to nameserver"))?;
        }

        let mut stored = BTreeSet::new();
        for ptr in &domain.ptrs {
            let ptr_id = Self::ptr_id(conn, zone_id, ptr, ptr_ids).await?;

            sqlx::query(
                "INSERT OR IGNORE INTO domain_ptr_records (domain_id, ptr_record_id) VALUES (?, ?)",
            )
            .bind(domain_id)
            .bind(ptr_id)
            .execute(&mut *conn)
            .await
            .map_err(db_error("Failed to link domain to PTR record"))?;

            let mut ptr = ptr.clone();
            ptr.id = Some(ptr_id);
            ptr.zone_id = Some(zone_id);
            ptr.domain_id = Some(domain_id);
            stored.insert(ptr);
        }
        domain.ptrs = stored;

        for (record_type, values) in domain.records() {
            if values.is_empty() {
                let row = EmptyRRSetRow {
                    id: None,
                    domain_id,
                    record_type: *record_type,
                };
                EntityRepository::insert(conn, domain_id, &row).await?;
                continue;
            }
            for value in values {
                let row = RDataRow {
                    id: None,
                    domain_id,
                    record_type: *record_type,
                    value: value.clone(),
                };
                EntityRepository::insert(conn, domain_id, &row).await?;
            }
        }

        Ok(domain_id)
    }

    /// PTR rows are shared by every domain of a zone that resolved to the
    /// same (address, name) pair.
    async fn ptr_id(
        conn: &mut SqliteConnection,
        zone_id: i64,
        ptr: &PtrEntry,
        ptr_ids: &mut FxHashMap<PtrKey, i64>,
    ) -> Result<i64, DomainError> {
        let key = (ptr.ip_address, Arc::clone(&ptr.reverse_name));
        if let Some(id) = ptr_ids.get(&key) {
            return Ok(*id);
        }

        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM ptr_records
             WHERE zone_file_id = ? AND ip_address = ? AND reverse_lookup_name = ?",
        )
        .bind(zone_id)
        .bind(ptr.ip_address.to_string())
        .bind(&*ptr.reverse_name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error("Failed to look up PTR record"))?;

        let id = match existing {
            Some((id,)) => id,
            None => EntityRepository::insert(conn, zone_id, ptr).await?,
        };
        ptr_ids.insert(key, id);
        Ok(id)
    }

    /// Fills nameserver names, PTRs and record values into a domain read back
    /// bare. Nameserver names are shared with `shared_names` when given.
    async fn attach_children(
        conn: &mut SqliteConnection,
        domain_id: i64,
        domain: &mut DelegatedDomain,
        shared_names: Option<&FxHashMap<Arc<str>, Nameserver>>,
    ) -> Result<(), DomainError> {
        let nameservers: Vec<(String,)> = sqlx::query_as(
            "SELECT n.nameserver FROM domain_nameservers dn
             JOIN nameservers n ON n.id = dn.nameserver_id
             WHERE dn.domain_id = ?",
        )
        .bind(domain_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error("Failed to query domain nameservers"))?;

        for (name,) in nameservers {
            let shared = shared_names
                .and_then(|known| known.get(name.as_str()))
                .map(|ns| Arc::clone(&ns.name))
                .unwrap_or_else(|| Arc::from(name));
            domain.add_nameserver(shared);
        }

        let ptr_rows: Vec<(i64, i64, String, String)> = sqlx::query_as(
            "SELECT p.id, p.zone_file_id, p.ip_address, p.reverse_lookup_name
             FROM domain_ptr_records dp
             JOIN ptr_records p ON p.id = dp.ptr_record_id
             WHERE dp.domain_id = ?",
        )
        .bind(domain_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error("Failed to query domain PTR records"))?;

        for row in ptr_rows {
            let mut ptr = PtrEntry::from_row(row)?;
            ptr.domain_id = Some(domain_id);
            domain.ptrs.insert(ptr);
        }

        for row in EntityRepository::<RDataRow>::fetch_all_for_parent(conn, domain_id).await? {
            domain.push_record(row.record_type, row.value);
        }
        for row in EntityRepository::<EmptyRRSetRow>::fetch_all_for_parent(conn, domain_id).await? {
            domain.cache_records(row.record_type, BTreeSet::new());
        }

        Ok(())
    }
}

#[async_trait]
impl ZoneRepository for SqliteZoneRepository {
    #[instrument(skip(self, zone), fields(origin = %zone.origin))]
    async fn save_zone(&self, zone: &mut ZoneSnapshot) -> Result<i64, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin zone transaction"))?;

        let row = ZoneFileRow {
            id: None,
            origin: Arc::clone(&zone.origin),
            soa_serial: zone.soa_serial,
        };
        let zone_id = EntityRepository::insert_root(&mut tx, &row).await?;
        zone.id = Some(zone_id);

        let mut nameserver_ids: FxHashMap<Arc<str>, i64> = FxHashMap::default();
        for nameserver in zone.nameservers_mut() {
            let id = EntityRepository::insert(&mut tx, zone_id, &*nameserver).await?;
            nameserver.id = Some(id);
            nameserver.zone_id = Some(zone_id);
            nameserver_ids.insert(Arc::clone(&nameserver.name), id);
        }

        let mut ptr_ids: FxHashMap<PtrKey, i64> = FxHashMap::default();
        for domain in zone.domains_mut() {
            Self::write_domain(&mut tx, zone_id, domain, &mut nameserver_ids, &mut ptr_ids)
                .await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit zone transaction"))?;

        debug!(
            zone_id = zone_id,
            nameservers = nameserver_ids.len(),
            ptrs = ptr_ids.len(),
            "Zone written"
        );

        Ok(zone_id)
    }

    #[instrument(skip(self))]
    async fn load_zone(&self, id: i64) -> Result<Option<ZoneSnapshot>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;

        let row = match EntityRepository::<ZoneFileRow>::fetch_by_id(&mut conn, id).await? {
            Some(row) => row,
            None => return Ok(None),
        };

        let mut zone = ZoneSnapshot::new(row.origin, row.soa_serial);
        zone.id = row.id;

        for nameserver in EntityRepository::<Nameserver>::fetch_all_for_parent(&mut conn, id).await? {
            zone.insert_nameserver(nameserver)?;
        }

        let shared: FxHashMap<Arc<str>, Nameserver> = zone
            .nameservers()
            .map(|ns| (Arc::clone(&ns.name), ns.clone()))
            .collect();

        for mut domain in
            EntityRepository::<DelegatedDomain>::fetch_all_for_parent(&mut conn, id).await?
        {
            let domain_id = domain.id.ok_or_else(|| {
                DomainError::InvariantViolation("domain row without id".to_string())
            })?;
            Self::attach_children(&mut conn, domain_id, &mut domain, Some(&shared)).await?;
            zone.insert_domain(domain)?;
        }

        Ok(Some(zone))
    }

    #[instrument(skip(self, domain), fields(domain = %domain.name))]
    async fn save_domain(
        &self,
        zone_id: i64,
        domain: &mut DelegatedDomain,
    ) -> Result<i64, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin domain transaction"))?;

        let mut nameserver_ids: FxHashMap<Arc<str>, i64> =
            EntityRepository::<Nameserver>::fetch_all_for_parent(&mut tx, zone_id)
                .await?
                .into_iter()
                .filter_map(|ns| Some((ns.name, ns.id?)))
                .collect();
        let mut ptr_ids: FxHashMap<PtrKey, i64> = FxHashMap::default();

        let domain_id =
            Self::write_domain(&mut tx, zone_id, domain, &mut nameserver_ids, &mut ptr_ids).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit domain transaction"))?;

        Ok(domain_id)
    }

    #[instrument(skip(self))]
    async fn load_domain(&self, id: i64) -> Result<Option<DelegatedDomain>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;

        let mut domain = match EntityRepository::<DelegatedDomain>::fetch_by_id(&mut conn, id).await? {
            Some(domain) => domain,
            None => return Ok(None),
        };
        Self::attach_children(&mut conn, id, &mut domain, None).await?;

        Ok(Some(domain))
    }

    #[instrument(skip(self))]
    async fn list_zones(&self) -> Result<Vec<ZoneSummary>, DomainError> {
        let rows: Vec<(i64, String, Option<i64>, i64)> = sqlx::query_as(
            "SELECT z.id, z.origin, z.soa_serial, COUNT(d.id)
             FROM zone_files z
             LEFT JOIN domains d ON d.zone_file_id = z.id
             GROUP BY z.id, z.origin, z.soa_serial
             ORDER BY z.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list zones"))?;

        Ok(rows
            .into_iter()
            .map(|(id, origin, soa_serial, count)| ZoneSummary {
                id,
                origin,
                soa_serial: soa_serial.and_then(|s| u32::try_from(s).ok()),
                domain_count: count.max(0) as u64,
            })
            .collect())
    }
}
