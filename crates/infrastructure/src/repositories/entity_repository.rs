use gtld_census_domain::{
    DelegatedDomain, Disposition, DomainError, Nameserver, PtrEntry, RecordType,
};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite, SqliteConnection};
use std::marker::PhantomData;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::error;

pub type InsertQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// One entity kind stored in one table.
///
/// Implementors only declare their SQL and row mapping;
/// [`EntityRepository`] does the rest.
pub trait Table: Sized + Send + Sync {
    type Row: for<'r> FromRow<'r, SqliteRow> + Send + Unpin;

    const INSERT: &'static str;
    const SELECT_BY_ID: &'static str;

    fn bind_insert<'q>(&'q self, query: InsertQuery<'q>) -> InsertQuery<'q>;

    fn from_row(row: Self::Row) -> Result<Self, DomainError>;
}

/// A table whose rows belong to a parent row. `INSERT` takes the parent id
/// as its first parameter.
pub trait ChildTable: Table {
    const SELECT_BY_PARENT: &'static str;
}

pub struct EntityRepository<T> {
    _table: PhantomData<T>,
}

impl<T: Table> EntityRepository<T> {
    /// Inserts a row with no parent and returns its generated id.
    pub async fn insert_root(conn: &mut SqliteConnection, entity: &T) -> Result<i64, DomainError> {
        Self::execute_insert(conn, entity.bind_insert(sqlx::query(T::INSERT))).await
    }

    pub async fn fetch_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<T>, DomainError> {
        let row = sqlx::query_as::<_, T::Row>(T::SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!(error = %e, statement = T::SELECT_BY_ID, "Failed to query row by id");
                DomainError::DatabaseError(e.to_string())
            })?;

        row.map(T::from_row).transpose()
    }

    async fn execute_insert(
        conn: &mut SqliteConnection,
        query: InsertQuery<'_>,
    ) -> Result<i64, DomainError> {
        let result = query.execute(&mut *conn).await.map_err(|e| {
            error!(error = %e, statement = T::INSERT, "Failed to insert row");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.last_insert_rowid())
    }
}

impl<T: ChildTable> EntityRepository<T> {
    pub async fn insert(
        conn: &mut SqliteConnection,
        parent_id: i64,
        entity: &T,
    ) -> Result<i64, DomainError> {
        let query = sqlx::query(T::INSERT).bind(parent_id);
        Self::execute_insert(conn, entity.bind_insert(query)).await
    }

    pub async fn fetch_all_for_parent(
        conn: &mut SqliteConnection,
        parent_id: i64,
    ) -> Result<Vec<T>, DomainError> {
        let rows = sqlx::query_as::<_, T::Row>(T::SELECT_BY_PARENT)
            .bind(parent_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!(error = %e, statement = T::SELECT_BY_PARENT, "Failed to query rows by parent");
                DomainError::DatabaseError(e.to_string())
            })?;

        rows.into_iter().map(T::from_row).collect()
    }
}

// ============================================================================
// Tables
// ============================================================================

/// A row of `zone_files`, the root every other table hangs off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFileRow {
    pub id: Option<i64>,
    pub origin: Arc<str>,
    pub soa_serial: Option<u32>,
}

impl Table for ZoneFileRow {
    type Row = (i64, String, Option<i64>);

    const INSERT: &'static str = "INSERT INTO zone_files (origin, soa_serial) VALUES (?, ?)";
    const SELECT_BY_ID: &'static str = "SELECT id, origin, soa_serial FROM zone_files WHERE id = ?";

    fn bind_insert<'q>(&'q self, query: InsertQuery<'q>) -> InsertQuery<'q> {
        query
            .bind(&*self.origin)
            .bind(self.soa_serial.map(i64::from))
    }

    fn from_row((id, origin, soa_serial): Self::Row) -> Result<Self, DomainError> {
        let soa_serial = soa_serial
            .map(|serial| {
                u32::try_from(serial)
                    .map_err(|_| DomainError::DatabaseError(format!("bad SOA serial {}", serial)))
            })
            .transpose()?;

        Ok(Self {
            id: Some(id),
            origin: Arc::from(origin),
            soa_serial,
        })
    }
}

impl Table for Nameserver {
    type Row = (i64, i64, String, i64);

    const INSERT: &'static str =
        "INSERT INTO nameservers (zone_file_id, nameserver, domain_count) VALUES (?, ?, ?)";
    const SELECT_BY_ID: &'static str =
        "SELECT id, zone_file_id, nameserver, domain_count FROM nameservers WHERE id = ?";

    fn bind_insert<'q>(&'q self, query: InsertQuery<'q>) -> InsertQuery<'q> {
        query.bind(&*self.name).bind(self.domain_count() as i64)
    }

    fn from_row((id, zone_id, name, count): Self::Row) -> Result<Self, DomainError> {
        let mut nameserver = Nameserver::with_count(name, count.max(0) as u64);
        nameserver.id = Some(id);
        nameserver.zone_id = Some(zone_id);
        Ok(nameserver)
    }
}

impl ChildTable for Nameserver {
    const SELECT_BY_PARENT: &'static str =
        "SELECT id, zone_file_id, nameserver, domain_count FROM nameservers WHERE zone_file_id = ?";
}

impl Table for DelegatedDomain {
    type Row = (i64, i64, String, String);

    const INSERT: &'static str =
        "INSERT INTO domains (zone_file_id, domain_name, status) VALUES (?, ?, ?)";
    const SELECT_BY_ID: &'static str =
        "SELECT id, zone_file_id, domain_name, status FROM domains WHERE id = ?";

    fn bind_insert<'q>(&'q self, query: InsertQuery<'q>) -> InsertQuery<'q> {
        query.bind(&*self.name).bind(self.disposition.as_str())
    }

    fn from_row((id, zone_id, name, status): Self::Row) -> Result<Self, DomainError> {
        let mut domain = DelegatedDomain::new(name);
        domain.id = Some(id);
        domain.zone_id = Some(zone_id);
        domain.disposition = status
            .parse::<Disposition>()
            .map_err(|_| DomainError::DatabaseError(format!("unknown domain status '{}'", status)))?;
        Ok(domain)
    }
}

impl ChildTable for DelegatedDomain {
    const SELECT_BY_PARENT: &'static str =
        "SELECT id, zone_file_id, domain_name, status FROM domains WHERE zone_file_id = ?";
}

impl Table for PtrEntry {
    type Row = (i64, i64, String, String);

    const INSERT: &'static str =
        "INSERT INTO ptr_records (zone_file_id, ip_address, reverse_lookup_name) VALUES (?, ?, ?)";
    const SELECT_BY_ID: &'static str =
        "SELECT id, zone_file_id, ip_address, reverse_lookup_name FROM ptr_records WHERE id = ?";

    fn bind_insert<'q>(&'q self, query: InsertQuery<'q>) -> InsertQuery<'q> {
        query
            .bind(self.ip_address.to_string())
            .bind(&*self.reverse_name)
    }

    fn from_row((id, zone_id, ip, name): Self::Row) -> Result<Self, DomainError> {
        let ip: IpAddr = ip
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(ip.clone()))?;
        let mut ptr = PtrEntry::new(ip, name);
        ptr.id = Some(id);
        ptr.zone_id = Some(zone_id);
        Ok(ptr)
    }
}

impl ChildTable for PtrEntry {
    const SELECT_BY_PARENT: &'static str =
        "SELECT id, zone_file_id, ip_address, reverse_lookup_name FROM ptr_records WHERE zone_file_id = ?";
}

/// One cached record value of a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RDataRow {
    pub id: Option<i64>,
    pub domain_id: i64,
    pub record_type: RecordType,
    pub value: String,
}

impl Table for RDataRow {
    type Row = (i64, i64, String, String);

    const INSERT: &'static str =
        "INSERT INTO domain_rdata (domain_id, rrtype, rdata) VALUES (?, ?, ?)";
    const SELECT_BY_ID: &'static str =
        "SELECT id, domain_id, rrtype, rdata FROM domain_rdata WHERE id = ?";

    fn bind_insert<'q>(&'q self, query: InsertQuery<'q>) -> InsertQuery<'q> {
        query.bind(self.record_type.as_str()).bind(self.value.as_str())
    }

    fn from_row((id, domain_id, rrtype, value): Self::Row) -> Result<Self, DomainError> {
        Ok(Self {
            id: Some(id),
            domain_id,
            record_type: rrtype.parse()?,
            value,
        })
    }
}

impl ChildTable for RDataRow {
    const SELECT_BY_PARENT: &'static str =
        "SELECT id, domain_id, rrtype, rdata FROM domain_rdata WHERE domain_id = ? ORDER BY id";
}

/// A record type that was looked up for a domain and had no values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyRRSetRow {
    pub id: Option<i64>,
    pub domain_id: i64,
    pub record_type: RecordType,
}

impl Table for EmptyRRSetRow {
    type Row = (i64, i64, String);

    const INSERT: &'static str =
        "INSERT OR IGNORE INTO domain_empty_rrsets (domain_id, rrtype) VALUES (?, ?)";
    const SELECT_BY_ID: &'static str =
        "SELECT id, domain_id, rrtype FROM domain_empty_rrsets WHERE id = ?";

    fn bind_insert<'q>(&'q self, query: InsertQuery<'q>) -> InsertQuery<'q> {
        query.bind(self.record_type.as_str())
    }

    fn from_row((id, domain_id, rrtype): Self::Row) -> Result<Self, DomainError> {
        Ok(Self {
            id: Some(id),
            domain_id,
            record_type: rrtype.parse()?,
        })
    }
}

impl ChildTable for EmptyRRSetRow {
    const SELECT_BY_PARENT: &'static str =
        "SELECT id, domain_id, rrtype FROM domain_empty_rrsets WHERE domain_id = ?";
}
