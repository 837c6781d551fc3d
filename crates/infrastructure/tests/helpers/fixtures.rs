#![allow(dead_code)]
use gtld_census_infrastructure::database::create_pool;
use gtld_census_infrastructure::repositories::SqliteZoneRepository;
use sqlx::SqlitePool;
use std::io::Write;
use tempfile::NamedTempFile;

pub const SAMPLE_ZONE: &str = r#"$ORIGIN test.
$TTL 86400
@       IN  SOA a.nic.test. hostmaster.nic.test. (
            2024031501 ; serial
            1800       ; refresh
            900        ; retry
            604800     ; expire
            86400 )    ; minimum
        IN  NS  a.nic.test.
        IN  NS  b.nic.test.

; delegations
parked      NS  ns1.parkingcrew.net.
parked      NS  ns2.parkingcrew.net.
blocked 3600 IN NS ns1.blocked.example.
active  IN 3600 NS ns1.hoster.example.
            NS  ns2.hoster.example.
second      NS  ns1.hoster.example.
www.active  A   192.0.2.10
"#;

pub fn write_temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub async fn memory_pool() -> SqlitePool {
    create_pool("sqlite::memory:").await.unwrap()
}

pub async fn memory_repository() -> (SqliteZoneRepository, SqlitePool) {
    let pool = memory_pool().await;
    (SqliteZoneRepository::new(pool.clone()), pool)
}
