pub mod database;
pub mod dns;
pub mod patterns;
pub mod report;
pub mod repositories;
pub mod zone_file;
