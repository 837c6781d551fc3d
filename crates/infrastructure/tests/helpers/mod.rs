pub mod dns_server_mock;
pub mod fixtures;

pub use dns_server_mock::*;
pub use fixtures::*;
