mod csv;

pub use csv::{write_buckets, write_nameservers, write_reverse_zone};
