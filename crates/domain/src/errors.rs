use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Unsupported record type: {0}")]
    InvalidRecordType(String),

    #[error("Unknown disposition: {0}")]
    InvalidDisposition(String),

    #[error("Invalid pattern in {path} line {line}: {reason}")]
    InvalidPattern {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Cannot read pattern file {path}: {reason}")]
    PatternFile { path: String, reason: String },

    /// Rendered as `line:column: reason` by the zone-file scanner.
    #[error("Zone file error at {0}")]
    ZoneParse(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Timeout querying {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::IoError(err.to_string())
    }
}
