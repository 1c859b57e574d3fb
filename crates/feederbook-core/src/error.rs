use thiserror::Error;

/// Core error type shared across feederbook crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The hierarchy layout does not fit the static lookup tables.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    /// A row could not be turned into a meter reading record.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    /// A lookup table has no entry for the requested key.
    #[error("missing lookup: {0}")]
    MissingLookup(String),
}

/// Convenience alias for results returned by feederbook crates.
pub type Result<T> = std::result::Result<T, Error>;
