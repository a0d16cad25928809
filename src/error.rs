//! Error types for the allocator and the command-line front end.

use thiserror::Error;

/// Fatal conditions detected while validating or allocating an election.
///
/// Every variant is raised before any district is allocated, so a caller
/// either receives a complete `ResultSet` or one of these and nothing else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("total votes across all parties and districts is zero; vote shares are undefined")]
    DivisionUndefined,

    #[error("no party reaches the eligibility threshold of {threshold}")]
    NoEligibleParties { threshold: f64 },

    #[error("party column not found in input table: {party}")]
    InvalidPartyColumn { party: String },

    #[error("{role} column not found in input table: {column}")]
    MissingColumn { role: &'static str, column: String },

    #[error("threshold must be a fraction in [0, 1], got {threshold}")]
    InvalidThreshold { threshold: f64 },

    #[error("no party columns configured")]
    EmptyPartyList,

    #[error("party listed more than once: {party}")]
    DuplicateParty { party: String },

    #[error("negative vote count {votes} for {party} in district {district}")]
    NegativeVotes {
        district: String,
        party: String,
        votes: f64,
    },

    #[error("non-numeric vote count {value:?} for {party} in district {district}")]
    NonNumericVotes {
        district: String,
        party: String,
        value: String,
    },

    #[error("non-finite vote count {votes} for {party} in district {district}")]
    NonFiniteVotes {
        district: String,
        party: String,
        votes: f64,
    },

    #[error("vote totals overflow; shares cannot be computed")]
    VoteTotalOverflow,

    #[error("column {column:?} is used both as {first} and as {second}")]
    ColumnConflict {
        column: String,
        first: String,
        second: String,
    },
}

pub type AllocationResult<T> = std::result::Result<T, AllocationError>;

/// Everything the binary can fail with: reading input, writing output, or
/// the allocation itself.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),
    #[error("Input table has no header row")]
    MissingHeader,
}

pub type AppResult<T> = std::result::Result<T, AppError>;
