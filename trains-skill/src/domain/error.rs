//! Domain error types.
//!
//! These errors represent validation failures when building domain records.
//! They are distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Train record without an identifier
    #[error("train has no id")]
    MissingTrainId,

    /// Train lists the same station twice
    #[error("train {train} stops at {station} more than once")]
    DuplicateStop { train: String, station: String },
}
