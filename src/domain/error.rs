//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Structural violations found while validating a record collection.
///
/// Validation fails fast, so exactly one variant is reported per attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate root: more than one record has id 0")]
    DuplicateRoot,

    #[error("duplicate node: more than one record has id {id}")]
    DuplicateNode { id: usize },

    #[error("non-contiguous ids: expected id {expected}, found {found}")]
    NonContiguous { expected: usize, found: usize },

    #[error("no root: no record has id 0")]
    NoRoot,

    #[error("root has parent: record 0 names {parent_id} as parent")]
    RootHasParent { parent_id: usize },

    #[error("parent id too high: record {id} names higher id {parent_id} as parent")]
    ParentIdTooHigh { id: usize, parent_id: usize },

    #[error("cycle detected: parent chain of record {id} does not reach the root")]
    CycleDetected { id: usize },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, ValidationError>;
