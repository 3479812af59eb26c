//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent taxonomy and activity list violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate category alias: {0}")]
    DuplicateAlias(String),

    #[error("category '{alias}' references unknown parent '{parent}'")]
    DanglingParent { alias: String, parent: String },

    #[error("root categories '{first}' and '{second}' share the title '{title}'")]
    DuplicateRoot {
        title: String,
        first: String,
        second: String,
    },

    #[error("cycle detected in category hierarchy at: {0}")]
    CycleDetected(String),

    #[error("activity list is full (max size of {0})")]
    ActivityListFull(usize),

    #[error("priority {priority} is out of range [1-{max}]")]
    PriorityOutOfRange { priority: usize, max: usize },

    #[error("internal category tree operation failed: {0}")]
    Internal(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Recoverable errors raised while navigating a materialized tree.
///
/// These never change traversal state; the caller re-prompts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no category titled '{0}' at this level")]
    NotFound(String),

    #[error("already at the top level")]
    AtRoot,
}
