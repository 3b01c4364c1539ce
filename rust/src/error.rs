//! Error handling and result types for BTree operations.
//!
//! The core operations (`search`, `insert`, `delete`) are total and never
//! return these errors; they surface from construction, from the checked
//! `try_*` mutations, and from the invariant validator.

use thiserror::Error;

/// Error type for B-tree operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BTreeError {
    /// Minimum degree outside the supported range.
    #[error("Invalid degree: {degree} (supported range: {min}..={max})")]
    InvalidDegree { degree: usize, min: usize, max: usize },

    /// Key not found in the tree.
    #[error("Key not found in tree")]
    KeyNotFound,

    /// Structural invariant violation.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// Arena contents disagree with the tree structure.
    #[error("Arena error: {0}")]
    ArenaError(String),
}

impl BTreeError {
    /// Create an InvalidDegree error
    pub fn invalid_degree(degree: usize, min: usize, max: usize) -> Self {
        Self::InvalidDegree { degree, min, max }
    }

    /// Create a DataIntegrity error with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrity(format!("{}: {}", context, details))
    }

    /// Create an ArenaError with context
    pub fn arena_error(operation: &str, details: &str) -> Self {
        Self::ArenaError(format!("{} failed: {}", operation, details))
    }

    /// Check if this error is a degree error
    pub fn is_degree_error(&self) -> bool {
        matches!(self, Self::InvalidDegree { .. })
    }

    /// Check if this error reports a broken invariant
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, Self::DataIntegrity(_) | Self::ArenaError(_))
    }
}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, BTreeError>;

/// Public result type for tree operations that may fail
pub type BTreeResult<T> = Result<T, BTreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, BTreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, BTreeError>;

/// Result type for tree construction
pub type InitResult<T> = Result<T, BTreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BTreeError::invalid_degree(1, 2, 100).to_string(),
            "Invalid degree: 1 (supported range: 2..=100)"
        );
        assert_eq!(BTreeError::KeyNotFound.to_string(), "Key not found in tree");
        assert_eq!(
            BTreeError::data_integrity("Node 4", "keys out of order").to_string(),
            "Data integrity error: Node 4: keys out of order"
        );
        assert_eq!(
            BTreeError::arena_error("Reachability check", "3 in tree vs 4 in arena").to_string(),
            "Arena error: Reachability check failed: 3 in tree vs 4 in arena"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(BTreeError::invalid_degree(0, 2, 100).is_degree_error());
        assert!(!BTreeError::KeyNotFound.is_degree_error());
        assert!(BTreeError::data_integrity("a", "b").is_integrity_error());
        assert!(BTreeError::arena_error("a", "b").is_integrity_error());
        assert!(!BTreeError::KeyNotFound.is_integrity_error());
    }
}
