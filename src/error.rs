//! Error types for the screenplay PDF generator.
//!
//! This module defines all error types that can occur while building the
//! object graph, laying out a screenplay, or writing the output file.

use crate::object::ObjectRef;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PDF generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dictionary key was set twice
    #[error("Duplicate dictionary key: /{0}")]
    DuplicateKey(String),

    /// Handle does not name an object allocated by this compositor
    #[error("Object not found: {0} {1} R")]
    ObjectNotFound(u32, u16),

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// An indirect reference points at nothing in the object graph
    #[error("Dangling reference: {0} is not an allocated object")]
    DanglingReference(ObjectRef),

    /// An input element could not be decoded into a known element kind
    #[error("Malformed element: {0}")]
    MalformedElement(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
