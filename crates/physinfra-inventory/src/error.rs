//! Error types for inventory translation.

/// Errors that can occur while translating vendor inventory objects.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// A structural field the translation cannot proceed without
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The input document has a shape that holds no switch descriptors
    #[error("Invalid inventory document: {0}")]
    InvalidDocument(String),

    /// Vendor JSON could not be deserialized into the raw types
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Result type for inventory translation.
pub type Result<T> = std::result::Result<T, InventoryError>;
