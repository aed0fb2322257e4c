use thiserror::Error;

/// Main error type for COSEM XML generation
#[derive(Error, Debug)]
pub enum CosemError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Unsupported class: {0}")]
    UnsupportedClass(String),

    #[error("Unsupported attribute: {0}")]
    UnsupportedAttribute(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for COSEM XML generation
pub type CosemResult<T> = Result<T, CosemError>;
