use crate::objects::ObjectId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("Type mismatch for key {key}: expected {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Invalid ancestor: {0}")]
    InvalidAncestor(String),

    #[error("Attribute {0} not defined on page or any ancestor")]
    AttributeNotInherited(String),

    #[error("Cyclic page tree ancestry at {0}")]
    CyclicAncestry(ObjectId),

    #[error("Malformed annotation: {0}")]
    MalformedAnnotation(String),

    #[error("Encoding error: {0}")]
    EncodingFailure(String),

    #[error("Invalid object reference: {0}")]
    InvalidReference(ObjectId),

    #[error("Reference cycle detected at {0}")]
    ReferenceCycle(ObjectId),

    #[error("Invalid rectangle: {0}")]
    InvalidRectangle(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Stream decode error: {0}")]
    StreamDecode(String),
}

impl PdfError {
    pub(crate) fn type_mismatch(key: impl Into<String>, expected: &'static str) -> Self {
        PdfError::TypeMismatch {
            key: key.into(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;
