//! Error types for the document boundary.
//!
//! Scanning and reconstruction are total and never fail. Only reading a
//! document container can, and every structural problem is reported as the
//! single [`DocumentError::InvalidStructure`] classification.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    /// Unreadable container, missing part, malformed markup or missing body.
    #[error("invalid document structure: {0}")]
    InvalidStructure(String),

    /// Writing the output container failed.
    #[error("failed to package document: {0}")]
    Package(String),
}

impl DocumentError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        DocumentError::InvalidStructure(reason.into())
    }

    pub fn is_invalid_structure(&self) -> bool {
        matches!(self, DocumentError::InvalidStructure(_))
    }
}

impl From<zip::result::ZipError> for DocumentError {
    fn from(err: zip::result::ZipError) -> Self {
        DocumentError::InvalidStructure(format!("unreadable container: {err}"))
    }
}

impl From<quick_xml::Error> for DocumentError {
    fn from(err: quick_xml::Error) -> Self {
        DocumentError::InvalidStructure(format!("malformed markup: {err}"))
    }
}

pub type DocumentResult<T> = std::result::Result<T, DocumentError>;
