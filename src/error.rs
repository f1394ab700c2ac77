//! Error types shared across the crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The key-value backend refused a read or write
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type FinanceResult<T> = Result<T, FinanceError>;

impl FinanceError {
    pub fn transaction_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Transaction",
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            FinanceError::Storage("quota exceeded".into()).to_string(),
            "Storage error: quota exceeded"
        );
        assert_eq!(
            FinanceError::Validation("Category is required".into()).to_string(),
            "Validation error: Category is required"
        );
    }

    #[test]
    fn test_transaction_not_found() {
        let err = FinanceError::transaction_not_found("t9");
        assert_eq!(err.to_string(), "Transaction not found: t9");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_conversions() {
        let io: FinanceError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(io, FinanceError::Io(_)));

        let json: FinanceError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(json, FinanceError::Json(_)));
    }
}
