use std::fmt;

/// Application error types for better error handling and user feedback.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Missing or invalid environment configuration
    Config(String),
    /// The store rejected an operation
    Storage(String),
    /// Transport-level failure reaching the store
    Network(String),
    /// Errors related to data validation
    Validation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversion to String for presentation boundaries
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.to_string()
    }
}

// Convenience constructors
impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }

    pub fn storage<S: Into<String>>(msg: S) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn network<S: Into<String>>(msg: S) -> Self {
        AppError::Network(msg.into())
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        AppError::Validation(msg.into())
    }
}

/// Result type alias for fallible operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::storage("table not found");
        assert_eq!(err.to_string(), "Storage error: table not found");
    }

    #[test]
    fn test_error_conversion_to_string() {
        let err = AppError::config("SUPABASE_URL is not set");
        let s: String = err.into();
        assert!(s.contains("Configuration error"));
    }

    #[test]
    fn test_error_constructors() {
        let storage_err = AppError::storage("test");
        assert!(matches!(storage_err, AppError::Storage(_)));

        let validation_err = AppError::validation("test");
        assert!(matches!(validation_err, AppError::Validation(_)));
    }
}
