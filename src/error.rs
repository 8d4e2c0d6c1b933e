/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::InvalidInput("rating must be between 0 and 10".to_string());
        assert_eq!(err.to_string(), "Invalid input: rating must be between 0 and 10");

        let err = AppError::NotFound("movie 99".to_string());
        assert_eq!(err.to_string(), "Not found: movie 99");
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: AppError = parse.unwrap_err().into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
