use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No sample available for '{0}'")]
    SampleUnavailable(String),

    #[error("Theme error: {0}")]
    Theme(String),

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Invalid editor height: {0}")]
    InvalidHeight(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::SampleUnavailable("swift".to_string());
        assert_eq!(err.to_string(), "No sample available for 'swift'");

        let err = AppError::InvalidHeight("tall".to_string());
        assert_eq!(err.to_string(), "Invalid editor height: tall");

        let err = AppError::Theme("missing folder".to_string());
        assert_eq!(err.to_string(), "Theme error: missing folder");

        let err = AppError::Settings("bad default language".to_string());
        assert_eq!(err.to_string(), "Settings error: bad default language");
    }
}
