use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from the terminal or log/config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Transport-level failure talking to the listing service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The listing service answered, but with an error.
    #[error("Query failed: {0}")]
    Query(String),

    /// The listing service answered with a body we could not decode.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured service endpoint is not a usable URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "log dir missing");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("log dir missing"));
    }

    #[test]
    fn terminal_error_display() {
        let err = AppError::Terminal("failed to enter raw mode".into());
        assert_eq!(err.to_string(), "Terminal error: failed to enter raw mode");
    }

    #[test]
    fn query_error_display() {
        let err = AppError::Query("path not found".into());
        assert_eq!(err.to_string(), "Query failed: path not found");
    }

    #[test]
    fn decode_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Decode(_)));
    }

    #[test]
    fn invalid_endpoint_display() {
        let err = AppError::InvalidEndpoint("ftp://nowhere".into());
        assert_eq!(err.to_string(), "Invalid endpoint: ftp://nowhere");
    }
}
