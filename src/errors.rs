use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Network request failed or the server answered with a non-success status
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlError(String),
    /// Response body is not a readable zip archive, or holds an unsafe entry
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),
    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    ConfigError(String),
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::InvalidArchive(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
