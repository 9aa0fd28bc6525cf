use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Failed to parse XML content or the document has an unexpected shape
    ParseError(String),
    /// A field expected to hold an integer failed to parse; aborts the stream
    NumberFormat { field: String, value: String },
    /// Invalid input format (CLI arguments, config values, entity names)
    InvalidInput(String),
    /// IO operation failed (read, decompression, output write)
    IoError(String),
}

impl AppError {
    /// Builds a `NumberFormat` error for a named field and the offending text.
    pub fn number_format(field: &str, value: &str) -> Self {
        AppError::NumberFormat {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            AppError::NumberFormat { field, value } => {
                write!(f, "Malformed numeric field '{field}': '{value}'")
            }
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            AppError::IoError(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

// Conversion implementations for common errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<quick_xml::Error> for AppError {
    fn from(err: quick_xml::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<polars::prelude::PolarsError> for AppError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
