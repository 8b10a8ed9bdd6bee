// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 Not Found, 503 Service Unavailable

    #[error("Invalid register request: {0}")]
    InvalidRequest(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unexpected document: {0}")]
    UnexpectedDocument(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateError {
    #[error("Malformed date token: {0}")]
    MalformedDate(String),

    #[error("Unrecognized request date '{0}' (expected YYYY-MM-DD, DD-MMM-YY or DD/MM/YY)")]
    UnrecognizedRequestDate(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Register fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Date error: {0}")]
    Date(#[from] DateError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
