// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 Not Found, 403 Forbidden

    #[error("Could not find document at: {0}")]
    DocNotFound(String),

    #[error("Failed to read PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Document is encrypted and cannot be read")]
    Encrypted,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document loading failed: {0}")]
    Document(#[from] DocumentError),

    #[error("Failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
}
