/*!
 * Error types for the translate-all application.
 *
 * This module contains custom error types for the different layers of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that fail a single language job
#[derive(Error, Debug)]
pub enum TranslationError {
    /// A chunk call failed; the provider message is kept verbatim
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The job's task ended without producing a result
    #[error("translation task aborted: {0}")]
    Aborted(String),
}

/// Main application error type; every variant aborts the whole run
#[derive(Error, Debug)]
pub enum AppError {
    /// The input document could not be read
    #[error("Failed to load input document: {0}")]
    InputLoad(String),

    /// Listing the supported languages failed
    #[error("Failed to list supported languages: {0}")]
    LanguageListing(#[source] ProviderError),

    /// Detecting the document's source language failed
    #[error("Failed to detect source language: {0}")]
    SourceDetection(#[source] ProviderError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
