//! Invoicing Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, InvoicingError>;

/// Zoho Invoice client errors
#[derive(Error, Debug)]
pub enum InvoicingError {
    /// Missing or invalid credentials
    #[error("configuration error: {0}")]
    Config(String),

    /// Access-token refresh failed
    #[error("token refresh failed: {0}")]
    Token(String),

    /// Zoho API returned a non-success response
    #[error("Zoho API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl InvoicingError {
    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            InvoicingError::Config(_) => "Zoho Invoice integration not configured",
            _ => "Failed to fetch invoice",
        }
    }
}
