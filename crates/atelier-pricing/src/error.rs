//! Pricing Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PricingError>;

/// Quote validation errors
#[derive(Error, Debug)]
pub enum PricingError {
    /// A required form field is absent or empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl PricingError {
    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            PricingError::MissingField(_) => {
                "Tous les champs obligatoires doivent être remplis".into()
            }
        }
    }
}
