//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Amount must be a strictly positive number of minor units
    #[error("invalid amount: {0} (expected a positive amount in cents)")]
    InvalidAmount(i64),

    /// Unknown ISO currency code
    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),

    /// Webhook signature verification failed
    #[error("webhook signature invalid: {0}")]
    WebhookSignature(String),

    /// Webhook payload parsing failed
    #[error("webhook parse error: {0}")]
    WebhookParse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Whether the failure is attributable to the caller (HTTP 400)
    /// rather than the server or Stripe (HTTP 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PaymentError::InvalidAmount(_)
                | PaymentError::InvalidCurrency(_)
                | PaymentError::WebhookSignature(_)
                | PaymentError::WebhookParse(_)
        )
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::Stripe(_) => "Erreur lors de la création du paiement",
            PaymentError::InvalidAmount(_) => "Le montant doit être strictement positif",
            PaymentError::InvalidCurrency(_) => "Devise non reconnue",
            PaymentError::WebhookSignature(_) => "Invalid signature",
            PaymentError::WebhookParse(_) => "Invalid payload",
            PaymentError::Config(_) => "Service configuration error",
        }
    }
}
