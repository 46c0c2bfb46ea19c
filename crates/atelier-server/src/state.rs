//! Application State

use std::sync::Arc;

use atelier_invoicing::ZohoClient;
use atelier_payments::StripeGateway;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Stripe gateway (None when STRIPE_* env vars are missing)
    pub stripe: Option<Arc<StripeGateway>>,

    /// Zoho Invoice client (None when ZOHO_* env vars are missing)
    pub zoho: Option<Arc<ZohoClient>>,
}
