//! atelier HTTP Server
//!
//! Axum-based server behind the atelier site: quote estimation, Stripe
//! payment orchestration (payment intents and hosted checkout), Stripe
//! webhooks and read-only Zoho invoice lookup.
//!
//! Missing integration credentials never prevent boot; the matching
//! endpoints answer "not configured" instead.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier_invoicing::ZohoClient;
use atelier_payments::StripeGateway;

use crate::handlers::{
    create_checkout, create_payment_intent, health_check, invoice_lookup, quote_handler,
    stripe_webhook,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize integrations; either may be absent.
    let stripe = StripeGateway::from_env().ok();
    if stripe.is_some() {
        tracing::info!("✓ Stripe configured");
    } else {
        tracing::warn!("⚠ Stripe not configured - payment endpoints disabled");
        tracing::warn!("  Set STRIPE_SECRET_KEY and STRIPE_WEBHOOK_SECRET in .env");
    }

    let zoho = ZohoClient::from_env().ok();
    if zoho.is_some() {
        tracing::info!("✓ Zoho Invoice configured");
    } else {
        tracing::warn!("⚠ Zoho not configured - invoice lookup disabled");
        tracing::warn!("  Set ZOHO_CLIENT_ID, ZOHO_CLIENT_SECRET, ZOHO_REFRESH_TOKEN and ZOHO_ORGANIZATION_ID in .env");
    }

    let state = AppState {
        stripe: stripe.map(Arc::new),
        zoho: zoho.map(Arc::new),
    };

    let app = build_router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 atelier server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /api/health                    - Health & config check");
    tracing::info!("  POST /api/devis                     - Quote estimation");
    tracing::info!("  POST /api/payment-intent            - Create Stripe payment intent");
    tracing::info!("  POST /api/checkout                  - Create hosted checkout session");
    tracing::info!("  POST /api/webhooks/stripe           - Stripe webhook");
    tracing::info!("  GET  /api/invoices/{{invoice_number}} - Invoice lookup");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the router; shared with the handler tests.
fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/api/health", get(health_check))
        // Quote API
        .route("/api/devis", post(quote_handler))
        // Payments
        .route("/api/payment-intent", post(create_payment_intent))
        .route("/api/checkout", post(create_checkout))
        .route("/api/webhooks/stripe", post(stripe_webhook))
        // Invoicing
        .route("/api/invoices/{invoice_number}", get(invoice_lookup))
        // Static files (marketing pages)
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
