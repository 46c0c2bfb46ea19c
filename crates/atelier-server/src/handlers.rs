//! HTTP Handlers
//!
//! Thin routing layer over the pricing, payments and invoicing crates.
//! Error policy: caller mistakes map to 400, missing integration
//! configuration and upstream failures map to 500, with the detailed cause
//! only in the server logs.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use atelier_invoicing::SanitizedInvoice;
use atelier_payments::{
    CheckoutRequest, PaymentError, PaymentIntentRequest, WebhookDispatcher,
};
use atelier_pricing::{Estimate, QuoteRequest, estimate};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
    pub zoho_configured: bool,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub publishable_key_present: bool,
    pub publishable_key_format: bool,
    pub secret_key_present: bool,
    pub secret_key_format: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub success: bool,
    pub message: String,
    pub estimated_price: i64,
    pub details: Estimate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutApiRequest {
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub url: String,
    pub session_id: String,
}

#[derive(Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub success: bool,
    pub invoice: SanitizedInvoice,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, error: impl Into<String>, code: &str) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

fn payments_disabled() -> HandlerError {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Payments not configured",
        "PAYMENTS_DISABLED",
    )
}

fn map_payment_error(e: &PaymentError) -> HandlerError {
    let status = if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let code = match e {
        PaymentError::InvalidAmount(_) => "INVALID_AMOUNT",
        PaymentError::InvalidCurrency(_) => "INVALID_CURRENCY",
        PaymentError::WebhookSignature(_) => "INVALID_SIGNATURE",
        PaymentError::WebhookParse(_) => "INVALID_PAYLOAD",
        PaymentError::Config(_) => "PAYMENTS_DISABLED",
        PaymentError::Stripe(_) => "PAYMENT_ERROR",
    };
    error_response(status, e.user_message(), code)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health and configuration check
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let publishable_key = std::env::var("STRIPE_PUBLISHABLE_KEY").ok();
    let secret_key = std::env::var("STRIPE_SECRET_KEY").ok();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.stripe.is_some(),
        zoho_configured: state.zoho.is_some(),
        checks: HealthChecks {
            publishable_key_present: publishable_key.is_some(),
            publishable_key_format: publishable_key
                .as_deref()
                .is_some_and(|k| k.starts_with("pk_")),
            secret_key_present: secret_key.is_some(),
            secret_key_format: secret_key.as_deref().is_some_and(|k| k.starts_with("sk_")),
        },
    })
}

/// Quote estimation endpoint
///
/// The submission is logged and priced, never stored.
pub async fn quote_handler(
    Json(payload): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, HandlerError> {
    let quote = estimate(&payload).map_err(|e| {
        tracing::warn!(error = %e, "Rejected quote request");
        error_response(StatusCode::BAD_REQUEST, e.user_message(), "MISSING_FIELD")
    })?;

    tracing::info!(
        name = %payload.name,
        email = %payload.email,
        company = ?payload.company,
        service = %payload.service_type,
        complexity = %payload.complexity,
        timeline = %payload.timeline,
        budget = ?payload.budget,
        price = quote.price,
        "New quote request"
    );

    Ok(Json(QuoteResponse {
        success: true,
        message: "Devis calculé avec succès".into(),
        estimated_price: quote.price,
        details: quote,
    }))
}

/// Create a Stripe payment intent (embedded Elements flow)
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(payload): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, HandlerError> {
    let stripe = state.stripe.as_ref().ok_or_else(payments_disabled)?;

    let session = stripe.create_payment_intent(payload).await.map_err(|e| {
        tracing::error!(error = %e, "Payment intent creation failed");
        map_payment_error(&e)
    })?;

    Ok(Json(PaymentIntentResponse {
        client_secret: session.client_secret,
        payment_intent_id: session.payment_intent_id,
    }))
}

/// Create a hosted Stripe checkout session (redirect flow)
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutApiRequest>,
) -> Result<Json<CheckoutResponse>, HandlerError> {
    let stripe = state.stripe.as_ref().ok_or_else(payments_disabled)?;

    let request = CheckoutRequest {
        amount: payload.amount,
        currency: payload.currency,
        product_name: payload.product_name,
        description: payload.description,
        customer_email: payload.customer_email,
        success_url: payload.success_url,
        cancel_url: payload.cancel_url,
        metadata: payload.metadata,
    };

    let session = stripe.create_checkout_session(request).await.map_err(|e| {
        tracing::error!(error = %e, "Checkout session creation failed");
        map_payment_error(&e)
    })?;

    Ok(Json(CheckoutResponse {
        url: session.checkout_url,
        session_id: session.id,
    }))
}

/// Stripe webhook endpoint
///
/// Verifies the signature over the raw body before anything else; every
/// verified event is acknowledged, including types we do not handle.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, HandlerError> {
    let stripe = state.stripe.as_ref().ok_or_else(payments_disabled)?;

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                "Missing Stripe signature",
                "MISSING_SIGNATURE",
            )
        })?;

    let dispatcher = WebhookDispatcher::new(stripe.webhook_secret());

    let event = dispatcher.construct_event(&body, signature).map_err(|e| {
        tracing::warn!(error = %e, "Webhook rejected");
        map_payment_error(&e)
    })?;

    dispatcher.dispatch(&event);

    Ok(Json(WebhookAck { received: true }))
}

/// Invoice lookup by number (public, sanitized)
pub async fn invoice_lookup(
    State(state): State<AppState>,
    Path(invoice_number): Path<String>,
) -> Result<Json<InvoiceResponse>, HandlerError> {
    let zoho = state.zoho.as_ref().ok_or_else(|| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Zoho Invoice integration not configured",
            "ZOHO_DISABLED",
        )
    })?;

    let invoice = zoho
        .get_invoice_by_number(&invoice_number)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %invoice_number, "Invoice lookup failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.user_message(),
                "INVOICE_ERROR",
            )
        })?
        .ok_or_else(|| {
            error_response(StatusCode::NOT_FOUND, "Invoice not found", "NOT_FOUND")
        })?;

    Ok(Json(InvoiceResponse {
        success: true,
        invoice: invoice.sanitized(),
    }))
}

// ============================================================================
// Tests
// ============================================================================
